pub mod config;
pub mod merge_env;
pub mod new;
