use serde::{Deserialize, Serialize};

/// One requested installation step.
///
/// Deserializes from the `{ "type": ..., "content": ... }` objects callers
/// hand over; an unknown `type` is a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileDescriptor {
    /// Function source to write to `<functions_dir>/<name>.<ext>`.
    Function { content: String },

    /// Environment document to merge into the project's `.env`.
    #[serde(alias = ".env")]
    Env {
        content: String,
        #[serde(rename = "functionName")]
        function_name: String,
    },

    /// Manifest fragment whose `dependencies` get installed.
    #[serde(alias = "package.json")]
    Manifest { content: String },
}

/// Discriminant of a [`FileDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    Function,
    Env,
    Manifest,
}

impl std::fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptorKind::Function => write!(f, "function"),
            DescriptorKind::Env => write!(f, "env"),
            DescriptorKind::Manifest => write!(f, "manifest"),
        }
    }
}

impl FileDescriptor {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            FileDescriptor::Function { .. } => DescriptorKind::Function,
            FileDescriptor::Env { .. } => DescriptorKind::Env,
            FileDescriptor::Manifest { .. } => DescriptorKind::Manifest,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            FileDescriptor::Function { content }
            | FileDescriptor::Env { content, .. }
            | FileDescriptor::Manifest { content } => content,
        }
    }

    /// Title shown while the task runs. `env_file` names the environment document.
    pub fn title(&self, env_file: &str) -> String {
        match self {
            FileDescriptor::Function { .. } => "Create Function".to_string(),
            FileDescriptor::Env { .. } => format!("Configure Environment Variables in {env_file}"),
            FileDescriptor::Manifest { .. } => "Installing Dependencies".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_descriptor_list() {
        let json = r#"[
            {"type": "function", "content": "https://example.com/fn.js"},
            {"type": "env", "content": "https://example.com/.env", "functionName": "hello"},
            {"type": "manifest", "content": "https://example.com/package.json"}
        ]"#;

        let descriptors: Vec<FileDescriptor> = serde_json::from_str(json).unwrap();

        assert_eq!(
            descriptors,
            vec![
                FileDescriptor::Function {
                    content: "https://example.com/fn.js".to_string()
                },
                FileDescriptor::Env {
                    content: "https://example.com/.env".to_string(),
                    function_name: "hello".to_string()
                },
                FileDescriptor::Manifest {
                    content: "https://example.com/package.json".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_file_name_type_aliases() {
        let env: FileDescriptor =
            serde_json::from_str(r#"{"type": ".env", "content": "u", "functionName": "f"}"#).unwrap();
        let manifest: FileDescriptor =
            serde_json::from_str(r#"{"type": "package.json", "content": "u"}"#).unwrap();

        assert_eq!(env.kind(), DescriptorKind::Env);
        assert_eq!(manifest.kind(), DescriptorKind::Manifest);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = serde_json::from_str::<FileDescriptor>(r#"{"type": "readme", "content": "u"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_requires_function_name() {
        let result = serde_json::from_str::<FileDescriptor>(r#"{"type": "env", "content": "u"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_titles_and_content() {
        let descriptor = FileDescriptor::Manifest {
            content: "u".to_string(),
        };
        assert_eq!(descriptor.title(".env"), "Installing Dependencies");
        assert_eq!(descriptor.content(), "u");
        assert_eq!(descriptor.kind().to_string(), "manifest");
    }

    #[test]
    fn test_env_title_names_env_file() {
        let descriptor = FileDescriptor::Env {
            content: "u".to_string(),
            function_name: "f".to_string(),
        };
        assert_eq!(
            descriptor.title(".env"),
            "Configure Environment Variables in .env"
        );
        assert_eq!(
            descriptor.title(".env.local"),
            "Configure Environment Variables in .env.local"
        );
    }
}
