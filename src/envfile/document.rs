use indexmap::IndexMap;

/// Parsed environment document: keys in first-seen order.
///
/// Parsing goes through `dotenvy`. Lines it rejects are skipped, so a
/// malformed document never fails to parse. A key assigned twice keeps its
/// first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDocument {
    vars: IndexMap<String, String>,
}

impl EnvDocument {
    pub fn parse(text: &str) -> Self {
        let vars = dotenvy::from_read_iter(text.as_bytes())
            .filter_map(|item| match item {
                Ok(pair) => Some(pair),
                Err(e) => {
                    tracing::trace!(error = %e, "Skipping unparsable env line");
                    None
                }
            })
            .collect();
        Self { vars }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Key assigned by a single raw line, if the line looks like `KEY=...`.
///
/// Only used to decide which incoming lines to disable; the key is looked up
/// in a parsed [`EnvDocument`], so comments and junk never match.
pub fn line_key(line: &str) -> Option<&str> {
    let (lhs, _) = line.trim_end_matches('\r').split_once('=')?;
    let key = lhs.trim();
    let key = key.strip_prefix("export ").map(str::trim_start).unwrap_or(key);
    (!key.is_empty() && !key.starts_with('#')).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_skips_bad_lines() {
        let doc = EnvDocument::parse("B=1\n# comment\nA=2\n\nB=3\nbroken line\nC=4\n");

        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_parse_quotes_whitespace_and_export() {
        let doc = EnvDocument::parse("  TOKEN = \"s3cr=t\"\nexport NAME='x'\nEMPTY=\n");

        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["TOKEN", "NAME", "EMPTY"]);
    }

    #[test]
    fn test_parse_crlf() {
        let doc = EnvDocument::parse("A=1\r\nB=2\r\n");
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let doc = EnvDocument::parse("api_key=1\n");
        assert!(doc.contains_key("api_key"));
        assert!(!doc.contains_key("API_KEY"));
    }

    #[test]
    fn test_unparsable_only_document_is_empty() {
        assert!(EnvDocument::parse("").is_empty());
        assert!(EnvDocument::parse("=value\nMY KEY=1\n").is_empty());
    }

    #[test]
    fn test_line_key() {
        assert_eq!(line_key("API_KEY=abc"), Some("API_KEY"));
        assert_eq!(line_key("  TOKEN = \"a=b\""), Some("TOKEN"));
        assert_eq!(line_key("export NAME=x\r"), Some("NAME"));
        assert_eq!(line_key("# A=1"), None);
        assert_eq!(line_key("just words"), None);
        assert_eq!(line_key("=value"), None);
    }
}
