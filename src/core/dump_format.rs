//! Tokenizer for the `dconf dump` / `dconf load` text format.
//!
//! ```text
//! [/]
//! default='b1dcc9dd-5262-4d8d-a863-c897e6d979b9'
//! list=['b1dcc9dd-5262-4d8d-a863-c897e6d979b9']
//!
//! [:b1dcc9dd-5262-4d8d-a863-c897e6d979b9]
//! visible-name='Default'
//! ```

use crate::utils::error::{MigrateError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub line: usize,
    pub entries: Vec<(String, String)>,
}

impl Section {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Header(&'a str),
    Entry(&'a str, &'a str),
}

fn classify(raw: &str, line: usize) -> Result<Line<'_>> {
    let trimmed = raw.trim_end_matches('\r');
    if trimmed.trim().is_empty() {
        return Ok(Line::Blank);
    }

    if let Some(rest) = trimmed.strip_prefix('[') {
        let id = rest.strip_suffix(']').ok_or_else(|| MigrateError::DumpParseError {
            line,
            message: format!("unterminated section header '{}'", trimmed),
        })?;
        return Ok(Line::Header(id));
    }

    // Values may contain '=' themselves, keys never do.
    let (key, value) = trimmed
        .split_once('=')
        .ok_or_else(|| MigrateError::DumpParseError {
            line,
            message: format!("expected key=value, found '{}'", trimmed),
        })?;
    if key.is_empty() {
        return Err(MigrateError::DumpParseError {
            line,
            message: "empty key".to_string(),
        });
    }
    Ok(Line::Entry(key, value))
}

pub fn tokenize(text: &str) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        match classify(raw, line)? {
            Line::Blank => {}
            Line::Header(id) => {
                if sections.iter().any(|s| s.id == id) {
                    return Err(MigrateError::DumpParseError {
                        line,
                        message: format!("duplicate section [{}]", id),
                    });
                }
                sections.push(Section {
                    id: id.to_string(),
                    line,
                    entries: Vec::new(),
                });
            }
            Line::Entry(key, value) => {
                let section = sections.last_mut().ok_or_else(|| MigrateError::DumpParseError {
                    line,
                    message: format!("'{}' appears before any section header", key),
                })?;
                section.entries.push((key.to_string(), value.to_string()));
            }
        }
    }

    Ok(sections)
}

/// Removes one pair of surrounding single quotes, if present.
pub fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}

/// Parses a GVariant string array such as `['a', 'b']`.
pub fn parse_list_literal(value: &str, line: usize) -> Result<Vec<String>> {
    let inner = value
        .trim()
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| MigrateError::DumpParseError {
            line,
            message: format!("expected a list literal, found '{}'", value),
        })?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            if item.len() < 2 || !item.starts_with('\'') || !item.ends_with('\'') {
                return Err(MigrateError::DumpParseError {
                    line,
                    message: format!("expected a quoted list item, found '{}'", item),
                });
            }
            Ok(item[1..item.len() - 1].trim().to_string())
        })
        .collect()
}

pub fn format_list_literal<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

pub fn format_section<'a, I>(id: &str, entries: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut out = format!("[{}]", id);
    for (key, value) in entries {
        out.push('\n');
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_sections() {
        let text = "[/]\nlist=['a']\n\n[:a]\nvisible-name='A'\ncustom-command='x=1'\n";
        let sections = tokenize(text).unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, "/");
        assert_eq!(sections[0].get("list"), Some("['a']"));
        assert_eq!(sections[1].id, ":a");
        assert_eq!(sections[1].line, 4);
        assert_eq!(sections[1].get("custom-command"), Some("'x=1'"));
    }

    #[test]
    fn test_tokenize_errors_carry_line_numbers() {
        match tokenize("visible-name='A'") {
            Err(MigrateError::DumpParseError { line, .. }) => assert_eq!(line, 1),
            other => panic!("unexpected result: {:?}", other),
        }
        match tokenize("[/]\nlist=[]\n[:a") {
            Err(MigrateError::DumpParseError { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(tokenize("[/]\njust-a-key").is_err());
        assert!(tokenize("[/]\n=value").is_err());
        assert!(tokenize("[/]\n[/]").is_err());
    }

    #[test]
    fn test_tokenize_handles_crlf() {
        let sections = tokenize("[/]\r\nlist=['a']\r\n").unwrap();
        assert_eq!(sections[0].get("list"), Some("['a']"));
    }

    #[test]
    fn test_parse_list_literal() {
        assert_eq!(parse_list_literal("[]", 1).unwrap(), Vec::<String>::new());
        assert_eq!(
            parse_list_literal("['a', 'b']", 1).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(parse_list_literal("['a','b']", 1).unwrap().len(), 2);
        assert!(parse_list_literal("'a'", 1).is_err());
        assert!(parse_list_literal("[a, b]", 1).is_err());
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'Default'"), "Default");
        assert_eq!(strip_quotes("Default"), "Default");
        assert_eq!(strip_quotes("'"), "'");
    }

    #[test]
    fn test_format_list_literal() {
        assert_eq!(format_list_literal(&["a", "b"]), "['a', 'b']");
        assert_eq!(format_list_literal::<&str>(&[]), "[]");
    }
}
