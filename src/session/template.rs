//! Master session templates with `{name}` placeholders.
//!
//! Substitution is a single left-to-right pass: `{name}` is replaced by its
//! value verbatim, `{{` and `}}` produce literal braces, and inserted values
//! are never rescanned.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Template file is empty: {0}")]
    Empty(PathBuf),

    #[error("Unknown placeholder '{{{name}}}' in template")]
    UnknownPlaceholder { name: String },

    #[error("Format spec or conversion in placeholder '{{{field}}}' is not supported")]
    UnsupportedField { field: String },

    #[error("Unmatched '{brace}' at byte {offset} in template")]
    UnmatchedBrace { brace: char, offset: usize },
}

/// A loaded master template
#[derive(Debug, Clone)]
pub struct MasterTemplate {
    pub path: PathBuf,
    text: String,
}

impl MasterTemplate {
    /// Read a template, requiring it to exist and be non-empty
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::NotFound`, `TemplateError::Read`, or
    /// `TemplateError::Empty`.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        if !path.exists() {
            return Err(TemplateError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if text.is_empty() {
            return Err(TemplateError::Empty(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Build a template from in-memory text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: PathBuf::new(),
            text: text.into(),
        }
    }

    /// Substitute placeholders. Values not referenced by the template are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the template references a name not in `values`,
    /// uses a format spec, or has an unmatched brace.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, TemplateError> {
        render(&self.text, values)
    }
}

fn render(text: &str, values: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(text.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = text;
    let mut offset = 0;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let brace = rest.as_bytes()[pos];
        let after = &rest[pos + 1..];

        if brace == b'}' {
            if !after.starts_with('}') {
                return Err(TemplateError::UnmatchedBrace {
                    brace: '}',
                    offset: offset + pos,
                });
            }
            out.push('}');
            rest = &after[1..];
            offset += pos + 2;
            continue;
        }

        if after.starts_with('{') {
            out.push('{');
            rest = &after[1..];
            offset += pos + 2;
            continue;
        }

        let Some(end) = after.find('}') else {
            return Err(TemplateError::UnmatchedBrace {
                brace: '{',
                offset: offset + pos,
            });
        };
        let field = &after[..end];
        if field.contains(['{', ':', '!']) {
            return Err(TemplateError::UnsupportedField {
                field: field.to_string(),
            });
        }
        let value = values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
            .ok_or_else(|| TemplateError::UnknownPlaceholder {
                name: field.to_string(),
            })?;
        out.push_str(value);

        rest = &after[end + 1..];
        offset += pos + end + 2;
    }
    out.push_str(rest);

    Ok(out)
}
