//! YAML front matter at the top of content files.

use std::path::Path;

use crate::attributes::AttributeStore;

use super::DataSourceError;

const DELIMITER: &str = "---";

/// Split a file into its front matter (without delimiters) and body.
///
/// Text that does not open with a delimiter line, or never closes it, has no
/// front matter.
pub fn split(text: &str) -> (Option<&str>, &str) {
  let Some(rest) = text.strip_prefix("---\n").or_else(|| text.strip_prefix("---\r\n")) else {
    return (None, text);
  };

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end_matches(['\r', '\n']) == DELIMITER {
      return (Some(&rest[..offset]), &rest[offset + line.len()..]);
    }
    offset += line.len();
  }

  (None, text)
}

pub fn parse(path: &Path, text: &str) -> Result<(AttributeStore, String), DataSourceError> {
  let (meta, body) = split(text);

  let attributes = match meta {
    Some(meta) if !meta.trim().is_empty() => {
      serde_yaml::from_str::<AttributeStore>(meta).map_err(|source| DataSourceError::FrontMatter {
        path: path.to_path_buf(),
        source,
      })?
    }
    _ => AttributeStore::new(),
  };

  Ok((attributes, body.to_string()))
}

/// Render attributes as front matter followed by `content`.
///
/// Without attributes the content is written bare, unless it would itself
/// split as front matter; then an empty block is emitted in front of it.
pub fn render(attributes: &AttributeStore, content: &str) -> Result<String, serde_yaml::Error> {
  if attributes.is_empty() {
    return Ok(match split(content) {
      (None, _) => content.to_string(),
      (Some(_), _) => format!("{DELIMITER}\n{DELIMITER}\n{content}"),
    });
  }

  let yaml = serde_yaml::to_string(attributes)?;
  Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{content}"))
}
