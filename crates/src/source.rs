use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// One list item as read from disk: a JSON value, or a plain line of text
/// stored as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry(pub Value);

impl Entry {
    pub fn text(s: impl Into<String>) -> Self {
        Entry(Value::String(s.into()))
    }

    /// Text of an object field, if this entry is an object carrying it.
    pub fn field(&self, name: &str) -> Option<String> {
        self.0.get(name).map(value_text)
    }
}

// strings print bare; everything else as compact JSON
fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&value_text(&self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Lines,
}

impl Format {
    pub fn detect(path: &Path, contents: &str) -> Self {
        let is_json_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json_ext || contents.trim_start().starts_with('[') {
            Format::Json
        } else {
            Format::Lines
        }
    }
}

#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    pub format: Format,
    pub items: Vec<Entry>,
}

pub fn parse(path: &Path, contents: &str, format: Format) -> Result<Vec<Entry>> {
    match format {
        Format::Lines => Ok(contents
            .lines()
            .map(|l| l.trim_end())
            .filter(|l| !l.trim().is_empty())
            .map(Entry::text)
            .collect()),
        Format::Json => {
            let v: Value = serde_json::from_str(contents)
                .map_err(|e| Error::items(path, e.to_string()))?;
            match v {
                Value::Array(arr) => Ok(arr.into_iter().map(Entry).collect()),
                Value::Null => Ok(Vec::new()),
                _ => Err(Error::items(path, "expected a JSON array")),
            }
        }
    }
}

pub fn load(path: &Path) -> Result<Source> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let format = Format::detect(path, &contents);
    let items = parse(path, &contents, format)?;
    Ok(Source {
        path: path.to_path_buf(),
        format,
        items,
    })
}

pub fn render(items: &[Entry], format: Format) -> String {
    match format {
        Format::Lines => items.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"),
        Format::Json => {
            let arr = Value::Array(items.iter().map(|e| e.0.clone()).collect());
            serde_json::to_string_pretty(&arr).unwrap_or_else(|_| arr.to_string())
        }
    }
}

pub fn save(source: &Source, items: &[Entry]) -> Result<()> {
    let mut out = render(items, source.format);
    out.push('\n');
    std::fs::write(&source.path, out).map_err(|e| Error::io(&source.path, e))
}
