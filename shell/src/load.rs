use anyhow::{anyhow, bail, Context, Result};
use lending_core::{LendingLibrary, Request};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Outcome of loading one or more catalog files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub added: usize,
    pub rejected: usize,
}

/// Read book records from a `.json` file (an array of objects, or one object)
/// or a `.jsonl` file (one object per non-blank line).
pub fn read_books(path: &Path) -> Result<Vec<Request>> {
    let text = fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))?;
    let values: Vec<Value> = if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str::<Value>(line)
                    .with_context(|| format!("unable to parse JSON from {} line {}", path.display(), n + 1))
            })
            .collect::<Result<_>>()?
    } else {
        match serde_json::from_str::<Value>(&text).with_context(|| format!("unable to parse JSON from {}", path.display()))? {
            Value::Array(arr) => arr,
            obj @ Value::Object(_) => vec![obj],
            _ => bail!("{}: expected an array of book objects", path.display()),
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Object(map) => Ok(map),
            _ => Err(anyhow!("{}: record {} is not an object", path.display(), i)),
        })
        .collect()
}

/// Add every record of every file to `library`. Rejected records are logged
/// and skipped, or abort the load when `strict`.
pub fn load_catalog<P: AsRef<Path>>(library: &mut LendingLibrary, paths: &[P], strict: bool) -> Result<LoadSummary> {
    let mut summary = LoadSummary::default();
    for path in paths {
        let path = path.as_ref();
        let books = read_books(path)?;
        for (i, book) in books.iter().enumerate() {
            match library.add_book(book) {
                Ok(_) => summary.added += 1,
                Err(err) if strict => bail!("{}: record {}: {}", path.display(), i, err),
                Err(err) => {
                    tracing::warn!(file = %path.display(), record = i, code = %err.code, "skipping book: {}", err.message);
                    summary.rejected += 1;
                }
            }
        }
    }
    tracing::info!(added = summary.added, rejected = summary.rejected, books = library.len(), "catalog loaded");
    Ok(summary)
}
