//! Social Chatter Loader
//!
//! Reads the comment column out of a CSV export of social-media chatter.

use crate::core::Comment;
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::Path;

pub fn load_comments(path: &Path, column: &str) -> Result<Vec<Comment>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open chatter file {}", path.display()))?;
    read_comments(file, column).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn read_comments<R: Read>(reader: R, column: &str) -> Result<Vec<Comment>> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

    let headers = rdr.headers()?.clone();
    let idx = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| anyhow!("Column '{}' not found (have: {})", column, headers.iter().collect::<Vec<_>>().join(", ")))?;

    let mut comments = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV at row {}", row + 1))?;
        let text = record
            .get(idx)
            .ok_or_else(|| anyhow!("Row {} has no '{}' field", row + 1, column))?;
        comments.push(Comment::new(text));
    }

    tracing::info!(count = comments.len(), column, "loaded social chatter");
    Ok(comments)
}
