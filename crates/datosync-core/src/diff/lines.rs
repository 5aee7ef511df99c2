//! Line-level delta over canonical JSON text.

use crate::diff::model::{Chunk, ChunkTag};
use serde_json::Value;

/// Render a record as canonical JSON: sorted keys, 2-space indent.
///
/// An absent record renders as empty text.
pub fn canonical_json(record: Option<&Value>) -> String {
    match record {
        // serde_json's default map is ordered by key, so pretty output is
        // already canonical.
        Some(value) => serde_json::to_string_pretty(value).unwrap_or_default(),
        None => String::new(),
    }
}

/// Structural delta between two optional records
pub fn structural_delta(a: Option<&Value>, b: Option<&Value>) -> Vec<Chunk> {
    diff_lines(&canonical_json(a), &canonical_json(b))
}

/// Longest-common-subsequence diff of two texts, line by line.
///
/// Consecutive lines with the same tag are grouped into one chunk. Between two
/// unchanged runs all removed lines are emitted before all added lines.
pub fn diff_lines(a: &str, b: &str) -> Vec<Chunk> {
    let a: Vec<&str> = a.lines().collect();
    let b: Vec<&str> = b.lines().collect();
    let (n, m) = (a.len(), b.len());

    // lcs[i][j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut builder = ChunkBuilder::default();
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && a[i] == b[j] {
            builder.push(ChunkTag::Unchanged, a[i]);
            i += 1;
            j += 1;
        } else if j == m || (i < n && lcs[i + 1][j] >= lcs[i][j + 1]) {
            builder.push(ChunkTag::Removed, a[i]);
            i += 1;
        } else {
            builder.push(ChunkTag::Added, b[j]);
            j += 1;
        }
    }
    builder.finish()
}

#[derive(Default)]
struct ChunkBuilder {
    chunks: Vec<Chunk>,
    unchanged: Vec<String>,
    removed: Vec<String>,
    added: Vec<String>,
}

impl ChunkBuilder {
    fn push(&mut self, tag: ChunkTag, line: &str) {
        match tag {
            ChunkTag::Unchanged => {
                self.flush_changes();
                self.unchanged.push(line.to_string());
            }
            ChunkTag::Removed => {
                self.flush_unchanged();
                self.removed.push(line.to_string());
            }
            ChunkTag::Added => {
                self.flush_unchanged();
                self.added.push(line.to_string());
            }
        }
    }

    fn flush_unchanged(&mut self) {
        if !self.unchanged.is_empty() {
            let lines = std::mem::take(&mut self.unchanged);
            self.chunks.push(Chunk::new(ChunkTag::Unchanged, lines.join("\n")));
        }
    }

    fn flush_changes(&mut self) {
        if !self.removed.is_empty() {
            let lines = std::mem::take(&mut self.removed);
            self.chunks.push(Chunk::new(ChunkTag::Removed, lines.join("\n")));
        }
        if !self.added.is_empty() {
            let lines = std::mem::take(&mut self.added);
            self.chunks.push(Chunk::new(ChunkTag::Added, lines.join("\n")));
        }
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush_unchanged();
        self.flush_changes();
        self.chunks
    }
}
