//! Pure text-edit application.
//!
//! Everything here works on strings and byte offsets; no file I/O. Edits are
//! validated to be non-overlapping and are applied in reverse order so earlier
//! offsets stay valid while later edits land.

use thiserror::Error;

/// Error type for edit application.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("overlapping edits detected at byte {0}")]
    OverlappingEdits(usize),

    #[error("edit range [{start}..{end}) exceeds source length {source_len}")]
    OutOfBounds {
        start: usize,
        end: usize,
        source_len: usize,
    },

    #[error("edit start {start} is after edit end {end}")]
    InvertedRange { start: usize, end: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A replacement of the byte range `[start_byte..end_byte)` with new text.
///
/// Byte offsets (not characters) match tree-sitter's byte-based API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start_byte: usize,
    pub end_byte: usize,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
        }
    }

    /// Returns true if this edit's range intersects another's.
    pub fn overlaps_with(&self, other: &TextEdit) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }

    pub fn validate(&self, source_len: usize) -> Result<(), FixError> {
        if self.start_byte > self.end_byte {
            return Err(FixError::InvertedRange {
                start: self.start_byte,
                end: self.end_byte,
            });
        }

        if self.end_byte > source_len {
            return Err(FixError::OutOfBounds {
                start: self.start_byte,
                end: self.end_byte,
                source_len,
            });
        }

        Ok(())
    }
}

/// Validate that a list of edits are in bounds and non-overlapping.
pub fn validate_edits(edits: &[TextEdit], source_len: usize) -> Result<(), FixError> {
    for edit in edits {
        edit.validate(source_len)?;
    }

    for i in 0..edits.len() {
        for j in (i + 1)..edits.len() {
            if edits[i].overlaps_with(&edits[j]) {
                return Err(FixError::OverlappingEdits(edits[i].start_byte));
            }
        }
    }

    Ok(())
}

/// Apply a list of non-overlapping edits to source code.
///
/// Input order does not matter; edits are applied from the end of the source
/// toward the start.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, FixError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    validate_edits(edits, source.len())?;

    let mut sorted = edits.to_vec();
    sorted.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

    let mut result = source.to_string();
    for edit in sorted {
        result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
    }

    Ok(result)
}
