//! Applies machine-applicable fix suggestions to source files.

use crate::diagnostics::{Applicability, Diagnostic, Position};
use crate::fix::{FixError, TextEdit, apply_edits};
use std::path::Path;

/// Result of applying fixes to a source file.
#[derive(Debug)]
pub struct FixOutcome {
    /// The modified source code.
    pub fixed_source: String,
    /// Number of fixes applied.
    pub fixes_applied: usize,
    /// Fix suggestions that were skipped (not machine-applicable).
    pub fixes_skipped: usize,
}

/// Apply fix suggestions carried by diagnostics.
///
/// `MachineApplicable` suggestions are always applied; `MaybeIncorrect` and
/// `HasPlaceholders` only with `allow_unsafe`. Suggestions whose span cannot
/// be mapped back to byte offsets are skipped, not errors.
pub fn apply_suggestions(
    source: &str,
    diagnostics: &[Diagnostic],
    allow_unsafe: bool,
) -> Result<FixOutcome, FixError> {
    let mut edits: Vec<TextEdit> = Vec::new();
    let mut skipped = 0;

    for diag in diagnostics {
        let Some(suggestion) = &diag.suggestion else {
            continue;
        };

        match suggestion.applicability {
            Applicability::MachineApplicable => {}
            Applicability::MaybeIncorrect | Applicability::HasPlaceholders => {
                if !allow_unsafe {
                    skipped += 1;
                    continue;
                }
            }
            Applicability::Unspecified => {
                skipped += 1;
                continue;
            }
        }

        let (Some(start), Some(end)) = (
            position_to_byte(source, diag.span.start),
            position_to_byte(source, diag.span.end),
        ) else {
            skipped += 1;
            continue;
        };

        edits.push(TextEdit::replace(start, end, &*suggestion.replacement));
    }

    if edits.is_empty() {
        return Ok(FixOutcome {
            fixed_source: source.to_string(),
            fixes_applied: 0,
            fixes_skipped: skipped,
        });
    }

    let applied = edits.len();
    let fixed_source = apply_edits(source, &edits)?;

    Ok(FixOutcome {
        fixed_source,
        fixes_applied: applied,
        fixes_skipped: skipped,
    })
}

/// Map a 1-based row/column position to a byte offset.
///
/// Columns count bytes within the line, matching tree-sitter points.
fn position_to_byte(source: &str, pos: Position) -> Option<usize> {
    if pos.row == 0 || pos.column == 0 {
        return None;
    }

    let mut row = 1usize;
    let mut line_start = 0usize;

    for (idx, b) in source.bytes().enumerate() {
        if row == pos.row {
            let byte = line_start + (pos.column - 1);
            return (byte <= source.len()).then_some(byte);
        }
        if b == b'\n' {
            row += 1;
            line_start = idx + 1;
        }
    }

    if row == pos.row {
        let byte = line_start + (pos.column - 1);
        return (byte <= source.len()).then_some(byte);
    }

    None
}

/// Generate a unified diff between original and fixed source.
///
/// Includes three context lines around each change.
pub fn format_diff(original: &str, fixed: &str, path: &Path) -> String {
    format_diff_with_context(original, fixed, path, 3)
}

/// Generate a unified diff with configurable context lines.
pub fn format_diff_with_context(
    original: &str,
    fixed: &str,
    path: &Path,
    context: usize,
) -> String {
    use std::fmt::Write;

    let orig_lines: Vec<&str> = original.lines().collect();
    let fixed_lines: Vec<&str> = fixed.lines().collect();
    let max_len = orig_lines.len().max(fixed_lines.len());

    let mut changes: Vec<usize> = Vec::new();
    for i in 0..max_len {
        if orig_lines.get(i) != fixed_lines.get(i) {
            changes.push(i);
        }
    }

    if changes.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    let path_str = path.display().to_string();
    writeln!(output, "--- a/{}", path_str).unwrap();
    writeln!(output, "+++ b/{}", path_str).unwrap();

    // Group changed lines into hunks whose context windows touch.
    let mut hunks: Vec<(usize, usize, Vec<usize>)> = Vec::new();
    for &i in &changes {
        let start = i.saturating_sub(context);
        let end = (i + context + 1).min(max_len);

        match hunks.last_mut() {
            Some((_, hunk_end, lines)) if start <= *hunk_end => {
                *hunk_end = end;
                lines.push(i);
            }
            _ => hunks.push((start, end, vec![i])),
        }
    }

    for (hunk_start, hunk_end, changed) in hunks {
        let orig_size = hunk_end.min(orig_lines.len()).saturating_sub(hunk_start);
        let fixed_size = hunk_end.min(fixed_lines.len()).saturating_sub(hunk_start);

        writeln!(
            output,
            "@@ -{},{} +{},{} @@",
            hunk_start + 1,
            orig_size,
            hunk_start + 1,
            fixed_size
        )
        .unwrap();

        for line_idx in hunk_start..hunk_end {
            if changed.contains(&line_idx) {
                if let Some(orig) = orig_lines.get(line_idx) {
                    writeln!(output, "-{}", orig).unwrap();
                }
                if let Some(fix) = fixed_lines.get(line_idx) {
                    writeln!(output, "+{}", fix).unwrap();
                }
            } else if let Some(line) = orig_lines.get(line_idx) {
                writeln!(output, " {}", line).unwrap();
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Span, Suggestion};
    use crate::level::LintLevel;
    use crate::rules::TOO_MANY_PARAMETERS_CONSTRUCTOR;

    fn diagnostic_with(span: Span, replacement: &str, applicability: Applicability) -> Diagnostic {
        Diagnostic {
            lint: &TOO_MANY_PARAMETERS_CONSTRUCTOR,
            level: LintLevel::Warn,
            file: None,
            span,
            message: "Constructor has too many parameters.".into(),
            help: None,
            suggestion: Some(Suggestion {
                message: "rewrite".into(),
                replacement: replacement.into(),
                applicability,
            }),
        }
    }

    #[test]
    fn position_to_byte_handles_multiple_lines() {
        let source = "class A {\n\tA() {}\n}";
        assert_eq!(position_to_byte(source, Position { row: 1, column: 1 }), Some(0));
        assert_eq!(position_to_byte(source, Position { row: 2, column: 2 }), Some(11));
        assert_eq!(position_to_byte(source, Position { row: 3, column: 2 }), Some(19));
    }

    #[test]
    fn machine_applicable_suggestion_is_applied() {
        let source = "class A {\n\tA() {}\n}";
        let span = Span {
            start: Position { row: 2, column: 2 },
            end: Position { row: 2, column: 8 },
        };
        let diag = diagnostic_with(span, "A(int x) {}", Applicability::MachineApplicable);

        let outcome = apply_suggestions(source, &[diag], false).unwrap();
        assert_eq!(outcome.fixed_source, "class A {\n\tA(int x) {}\n}");
        assert_eq!(outcome.fixes_applied, 1);
        assert_eq!(outcome.fixes_skipped, 0);
    }

    #[test]
    fn maybe_incorrect_suggestion_requires_opt_in() {
        let source = "class A {\n\tA() {}\n}";
        let span = Span {
            start: Position { row: 2, column: 2 },
            end: Position { row: 2, column: 8 },
        };
        let diag = diagnostic_with(span, "A(int x) {}", Applicability::MaybeIncorrect);

        let outcome = apply_suggestions(source, &[diag.clone()], false).unwrap();
        assert_eq!(outcome.fixes_applied, 0);
        assert_eq!(outcome.fixes_skipped, 1);
        assert_eq!(outcome.fixed_source, source);

        let outcome = apply_suggestions(source, &[diag], true).unwrap();
        assert_eq!(outcome.fixes_applied, 1);
    }

    #[test]
    fn diff_shows_removed_and_added_lines() {
        let original = "class A {\n\tpublic A(int a) {}\n}";
        let fixed = "class A {\n\tprivate A(Builder builder) {}\n}";
        let diff = format_diff(original, fixed, Path::new("A.java"));

        assert!(diff.contains("--- a/A.java"));
        assert!(diff.contains("+++ b/A.java"));
        assert!(diff.contains("-\tpublic A(int a) {}"));
        assert!(diff.contains("+\tprivate A(Builder builder) {}"));
    }

    #[test]
    fn identical_sources_produce_an_empty_diff() {
        let source = "class A {}";
        assert!(format_diff(source, source, Path::new("A.java")).is_empty());
    }
}
