//! Helpers for normalizing file names and extracted text.

use std::path::Path;

/// Lower-cased extension of `file_name` without the leading dot.
///
/// Only names with a stem carry an extension: `"Report.PDF"` yields `pdf`, while `"pdf"` and a
/// dot-file such as `".pdf"` yield `None`.
pub fn normalize_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name.trim()).extension()?.to_str()?;
    let lowered = extension.trim().to_ascii_lowercase();
    if lowered.is_empty() { None } else { Some(lowered) }
}

/// Clean raw extractor output.
///
/// Control characters are dropped, intra-line whitespace collapses to single spaces, runs of
/// blank lines collapse to one blank line, and the result is trimmed.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut prev_was_blank = false;
    let mut first_content = true;

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed.chars().all(|ch| ch.is_whitespace() || ch.is_control()) {
            prev_was_blank = true;
            continue;
        }

        if !first_content && prev_was_blank {
            result.push_str("\n\n");
        } else if !first_content {
            result.push('\n');
        }
        collapse_internal_whitespace(trimmed, &mut result);
        prev_was_blank = false;
        first_content = false;
    }

    result.trim().to_string()
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut pending_space = false;
    let mut wrote_any = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            pending_space = wrote_any;
        } else if !ch.is_control() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
            wrote_any = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_and_stripped() {
        assert_eq!(normalize_extension("Report.PDF").as_deref(), Some("pdf"));
        assert_eq!(normalize_extension("scans/Page.Tiff").as_deref(), Some("tiff"));
        assert_eq!(normalize_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(normalize_extension("png").as_deref(), None);
        assert_eq!(normalize_extension("noext").as_deref(), None);
        assert_eq!(normalize_extension("").as_deref(), None);
        assert_eq!(normalize_extension("trailing.").as_deref(), None);
    }

    #[test]
    fn dot_files_have_no_extension() {
        assert_eq!(normalize_extension(".pdf"), None);
        assert_eq!(normalize_extension(".PNG"), None);
        assert_eq!(normalize_extension(".hidden.pdf").as_deref(), Some("pdf"));
    }

    #[test]
    fn sanitize_collapses_whitespace_and_blank_lines() {
        let raw = "  First   line\r\n\n\n\nSecond\tline \u{0}\n\u{c}\n";
        assert_eq!(sanitize_extracted_text(raw), "First line\n\nSecond line");
    }

    #[test]
    fn sanitize_returns_empty_for_blank_input() {
        assert_eq!(sanitize_extracted_text(" \n \u{c} \n"), "");
    }
}
