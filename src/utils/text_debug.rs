// src/utils/text_debug.rs
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use regex::Regex;
use crate::utils::error::{AppError, ExtractError};

/// Saves extracted text to an HTML file with the given byte ranges highlighted.
/// Highlights overlapping an earlier highlight are skipped.
pub fn save_debug_html(text: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str("body { font-family: monospace; white-space: pre-wrap; }\n");
    debug_html.push_str(".highlight-label { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-class { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-total { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos {
            tracing::trace!("Skipping overlapping highlight {}-{} ({})", start, end, highlight_type);
            continue;
        }

        debug_html.push_str(&html_escape::encode_text(&text[last_pos..start]));

        let css_class = match highlight_type {
            "label" => "highlight-label",
            "class" => "highlight-class",
            "total" => "highlight-total",
            _ => "highlight-custom",
        };

        debug_html.push_str(&format!("<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type));
        debug_html.push_str(&html_escape::encode_text(&text[start..end]));
        debug_html.push_str("</span>");

        last_pos = end;
    }

    if last_pos < text.len() {
        debug_html.push_str(&html_escape::encode_text(&text[last_pos..]));
    }

    debug_html.push_str("\n</body>\n</html>");

    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Creates an annotated copy of the text with every match of the given patterns highlighted
pub fn create_debug_html(text: &str, filename: &Path, patterns: &[(String, &str)]) -> Result<(), AppError> {
    let mut highlights = Vec::new();

    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            ExtractError::RegexError(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(text) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    save_debug_html(text, filename, &highlights)
}

/// Writes the normalized text of one document plus its annotated HTML twin into `debug_dir`.
pub fn dump_document_text(
    debug_dir: &Path,
    document_name: &str,
    text: &str,
    patterns: &[(String, &str)],
) -> Result<(), AppError> {
    fs::create_dir_all(debug_dir)?;

    let text_path = debug_dir.join(format!("{}_normalized.txt", document_name));
    fs::write(&text_path, text)?;
    tracing::info!("Saved normalized text to {}", text_path.display());

    let html_path = debug_dir.join(format!("{}_annotated.html", document_name));
    create_debug_html(text, &html_path, patterns)
}
