// src/extractors/pdf_text.rs
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// Unicode-aware `\s` also covers U+00A0.
static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RUN_RE")
});

/// Extracts the plain text of every page, in page order, concatenated without separators.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractError::Pdf(format!("failed to extract text from PDF: {}", e)))?;

    tracing::debug!("Extracted text from {} pages", pages.len());
    Ok(pages.concat())
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn normalize_text(text: &str) -> String {
    WHITESPACE_RUN_RE
        .replace_all(text, " ")
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}
