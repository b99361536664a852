// src/extractors/mod.rs
pub mod pdf_text;
pub mod section;

// Re-export key extraction types for convenience
pub use pdf_text::{extract_pdf_text, normalize_text};
pub use section::{StandardRecord, StandardsExtractor};
