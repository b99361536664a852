// src/documents/mod.rs
pub mod client;
pub mod models;

pub use models::{DocumentSource, StandardKind};
