pub mod pdf;
pub mod questions;

pub use pdf::{extract_pages, has_extractable_text};
pub use questions::parse_questions;
