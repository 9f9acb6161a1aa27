pub mod provider;
pub mod question;

pub use provider::{Provider, ALL_PROVIDERS};
pub use question::{
    default_output_path, AnswerEntry, AnswerSheet, ExtractedQuestion, PageText, RunMetadata,
};
