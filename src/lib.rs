//! # vestibular_llm
//!
//! Answers UFRGS vestibular exam PDFs through remote LLM providers.
//!
//! ## Pipeline
//!
//! The run is a straight line, one stage feeding the next:
//!
//! 1. `extract::pdf` — per-page text and image counts, via `pdf_oxide`
//! 2. `extract::questions` — regex segmentation into numbered question
//!    blocks, with 2-day renumbering (`day{d}_q{nnn}` ids)
//! 3. `api::LlmClient` — one provider call per question, strictly
//!    sequential, fixed delay in between
//! 4. `processing` — collects answers (skipping failed questions) and
//!    writes the `metadata` + `answers` JSON document
//!
//! ## Module structure
//!
//! - `api/` — provider wire formats (OpenAI, Gemini, Groq, Anthropic, Ollama)
//! - `extract/` — PDF reading and question segmentation
//! - `models/` — provider enum and the data model of a run
//! - `processing` — the sequential pipeline itself
//! - `app` / `cli` / `config` / `logger` — program shell

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logger;
pub mod models;
pub mod processing;

// Re-export the common types
pub use api::LlmClient;
pub use app::App;
pub use cli::Cli;
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{AnswerEntry, AnswerSheet, ExtractedQuestion, PageText, Provider, RunMetadata};
