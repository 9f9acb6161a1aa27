//! Provider API clients
//!
//! One [`LlmClient`] per run; the provider decides which wire format the
//! question travels over.

pub mod llm;

pub use llm::LlmClient;
