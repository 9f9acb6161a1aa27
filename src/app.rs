use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::api::LlmClient;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{AppError, FileError};
use crate::models::{default_output_path, Provider, ALL_PROVIDERS};
use crate::processing::{self, RunStats};

/// Application entry object
pub struct App {
    cli: Cli,
    config: Config,
}

impl App {
    pub fn initialize(cli: Cli, config: Config) -> Self {
        Self { cli, config }
    }

    /// Run the requested action.
    pub async fn run(&self) -> Result<()> {
        if self.cli.list_providers {
            print_provider_info();
            return Ok(());
        }

        let pdf_path = self
            .cli
            .pdf_file
            .as_deref()
            .context("no PDF file given (see --help)")?;
        if !pdf_path.is_file() {
            return Err(AppError::File(FileError::NotFound {
                path: pdf_path.display().to_string(),
            })
            .into());
        }

        let provider = Provider::find(&self.cli.provider)
            .ok_or_else(|| AppError::unknown_provider(&self.cli.provider))?;
        let model = self
            .cli
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());
        let api_key = resolve_api_key(self.cli.api_key.as_deref(), provider);
        let output_path = self
            .cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(pdf_path, provider));

        log_startup(provider, &model, pdf_path, &output_path);

        let client = LlmClient::new(provider, model, api_key, &self.config)?;
        let (_sheet, stats) =
            processing::process_test(pdf_path, &output_path, &client, &self.config).await?;

        print_final_stats(&stats, &output_path);

        Ok(())
    }
}

/// Explicit key first, then the provider's environment variable.
fn resolve_api_key(explicit: Option<&str>, provider: Provider) -> Option<String> {
    if let Some(key) = explicit {
        if !key.trim().is_empty() {
            return Some(key.to_string());
        }
    }

    provider
        .env_key()
        .and_then(|var| std::env::var(var).ok())
        .filter(|key| !key.trim().is_empty())
}

/// Provider table behind `--list-providers` (plain stdout, not a log line).
fn print_provider_info() {
    println!("{}", "=".repeat(70));
    println!("Available LLM Providers:");
    println!("{}", "=".repeat(70));

    for (idx, provider) in ALL_PROVIDERS.iter().enumerate() {
        let badge = if provider.is_free() {
            "🆓 FREE!"
        } else {
            "💰 Paid"
        };
        println!("\n{}. {} {}", idx + 1, provider.name(), badge);
        println!("   Models: {}", provider.models().join(", "));
        println!("   {}", provider.notes());
        if let Some(url) = provider.api_key_url() {
            println!("   Get API key: {}", url);
        }
        if let Some(var) = provider.env_key() {
            println!("   Key variable: {}", var);
        }
    }

    println!("\n{}", "=".repeat(70));
}

// ========== Log helpers ==========

fn log_startup(provider: Provider, model: &str, pdf_path: &Path, output_path: &Path) {
    info!("{}", "=".repeat(60));
    info!("🎓 UFRGS vestibular processor");
    info!("📋 provider: {} (model {})", provider.name(), model);
    info!("📄 input: {}", pdf_path.display());
    info!("💾 output: {}", output_path.display());
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &RunStats, output_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📊 run complete - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ answered: {}/{}", stats.answered, stats.total);
    if stats.failed > 0 {
        info!("❌ failed: {}", stats.failed);
    }
    info!("{}", "=".repeat(60));
    info!("results saved to {}", output_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_prefers_explicit() {
        assert_eq!(
            resolve_api_key(Some("sk-test"), Provider::Gemini).as_deref(),
            Some("sk-test")
        );
    }

    #[test]
    fn test_blank_explicit_key_is_ignored() {
        // Ollama has no env variable, so a blank explicit key leaves nothing
        assert_eq!(resolve_api_key(Some("   "), Provider::Ollama), None);
        assert_eq!(resolve_api_key(None, Provider::Ollama), None);
    }
}
