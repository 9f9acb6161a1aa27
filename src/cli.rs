use clap::Parser;
use std::path::PathBuf;

/// Command-line interface
///
/// The tool never prompts: everything comes in as arguments, API keys fall
/// back to the provider's environment variable.
#[derive(Parser, Debug)]
#[command(name = "vestibular-llm", version, about = "Answers UFRGS vestibular exam PDFs through remote LLM providers")]
pub struct Cli {
    /// Path to the exam PDF
    #[arg(required_unless_present = "list_providers")]
    pub pdf_file: Option<PathBuf>,

    /// Output JSON path (default: {pdf}_answers_{provider}.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// LLM provider: openai, gemini, groq, anthropic or ollama
    #[arg(short, long, default_value = "gemini")]
    pub provider: String,

    /// Model to use (default: the provider's recommended model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key (default: the provider's environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Print the provider table and exit
    #[arg(long)]
    pub list_providers: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_path_is_required() {
        assert!(Cli::try_parse_from(["vestibular-llm"]).is_err());
        assert!(Cli::try_parse_from(["vestibular-llm", "prova.pdf"]).is_ok());
        assert!(Cli::try_parse_from(["vestibular-llm", "--list-providers"]).is_ok());
    }

    #[test]
    fn test_provider_defaults_to_gemini() {
        let cli = Cli::try_parse_from(["vestibular-llm", "prova.pdf"]).unwrap();
        assert_eq!(cli.provider, "gemini");
        assert!(cli.model.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_all_flags_parse() {
        let cli = Cli::try_parse_from([
            "vestibular-llm",
            "prova.pdf",
            "--output",
            "out/answers.json",
            "--provider",
            "groq",
            "--model",
            "mixtral-8x7b-32768",
            "--api-key",
            "gsk_test",
        ])
        .unwrap();

        assert_eq!(cli.pdf_file, Some(PathBuf::from("prova.pdf")));
        assert_eq!(cli.output, Some(PathBuf::from("out/answers.json")));
        assert_eq!(cli.provider, "groq");
        assert_eq!(cli.model.as_deref(), Some("mixtral-8x7b-32768"));
        assert_eq!(cli.api_key.as_deref(), Some("gsk_test"));
    }
}
