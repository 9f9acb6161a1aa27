use std::path::PathBuf;

use vestibular_llm::extract;
use vestibular_llm::processing;
use vestibular_llm::{logger, Config, LlmClient, Provider};

fn test_pdf_path() -> PathBuf {
    // Point this at a real exam booklet before running the ignored tests
    PathBuf::from(
        std::env::var("VESTIBULAR_TEST_PDF").expect("set VESTIBULAR_TEST_PDF to an exam PDF path"),
    )
}

#[test]
#[ignore] // needs a real PDF, run with: cargo test -- --ignored
fn test_extract_questions_from_real_exam() {
    logger::init();

    let pages = extract::extract_pages(&test_pdf_path()).expect("failed to read PDF");
    assert!(extract::has_extractable_text(&pages), "PDF has no text");

    let questions = extract::parse_questions(&pages);
    println!("extracted {} questions from {} pages", questions.len(), pages.len());
    assert!(!questions.is_empty(), "no questions found");

    for question in &questions {
        assert!(!question.id.is_empty());
        assert!(question.text.chars().count() > 15);
    }
}

#[tokio::test]
#[ignore] // needs a real PDF, network access and GEMINI_API_KEY
async fn test_process_real_exam_with_gemini() {
    logger::init();

    let config = Config::from_env();
    let api_key = std::env::var("GEMINI_API_KEY").expect("set GEMINI_API_KEY");
    let client = LlmClient::new(
        Provider::Gemini,
        Provider::Gemini.default_model(),
        Some(api_key),
        &config,
    )
    .expect("failed to build client");

    let out_dir = tempfile::tempdir().expect("no temp dir");
    let output_path = out_dir.path().join("answers.json");

    let (sheet, stats) = processing::process_test(&test_pdf_path(), &output_path, &client, &config)
        .await
        .expect("processing failed");

    assert!(output_path.is_file(), "output file missing");
    assert_eq!(sheet.metadata.total_questions, stats.total);
    assert_eq!(sheet.answers.len() + stats.failed, stats.total);
    for (id, entry) in &sheet.answers {
        assert!(!entry.question.is_empty(), "{} has an empty question", id);
        assert!(!entry.answer.is_empty(), "{} has an empty answer", id);
    }
}

#[tokio::test]
#[ignore] // needs a real PDF and a local Ollama server
async fn test_process_real_exam_with_ollama() {
    logger::init();

    let config = Config::from_env();
    let client = LlmClient::new(
        Provider::Ollama,
        Provider::Ollama.default_model(),
        None,
        &config,
    )
    .expect("failed to build client");

    let out_dir = tempfile::tempdir().expect("no temp dir");
    let output_path = out_dir.path().join("answers.json");

    let (sheet, _stats) = processing::process_test(&test_pdf_path(), &output_path, &client, &config)
        .await
        .expect("processing failed");

    println!("answered {} questions", sheet.answers.len());
}
