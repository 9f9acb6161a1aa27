//! The answering pipeline
//!
//! Strictly sequential: extract pages, segment questions, one provider call
//! per question with a fixed delay in between, then write the JSON result.
//! A failed call loses that one question and nothing else.

use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::api::LlmClient;
use crate::config::Config;
use crate::error::{AppError, ParseError, PdfError, Result};
use crate::extract;
use crate::models::{AnswerEntry, AnswerSheet, ExtractedQuestion, RunMetadata};

/// Per-run counters
#[derive(Debug, Default)]
pub struct RunStats {
    pub answered: usize,
    pub failed: usize,
    pub total: usize,
}

/// Run the whole pipeline for one exam PDF.
pub async fn process_test(
    pdf_path: &Path,
    output_path: &Path,
    client: &LlmClient,
    config: &Config,
) -> Result<(AnswerSheet, RunStats)> {
    // Step 1: extract pages
    info!("📄 Step 1: extracting text from {}", pdf_path.display());
    let pages = extract::extract_pages(pdf_path)?;

    if !extract::has_extractable_text(&pages) {
        return Err(AppError::Pdf(PdfError::NoExtractableText {
            path: pdf_path.display().to_string(),
        }));
    }
    info!("✓ read {} pages", pages.len());

    // Step 2: segment questions
    let questions = extract::parse_questions(&pages);
    if questions.is_empty() {
        return Err(AppError::Parse(ParseError::NoQuestionsFound));
    }
    log_questions_found(&questions);

    // Step 3: answer them, in booklet order
    info!(
        "🤖 Step 2: answering with {} (model {})",
        client.provider().name(),
        client.model()
    );
    let (answers, mut stats) = answer_all(&questions, client, config).await;
    stats.total = questions.len();

    // Step 4: write the result
    info!("💾 Step 3: saving results to {}", output_path.display());
    let sheet = AnswerSheet {
        metadata: RunMetadata {
            pdf_file: file_name(pdf_path),
            provider: client.provider().key().to_string(),
            model_used: client.model().to_string(),
            total_questions: questions.len(),
            processed_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        },
        answers,
    };
    save_answer_sheet(output_path, &sheet)?;
    info!("✓ results saved");

    Ok((sheet, stats))
}

/// Ask the provider about every question, skipping failures.
async fn answer_all(
    questions: &[ExtractedQuestion],
    client: &LlmClient,
    config: &Config,
) -> (IndexMap<String, AnswerEntry>, RunStats) {
    let total = questions.len();
    let mut answers = IndexMap::with_capacity(total);
    let mut stats = RunStats::default();

    for (idx, question) in questions.iter().enumerate() {
        info!("[{}/{}] {}", idx + 1, total, question.id);
        if config.verbose_logging {
            log_stem(&question.id, &question.text);
        }
        if question.has_images {
            warn!(
                "[{}] page {} has {} image(s) the provider will not see",
                question.id, question.page, question.image_count
            );
        }

        match client.answer_question(&question.text).await {
            Ok(answer) => {
                info!("[{}] → {}", question.id, answer);
                answers.insert(
                    question.id.clone(),
                    AnswerEntry {
                        question: question.text.clone(),
                        answer,
                    },
                );
                stats.answered += 1;
            }
            Err(e) => {
                error!("[{}] skipped: {}", question.id, e);
                stats.failed += 1;
            }
        }

        // fixed pacing between calls, nothing smarter
        if idx + 1 < total && config.request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.request_delay_ms)).await;
        }
    }

    (answers, stats)
}

/// Write the sheet as pretty JSON, creating the parent directory if needed.
pub fn save_answer_sheet(path: &Path, sheet: &AnswerSheet) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        }
    }

    let json = serde_json::to_string_pretty(sheet)?;
    fs::write(path, json).map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

// ========== Log helpers ==========

fn log_questions_found(questions: &[ExtractedQuestion]) {
    let day1 = questions.iter().filter(|q| q.day == 1).count();
    let day2 = questions.len() - day1;
    if day2 > 0 {
        info!(
            "✓ extracted {} questions (day 1: {}, day 2: {})",
            questions.len(),
            day1,
            day2
        );
    } else {
        info!("✓ extracted {} questions", questions.len());
    }
}

fn log_stem(id: &str, stem: &str) {
    let preview = if stem.chars().count() > 80 {
        stem.chars().take(80).collect::<String>() + "..."
    } else {
        stem.to_string()
    };
    info!("[{}] stem: {}", id, preview);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerEntry;

    fn sample_sheet() -> AnswerSheet {
        let mut answers = IndexMap::new();
        answers.insert(
            "day1_q001".to_string(),
            AnswerEntry {
                question: "Qual é a capital do Rio Grande do Sul?".to_string(),
                answer: "A".to_string(),
            },
        );
        AnswerSheet {
            metadata: RunMetadata {
                pdf_file: "prova.pdf".to_string(),
                provider: "gemini".to_string(),
                model_used: "gemini-2.0-flash".to_string(),
                total_questions: 1,
                processed_at: "2026-01-10 12:00:00".to_string(),
            },
            answers,
        }
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.json");

        save_answer_sheet(&path, &sample_sheet()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: AnswerSheet = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, sample_sheet());
    }

    #[test]
    fn test_saved_json_has_expected_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        save_answer_sheet(&path, &sample_sheet()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["pdf_file"], "prova.pdf");
        assert_eq!(value["metadata"]["total_questions"], 1);
        assert_eq!(value["answers"]["day1_q001"]["answer"], "A");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("a/b/prova.pdf")), "prova.pdf");
        assert_eq!(file_name(Path::new("prova.pdf")), "prova.pdf");
    }
}
