use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::provider::Provider;

/// Text and image metadata of a single PDF page
#[derive(Debug, Clone, Default)]
pub struct PageText {
    /// 1-based page number
    pub page_num: usize,
    pub text: String,
    pub has_images: bool,
    pub image_count: usize,
}

/// One question cut out of the exam text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedQuestion {
    /// Unique id, `day{d}_q{nnn}`
    pub id: String,
    /// Number printed in the booklet (repeats across days)
    pub number: u32,
    /// Exam day the question belongs to (1 or 2)
    pub day: u8,
    /// Page the question starts on
    pub page: usize,
    /// Cleaned question text, alternatives included
    pub text: String,
    pub has_images: bool,
    pub image_count: usize,
}

/// One answered question in the output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub question: String,
    pub answer: String,
}

/// Run metadata written alongside the answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub pdf_file: String,
    pub provider: String,
    pub model_used: String,
    pub total_questions: usize,
    pub processed_at: String,
}

/// The output document: metadata plus answers in question order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub metadata: RunMetadata,
    pub answers: IndexMap<String, AnswerEntry>,
}

/// Output path used when the operator gives none:
/// `{pdf basename}_answers_{provider}.json` in the working directory.
pub fn default_output_path(pdf_path: &Path, provider: Provider) -> PathBuf {
    let base = pdf_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    PathBuf::from(format!("{}_answers_{}.json", base, provider.key()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_entries(ids: &[&str]) -> AnswerSheet {
        let mut answers = IndexMap::new();
        for id in ids {
            answers.insert(
                id.to_string(),
                AnswerEntry {
                    question: format!("question text for {}", id),
                    answer: "A".to_string(),
                },
            );
        }
        AnswerSheet {
            metadata: RunMetadata {
                pdf_file: "prova.pdf".to_string(),
                provider: "gemini".to_string(),
                model_used: "gemini-2.0-flash".to_string(),
                total_questions: ids.len(),
                processed_at: "2026-01-10 12:00:00".to_string(),
            },
            answers,
        }
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("downloads/prova_2024.pdf"), Provider::Gemini);
        assert_eq!(path, PathBuf::from("prova_2024_answers_gemini.json"));

        let path = default_output_path(Path::new("CV2023.pdf"), Provider::Ollama);
        assert_eq!(path, PathBuf::from("CV2023_answers_ollama.json"));
    }

    #[test]
    fn test_answers_serialize_in_insertion_order() {
        let sheet = sheet_with_entries(&["day1_q001", "day1_q002", "day2_q001"]);
        let json = serde_json::to_string_pretty(&sheet).unwrap();

        let p1 = json.find("day1_q001").unwrap();
        let p2 = json.find("day1_q002").unwrap();
        let p3 = json.find("day2_q001").unwrap();
        assert!(p1 < p2 && p2 < p3, "answers must keep question order");
    }

    #[test]
    fn test_sheet_round_trips_through_json() {
        let sheet = sheet_with_entries(&["day1_q010"]);
        let json = serde_json::to_string(&sheet).unwrap();
        let parsed: AnswerSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sheet);
    }

    #[test]
    fn test_entries_are_non_empty() {
        let sheet = sheet_with_entries(&["day1_q001", "day1_q002"]);
        for (id, entry) in &sheet.answers {
            assert!(!id.is_empty());
            assert!(!entry.question.is_empty());
            assert!(!entry.answer.is_empty());
        }
    }
}
