//! Question segmentation
//!
//! Cuts extracted page text into numbered question blocks. UFRGS booklets
//! number questions `01.` through `150.` and restart the numbering on the
//! second exam day, so segmentation tracks the current day and emits
//! `day{d}_q{nnn}` ids.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{ExtractedQuestion, PageText};

/// Question start: booklet number (2-3 digits, zero-padded) followed by a dot
static QUESTION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2,3})\.\s+").expect("hard-coded pattern"));

/// Second-day banner, tolerant of the ordinal variants extraction produces
static DAY_TWO_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)2.?\s*[DºªOo]\s*DIA").expect("hard-coded pattern"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("hard-coded pattern"));

static PAGE_FOOTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Página\s+\d+").expect("hard-coded pattern"));

static EXAM_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"UFRGS\s+\d{4}").expect("hard-coded pattern"));

/// Booklet numbers outside this range are page artifacts, not questions
const QUESTION_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=150;

/// Anything this short is a header fragment, not a question
const MIN_QUESTION_CHARS: usize = 15;

/// A drop this large in the number sequence means the booklet restarted
/// numbering for day 2 (covers PDFs whose day banner is lost in extraction)
const DAY_RESTART_DROP: u32 = 10;

/// Segment extracted pages into questions.
///
/// Duplicate ids (the same number seen twice on one day) keep their first
/// position and take the later text, matching how repeated page artifacts
/// behave in the source booklets.
pub fn parse_questions(pages: &[PageText]) -> Vec<ExtractedQuestion> {
    let mut questions: IndexMap<String, ExtractedQuestion> = IndexMap::new();
    let mut current_day: u8 = 1;
    let mut last_number: u32 = 0;

    for page in pages {
        if current_day == 1 && DAY_TWO_MARKER.is_match(&page.text) {
            current_day = 2;
            last_number = 0;
            debug!("day 2 banner found on page {}", page.page_num);
        }

        for (number, body) in split_question_blocks(&page.text) {
            if !QUESTION_NUMBER_RANGE.contains(&number) {
                continue;
            }

            let text = clean_question_text(body);
            if text.chars().count() <= MIN_QUESTION_CHARS {
                continue;
            }

            if current_day == 1 && number + DAY_RESTART_DROP < last_number {
                current_day = 2;
                debug!(
                    "numbering restarted at {} on page {}, switching to day 2",
                    number, page.page_num
                );
            }
            last_number = number;

            let question = ExtractedQuestion {
                id: question_id(current_day, number),
                number,
                day: current_day,
                page: page.page_num,
                text,
                has_images: page.has_images,
                image_count: page.image_count,
            };
            questions.insert(question.id.clone(), question);
        }
    }

    let day1 = questions.values().filter(|q| q.day == 1).count();
    debug!(
        "extracted {} questions (day 1: {}, day 2: {})",
        questions.len(),
        day1,
        questions.len() - day1
    );

    questions.into_values().collect()
}

/// Cut one page's text into `(number, raw body)` blocks.
///
/// Each body runs from its number up to the next question start on the page,
/// or the end of the page.
fn split_question_blocks(text: &str) -> Vec<(u32, &str)> {
    let starts: Vec<(usize, usize, u32)> = QUESTION_START
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let number = cap.get(1)?.as_str().parse::<u32>().ok()?;
            Some((whole.start(), whole.end(), number))
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start, number))| {
            let body_end = starts
                .get(i + 1)
                .map(|&(next_start, _, _)| next_start)
                .unwrap_or(text.len());
            (number, &text[body_start..body_end])
        })
        .collect()
}

/// Collapse whitespace and strip the per-page furniture (`Página n` footers,
/// `UFRGS <year>` headers).
pub fn clean_question_text(text: &str) -> String {
    let text = WHITESPACE_RUN.replace_all(text, " ");
    let text = PAGE_FOOTER.replace_all(&text, "");
    let text = EXAM_HEADER.replace_all(&text, "");
    text.trim().to_string()
}

fn question_id(day: u8, number: u32) -> String {
    format!("day{}_q{:03}", day, number)
}
