//! Essay drafting rules and prompt construction.
//!
//! The API layer forwards the prompts built here to an LLM; nothing in this
//! module performs I/O, so the exact prompt text is unit-testable.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Vocabularies and bounds
// ---------------------------------------------------------------------------

pub const ESSAY_TYPES: &[&str] = &[
    "personal_statement",
    "motivation_letter",
    "scholarship_essay",
    "research_proposal",
    "cover_letter",
    "diversity_statement",
];

pub const DEFAULT_ESSAY_TYPE: &str = "scholarship_essay";

pub const TONES: &[&str] = &["formal", "conversational", "persuasive", "reflective"];

pub const DEFAULT_TONE: &str = "formal";

pub const DEFAULT_WORD_COUNT: i32 = 500;
pub const MIN_WORD_COUNT: i32 = 100;
pub const MAX_WORD_COUNT: i32 = 2_000;

/// Maximum length of the user prompt (characters).
pub const MAX_PROMPT_LENGTH: usize = 4_000;

/// Maximum number of key points the user may list.
pub const MAX_KEY_POINTS: usize = 10;

/// Upper bound on completion tokens requested from the model.
pub const MAX_COMPLETION_TOKENS: u32 = 4_096;

/// Maximum length of a saved essay body (characters).
pub const MAX_CONTENT_LENGTH: usize = 50_000;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Scholarship details the essay should be tailored to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScholarshipContext {
    pub title: String,
    pub university: Option<String>,
    pub country: Option<String>,
}

/// Body of `POST /api/v1/essays/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct EssayRequest {
    /// The essay question or instructions, as written by the provider.
    pub prompt: String,
    #[serde(default = "default_essay_type")]
    pub essay_type: String,
    pub tone: Option<String>,
    pub word_count: Option<i32>,
    /// Free-form description of the applicant's background.
    pub background: Option<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    pub scholarship: Option<ScholarshipContext>,
}

fn default_essay_type() -> String {
    DEFAULT_ESSAY_TYPE.to_string()
}

/// Customization options persisted alongside a saved essay (`options` JSONB).
///
/// Missing fields take the same defaults as [`EssayRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EssayOptions {
    pub tone: String,
    pub word_count: i32,
    pub key_points: Vec<String>,
}

impl Default for EssayOptions {
    fn default() -> Self {
        Self {
            tone: DEFAULT_TONE.to_string(),
            word_count: DEFAULT_WORD_COUNT,
            key_points: Vec::new(),
        }
    }
}

impl EssayOptions {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_tone(&self.tone)?;
        validate_word_count(self.word_count)?;
        validate_key_points(&self.key_points)
    }
}

impl EssayRequest {
    /// Effective target word count.
    pub fn target_words(&self) -> i32 {
        self.word_count.unwrap_or(DEFAULT_WORD_COUNT)
    }

    /// Effective tone.
    pub fn tone(&self) -> &str {
        self.tone
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TONE)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(CoreError::Validation("Essay prompt is required".into()));
        }
        if prompt.chars().count() > MAX_PROMPT_LENGTH {
            return Err(CoreError::Validation(format!(
                "Essay prompt must be at most {MAX_PROMPT_LENGTH} characters"
            )));
        }
        validate_essay_type(&self.essay_type)?;
        validate_tone(self.tone())?;
        validate_word_count(self.target_words())?;
        validate_key_points(&self.key_points)
    }
}

pub fn validate_essay_type(essay_type: &str) -> Result<(), CoreError> {
    if ESSAY_TYPES.contains(&essay_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid essay type '{essay_type}'. Must be one of: {ESSAY_TYPES:?}"
        )))
    }
}

pub fn validate_tone(tone: &str) -> Result<(), CoreError> {
    if TONES.contains(&tone) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid tone '{tone}'. Must be one of: {TONES:?}"
        )))
    }
}

pub fn validate_word_count(words: i32) -> Result<(), CoreError> {
    if (MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&words) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Word count must be between {MIN_WORD_COUNT} and {MAX_WORD_COUNT} (got {words})"
        )))
    }
}

pub fn validate_key_points(key_points: &[String]) -> Result<(), CoreError> {
    if key_points.len() > MAX_KEY_POINTS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_KEY_POINTS} key points are allowed"
        )));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Essay content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// Human-readable label for an essay type (`"motivation_letter"` -> `"motivation letter"`).
pub fn essay_type_label(essay_type: &str) -> String {
    essay_type.replace('_', " ")
}

/// System prompt shared by every essay request.
pub fn build_system_prompt() -> String {
    "You are an experienced admissions consultant who helps students write \
     scholarship application essays. Write in the first person as the applicant. \
     Be specific and sincere, avoid cliches, and never invent awards, grades or \
     experiences that the applicant did not mention. Return only the essay text \
     without a title or commentary."
        .to_string()
}

/// User prompt carrying the essay brief.
pub fn build_user_prompt(request: &EssayRequest) -> String {
    let mut out = format!(
        "Write a {label} of about {words} words in a {tone} tone.\n\n\
         Essay prompt:\n{prompt}\n",
        label = essay_type_label(&request.essay_type),
        words = request.target_words(),
        tone = request.tone(),
        prompt = request.prompt.trim(),
    );

    if let Some(ctx) = &request.scholarship {
        out.push_str(&format!("\nScholarship: {}", ctx.title.trim()));
        if let Some(university) = ctx.university.as_deref().filter(|u| !u.trim().is_empty()) {
            out.push_str(&format!(" at {}", university.trim()));
        }
        if let Some(country) = ctx.country.as_deref().filter(|c| !c.trim().is_empty()) {
            out.push_str(&format!(" ({})", country.trim()));
        }
        out.push('\n');
    }

    if let Some(background) = request.background.as_deref().filter(|b| !b.trim().is_empty()) {
        out.push_str(&format!("\nApplicant background:\n{}\n", background.trim()));
    }

    let points: Vec<&str> = request
        .key_points
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if !points.is_empty() {
        out.push_str("\nKey points to include:\n");
        for point in points {
            out.push_str(&format!("- {point}\n"));
        }
    }

    out
}

/// Completion token budget for a target word count (about two tokens per word).
pub fn max_tokens_for(word_count: i32) -> u32 {
    (word_count.max(0) as u32)
        .saturating_mul(2)
        .min(MAX_COMPLETION_TOKENS)
}

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> i32 {
    text.split_whitespace().count() as i32
}
