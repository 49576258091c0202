use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::quiz::{score_answers, QuizQuestion, QuizScore};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[validate(length(min = 1, message = "quiz must contain at least one question"), nested)]
    pub quiz: Vec<QuizQuestion>,
}

impl QuizResult {
    pub fn score(&self, selected: &[Option<usize>]) -> QuizScore {
        score_answers(&self.quiz, selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestQuestion {
    #[validate(length(min = 1, message = "question text must not be empty"))]
    pub question: String,
    #[validate(length(min = 1, message = "answer text must not be empty"))]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestFromBookResult {
    #[validate(length(min = 1, message = "test must contain at least one question"), nested)]
    pub test_questions: Vec<TestQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetResult {
    #[validate(length(min = 1, message = "worksheet content must not be empty"))]
    pub worksheet_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RevisionNotesResult {
    #[validate(length(min = 1, message = "revision notes must not be empty"))]
    pub revision_notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DoubtResult {
    #[validate(length(min = 1, message = "answer must not be empty"))]
    pub answer: String,
}

/// Shared by the solution-only and question-plus-solution summaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NcertSummaryResult {
    #[validate(length(min = 1, message = "summary must not be empty"))]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestPaperResult {
    #[validate(length(min = 1, message = "test paper must not be empty"))]
    pub test_paper: String,
}
