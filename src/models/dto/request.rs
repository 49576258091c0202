use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::encoded_image::{validate_encoded_image, validate_encoded_images};
use crate::models::dto::response::QuizResult;

fn default_quiz_question_count() -> u32 {
    5
}

fn default_book_question_count() -> u32 {
    10
}

fn default_total_marks() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    #[validate(length(min = 3, message = "Topic must be at least 3 characters long."))]
    pub topic: String,

    #[serde(default = "default_quiz_question_count")]
    #[validate(range(
        min = 1,
        max = 10,
        message = "Must have at least 1 question and no more than 10."
    ))]
    pub number_of_questions: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestFromBookRequest {
    #[validate(length(min = 1, message = "Please select a book."))]
    pub book_name: String,

    #[validate(length(min = 1, message = "Chapter name is required."))]
    pub chapter_name: String,

    #[serde(default = "default_book_question_count")]
    #[validate(range(
        min = 1,
        max = 50,
        message = "Must have at least 1 question and no more than 50."
    ))]
    pub number_of_questions: u32,

    #[serde(default, alias = "difficulty")]
    pub difficulty_level: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetRequest {
    #[validate(length(min = 3, message = "Topic must be at least 3 characters long."))]
    pub topic: String,

    #[validate(length(min = 1, message = "Please select a grade level."))]
    pub grade_level: String,

    #[validate(range(
        min = 1,
        max = 20,
        message = "Must have at least 1 question and no more than 20."
    ))]
    pub number_of_questions: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Document,
    Ocr,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RevisionNotesRequest {
    #[serde(default)]
    pub source_type: SourceType,

    #[validate(length(min = 100, message = "Content must be at least 100 characters long."))]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DoubtRequest {
    #[validate(length(min = 10, message = "Question must be at least 10 characters long."))]
    pub question: String,

    /// `data:<mimetype>;base64,<encoded_data>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_encoded_image"))]
    pub photo_data_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NcertSolutionSummaryRequest {
    #[validate(length(min = 50, message = "Solution text must be at least 50 characters long."))]
    pub solution_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NcertQuestionSummaryRequest {
    #[validate(length(min = 1, message = "Question text is required."))]
    pub question_text: String,

    #[validate(length(min = 1, message = "Solution text is required."))]
    pub solution_text: String,
}

/// English plus the languages of the Eighth Schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Language {
    #[default]
    English,
    Assamese,
    Bengali,
    Bodo,
    Dogri,
    Gujarati,
    Hindi,
    Kannada,
    Kashmiri,
    Konkani,
    Maithili,
    Malayalam,
    Manipuri,
    Marathi,
    Nepali,
    Odia,
    Punjabi,
    Sanskrit,
    Santali,
    Sindhi,
    Tamil,
    Telugu,
    Urdu,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Assamese => "Assamese",
            Language::Bengali => "Bengali",
            Language::Bodo => "Bodo",
            Language::Dogri => "Dogri",
            Language::Gujarati => "Gujarati",
            Language::Hindi => "Hindi",
            Language::Kannada => "Kannada",
            Language::Kashmiri => "Kashmiri",
            Language::Konkani => "Konkani",
            Language::Maithili => "Maithili",
            Language::Malayalam => "Malayalam",
            Language::Manipuri => "Manipuri",
            Language::Marathi => "Marathi",
            Language::Nepali => "Nepali",
            Language::Odia => "Odia",
            Language::Punjabi => "Punjabi",
            Language::Sanskrit => "Sanskrit",
            Language::Santali => "Santali",
            Language::Sindhi => "Sindhi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Urdu => "Urdu",
        }
    }
}

/// Question formats a test paper may be restricted to. Accepted by id or by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum QuestionType {
    #[serde(rename = "mcq", alias = "Multiple Choice")]
    MultipleChoice,
    #[serde(rename = "short-answer", alias = "Short Answer")]
    ShortAnswer,
    #[serde(rename = "essay", alias = "Essay")]
    Essay,
    #[serde(rename = "fill-in-the-blanks", alias = "Fill in the Blanks")]
    FillInTheBlanks,
    #[serde(rename = "true-false", alias = "True/False")]
    TrueFalse,
    #[serde(rename = "matching", alias = "Matching")]
    Matching,
    #[serde(rename = "definitions", alias = "Definitions")]
    Definitions,
    #[serde(rename = "diagram", alias = "Diagram Questions")]
    Diagram,
    #[serde(rename = "problem-solving", alias = "Problem Solving")]
    ProblemSolving,
    #[serde(rename = "case-study", alias = "Case Study")]
    CaseStudy,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::Essay => "Essay",
            QuestionType::FillInTheBlanks => "Fill in the Blanks",
            QuestionType::TrueFalse => "True/False",
            QuestionType::Matching => "Matching",
            QuestionType::Definitions => "Definitions",
            QuestionType::Diagram => "Diagram Questions",
            QuestionType::ProblemSolving => "Problem Solving",
            QuestionType::CaseStudy => "Case Study",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestPaperRequest {
    #[serde(default)]
    #[validate(
        length(
            min = 1,
            message = "No images selected. Please upload at least one image to generate a test paper."
        ),
        custom(function = "validate_encoded_images")
    )]
    pub photo_data_uris: Vec<String>,

    #[serde(default = "default_total_marks")]
    #[validate(range(min = 1, message = "Please enter a valid number for total marks."))]
    pub marks: u32,

    #[serde(default)]
    pub language: Language,

    /// Free-text description of the required paper layout. Blank means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_encoded_image"))]
    pub format_photo_data_uri: Option<String>,

    #[serde(default)]
    pub question_types: Vec<QuestionType>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScoreQuizRequest {
    #[validate(nested)]
    pub quiz: QuizResult,
    /// One entry per question, by position. `null` marks a skipped question.
    pub selected_answers: Vec<Option<usize>>,
}
