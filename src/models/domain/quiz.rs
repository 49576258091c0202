use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema, Validate)]
#[validate(schema(function = "validate_answer_index"))]
pub struct QuizQuestion {
    #[validate(length(min = 1, message = "question text must not be empty"))]
    pub question: String,
    #[validate(length(min = 2, message = "a question needs at least two options"))]
    pub options: Vec<String>,
    /// Zero-based index into `options` of the correct choice.
    pub answer: usize,
}

impl QuizQuestion {
    pub fn is_correct(&self, selected: usize) -> bool {
        self.answer == selected
    }
}

fn validate_answer_index(question: &QuizQuestion) -> Result<(), ValidationError> {
    if question.answer >= question.options.len() {
        return Err(
            ValidationError::new("answer_index").with_message(Cow::Owned(format!(
                "answer index {} is out of range for {} options",
                question.answer,
                question.options.len()
            ))),
        );
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
    pub rounded_percentage: u32,
}

/// Scores selections against the answer key. Selections are matched to
/// questions by position; a `None` or missing selection counts as wrong.
pub fn score_answers(questions: &[QuizQuestion], selected: &[Option<usize>]) -> QuizScore {
    let total = questions.len();
    let correct = questions
        .iter()
        .zip(selected.iter())
        .filter(|(question, choice)| choice.is_some_and(|choice| question.is_correct(choice)))
        .count();

    let percentage = if total == 0 {
        0.0
    } else {
        (correct as f64 / total as f64) * 100.0
    };

    QuizScore {
        correct,
        total,
        percentage,
        rounded_percentage: percentage.round() as u32,
    }
}
