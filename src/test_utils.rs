#[cfg(test)]
pub mod fixtures {
    use crate::models::{
        domain::QuizQuestion,
        dto::{
            request::{Language, TestPaperRequest},
            response::QuizResult,
        },
    };

    /// A valid 1x1 PNG.
    pub const TINY_PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    /// Two questions whose correct answers are 1 and 3.
    pub fn photosynthesis_questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                question: "Which pigment absorbs light for photosynthesis?".to_string(),
                options: vec![
                    "Keratin".to_string(),
                    "Chlorophyll".to_string(),
                    "Melanin".to_string(),
                    "Haemoglobin".to_string(),
                ],
                answer: 1,
            },
            QuizQuestion {
                question: "Which gas do plants release during photosynthesis?".to_string(),
                options: vec![
                    "Nitrogen".to_string(),
                    "Carbon dioxide".to_string(),
                    "Hydrogen".to_string(),
                    "Oxygen".to_string(),
                ],
                answer: 3,
            },
        ]
    }

    pub fn photosynthesis_quiz() -> QuizResult {
        QuizResult {
            quiz: photosynthesis_questions(),
        }
    }

    /// One source page, default marks and language, no optional blocks.
    pub fn sample_test_paper_request() -> TestPaperRequest {
        TestPaperRequest {
            photo_data_uris: vec![TINY_PNG_DATA_URI.to_string()],
            marks: 10,
            language: Language::English,
            exam_format: None,
            format_photo_data_uri: None,
            question_types: Vec::new(),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use validator::Validate;

    #[test]
    fn test_fixture_quiz_is_valid() {
        assert!(photosynthesis_quiz().validate().is_ok());
    }

    #[test]
    fn test_fixture_test_paper_request_is_valid() {
        assert!(sample_test_paper_request().validate().is_ok());
    }
}
