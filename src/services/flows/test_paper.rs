use super::{decode_image, fill_template, push_block, Flow, RenderedPrompt};
use crate::{
    constants::prompts::{
        TEST_PAPER_FORMAT_IMAGE_BLOCK, TEST_PAPER_FORMAT_TEXT_BLOCK, TEST_PAPER_OUTPUT_BLOCK,
        TEST_PAPER_PROMPT, TEST_PAPER_QUESTION_TYPES_BLOCK,
    },
    errors::AppResult,
    models::dto::{request::TestPaperRequest, response::TestPaperResult},
};

impl TestPaperRequest {
    fn exam_format_text(&self) -> Option<&str> {
        self.exam_format
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

impl Flow for TestPaperRequest {
    const NAME: &'static str = "generateTestPaper";

    type Output = TestPaperResult;

    /// Source pages are attached in upload order; the format sample, if any, goes last.
    fn render_prompt(&self) -> AppResult<RenderedPrompt> {
        let mut images = self
            .photo_data_uris
            .iter()
            .map(|uri| decode_image(uri))
            .collect::<AppResult<Vec<_>>>()?;

        let page_count = images.len().to_string();
        let marks = self.marks.to_string();
        let mut text = fill_template(
            TEST_PAPER_PROMPT,
            &[
                ("page_count", &page_count),
                ("marks", &marks),
                ("language", self.language.as_str()),
            ],
        );

        if !self.question_types.is_empty() {
            let labels = self
                .question_types
                .iter()
                .map(|kind| kind.label())
                .collect::<Vec<_>>()
                .join(", ");
            push_block(
                &mut text,
                &fill_template(TEST_PAPER_QUESTION_TYPES_BLOCK, &[("question_types", &labels)]),
            );
        }

        if let Some(format) = self.exam_format_text() {
            push_block(
                &mut text,
                &fill_template(TEST_PAPER_FORMAT_TEXT_BLOCK, &[("exam_format", format)]),
            );
        }

        if let Some(sample) = &self.format_photo_data_uri {
            images.push(decode_image(sample)?);
            push_block(&mut text, TEST_PAPER_FORMAT_IMAGE_BLOCK);
        }

        push_block(&mut text, TEST_PAPER_OUTPUT_BLOCK);

        Ok(RenderedPrompt { text, images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dto::request::{Language, QuestionType};
    use crate::test_utils::fixtures::{sample_test_paper_request, TINY_PNG_DATA_URI};

    #[test]
    fn test_minimal_paper_has_no_optional_blocks() {
        let request = sample_test_paper_request();
        let prompt = request.render_prompt().unwrap();

        assert!(prompt.text.contains("Total Marks: 10"));
        assert!(prompt.text.contains("Language: English"));
        assert!(!prompt.text.contains("question types"));
        assert!(!prompt.text.contains("exam format"));
        assert!(!prompt.text.contains("sample exam paper"));
        assert!(!prompt.text.contains("{{"));
        assert!(prompt.text.ends_with(TEST_PAPER_OUTPUT_BLOCK));
        assert_eq!(prompt.images.len(), 1);
    }

    #[test]
    fn test_full_paper_includes_every_block() {
        let mut request = sample_test_paper_request();
        request.marks = 80;
        request.language = Language::Hindi;
        request.exam_format = Some("Section A: MCQs, Section B: long answers".to_string());
        request.format_photo_data_uri = Some(TINY_PNG_DATA_URI.to_string());
        request.question_types = vec![QuestionType::MultipleChoice, QuestionType::CaseStudy];

        let prompt = request.render_prompt().unwrap();

        assert!(prompt.text.contains("Total Marks: 80"));
        assert!(prompt.text.contains("in Hindi"));
        assert!(prompt.text.contains("Use only these question types: Multiple Choice, Case Study."));
        assert!(prompt.text.contains("Section A: MCQs, Section B: long answers"));
        assert!(prompt.text.contains("sample exam paper"));
        assert_eq!(prompt.images.len(), 2);
    }

    #[test]
    fn test_blank_exam_format_is_ignored() {
        let mut request = sample_test_paper_request();
        request.exam_format = Some("   ".to_string());

        let prompt = request.render_prompt().unwrap();
        assert!(!prompt.text.contains("exam format"));
    }

    #[test]
    fn test_page_count_follows_uploads() {
        let mut request = sample_test_paper_request();
        request.photo_data_uris = vec![TINY_PNG_DATA_URI.to_string(); 3];

        let prompt = request.render_prompt().unwrap();
        assert!(prompt.text.contains("The first 3 attached image(s)"));
        assert_eq!(prompt.images.len(), 3);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let mut request = sample_test_paper_request();
        request.question_types = vec![QuestionType::Essay];

        assert_eq!(request.render_prompt().unwrap(), request.render_prompt().unwrap());
    }
}
