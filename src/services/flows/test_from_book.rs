use super::{fill_template, Flow, RenderedPrompt};
use crate::{
    constants::prompts::TEST_FROM_BOOK_PROMPT,
    errors::AppResult,
    models::dto::{request::TestFromBookRequest, response::TestFromBookResult},
};

impl Flow for TestFromBookRequest {
    const NAME: &'static str = "generateTestFromBook";

    type Output = TestFromBookResult;

    fn render_prompt(&self) -> AppResult<RenderedPrompt> {
        let count = self.number_of_questions.to_string();
        let text = fill_template(
            TEST_FROM_BOOK_PROMPT,
            &[
                ("book_name", &self.book_name),
                ("chapter_name", &self.chapter_name),
                ("number_of_questions", &count),
                ("difficulty_level", self.difficulty_level.as_str()),
            ],
        );

        Ok(RenderedPrompt::text_only(text))
    }
}
