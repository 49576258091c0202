use super::{fill_template, Flow, RenderedPrompt};
use crate::{
    constants::prompts::WORKSHEET_PROMPT,
    errors::AppResult,
    models::dto::{request::WorksheetRequest, response::WorksheetResult},
};

impl Flow for WorksheetRequest {
    const NAME: &'static str = "generateWorksheet";

    type Output = WorksheetResult;

    fn render_prompt(&self) -> AppResult<RenderedPrompt> {
        let count = self.number_of_questions.to_string();
        let text = fill_template(
            WORKSHEET_PROMPT,
            &[
                ("topic", &self.topic),
                ("grade_level", &self.grade_level),
                ("number_of_questions", &count),
            ],
        );

        Ok(RenderedPrompt::text_only(text))
    }
}
