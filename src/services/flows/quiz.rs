use super::{fill_template, Flow, RenderedPrompt};
use crate::{
    constants::prompts::QUIZ_PROMPT,
    errors::AppResult,
    models::dto::{request::QuizRequest, response::QuizResult},
};

impl Flow for QuizRequest {
    const NAME: &'static str = "generateQuiz";

    type Output = QuizResult;

    fn render_prompt(&self) -> AppResult<RenderedPrompt> {
        let count = self.number_of_questions.to_string();
        let text = fill_template(
            QUIZ_PROMPT,
            &[("topic", &self.topic), ("number_of_questions", &count)],
        );

        Ok(RenderedPrompt::text_only(text))
    }
}
