use super::{fill_template, Flow, RenderedPrompt};
use crate::{
    constants::prompts::{NCERT_QUESTION_SUMMARY_PROMPT, NCERT_SOLUTION_SUMMARY_PROMPT},
    errors::AppResult,
    models::dto::{
        request::{NcertQuestionSummaryRequest, NcertSolutionSummaryRequest},
        response::NcertSummaryResult,
    },
};

impl Flow for NcertSolutionSummaryRequest {
    const NAME: &'static str = "summarizeNcertSolution";

    type Output = NcertSummaryResult;

    fn render_prompt(&self) -> AppResult<RenderedPrompt> {
        let text = fill_template(
            NCERT_SOLUTION_SUMMARY_PROMPT,
            &[("solution_text", &self.solution_text)],
        );
        Ok(RenderedPrompt::text_only(text))
    }
}

impl Flow for NcertQuestionSummaryRequest {
    const NAME: &'static str = "summarizeNcertQuestion";

    type Output = NcertSummaryResult;

    fn render_prompt(&self) -> AppResult<RenderedPrompt> {
        let text = fill_template(
            NCERT_QUESTION_SUMMARY_PROMPT,
            &[
                ("question_text", &self.question_text),
                ("solution_text", &self.solution_text),
            ],
        );
        Ok(RenderedPrompt::text_only(text))
    }
}
