use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::dto::{
        request::{
            DoubtRequest, NcertQuestionSummaryRequest, NcertSolutionSummaryRequest, QuizRequest,
            RevisionNotesRequest, TestFromBookRequest, TestPaperRequest, WorksheetRequest,
        },
        response::{
            DoubtResult, NcertSummaryResult, QuizResult, RevisionNotesResult, TestFromBookResult,
            TestPaperResult, WorksheetResult,
        },
    },
    services::{
        context::FlowContext,
        flows::Flow,
        invoker::{RetryPolicy, StructuredInvoker},
        model_client::ModelClient,
    },
};

pub struct FlowService {
    invoker: StructuredInvoker,
}

impl FlowService {
    pub fn new(client: Arc<dyn ModelClient>, policy: RetryPolicy) -> Self {
        Self {
            invoker: StructuredInvoker::new(client, policy),
        }
    }

    /// Validates the input before anything is sent to the model, so a rejected
    /// request never costs a model call.
    pub async fn run<F: Flow>(&self, input: &F, ctx: &FlowContext) -> AppResult<F::Output> {
        input.validate()?;

        let prompt = input.render_prompt()?;
        log::info!(
            "{} running ({} prompt chars, {} image(s))",
            ctx.label(F::NAME),
            prompt.text.len(),
            prompt.images.len()
        );

        let output = self.invoker.invoke::<F::Output>(F::NAME, prompt, ctx).await?;
        log::debug!("{} produced a valid output", ctx.label(F::NAME));

        Ok(output)
    }

    pub async fn generate_quiz(
        &self,
        request: &QuizRequest,
        ctx: &FlowContext,
    ) -> AppResult<QuizResult> {
        let result = self.run(request, ctx).await?;

        // The model may return fewer or more questions than asked; that is not fatal.
        if result.quiz.len() != request.number_of_questions as usize {
            log::warn!(
                "[{}] Quiz on '{}' asked for {} questions but received {}",
                ctx.request_id,
                request.topic,
                request.number_of_questions,
                result.quiz.len()
            );
        }

        Ok(result)
    }

    pub async fn generate_test_from_book(
        &self,
        request: &TestFromBookRequest,
        ctx: &FlowContext,
    ) -> AppResult<TestFromBookResult> {
        self.run(request, ctx).await
    }

    pub async fn generate_worksheet(
        &self,
        request: &WorksheetRequest,
        ctx: &FlowContext,
    ) -> AppResult<WorksheetResult> {
        self.run(request, ctx).await
    }

    pub async fn generate_revision_notes(
        &self,
        request: &RevisionNotesRequest,
        ctx: &FlowContext,
    ) -> AppResult<RevisionNotesResult> {
        self.run(request, ctx).await
    }

    pub async fn answer_doubt(
        &self,
        request: &DoubtRequest,
        ctx: &FlowContext,
    ) -> AppResult<DoubtResult> {
        self.run(request, ctx).await
    }

    pub async fn summarize_ncert_solution(
        &self,
        request: &NcertSolutionSummaryRequest,
        ctx: &FlowContext,
    ) -> AppResult<NcertSummaryResult> {
        self.run(request, ctx).await
    }

    pub async fn summarize_ncert_question(
        &self,
        request: &NcertQuestionSummaryRequest,
        ctx: &FlowContext,
    ) -> AppResult<NcertSummaryResult> {
        self.run(request, ctx).await
    }

    pub async fn generate_test_paper(
        &self,
        request: &TestPaperRequest,
        ctx: &FlowContext,
    ) -> AppResult<TestPaperResult> {
        self.run(request, ctx).await
    }
}
