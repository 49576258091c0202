use super::{fill_template, push_block, Flow, RenderedPrompt};
use crate::{
    constants::prompts::{REVISION_NOTES_OCR_BLOCK, REVISION_NOTES_PROMPT},
    errors::AppResult,
    models::dto::{
        request::{RevisionNotesRequest, SourceType},
        response::RevisionNotesResult,
    },
};

impl Flow for RevisionNotesRequest {
    const NAME: &'static str = "generateRevisionNotes";

    type Output = RevisionNotesResult;

    fn render_prompt(&self) -> AppResult<RenderedPrompt> {
        let mut text = fill_template(REVISION_NOTES_PROMPT, &[("content", &self.content)]);

        if self.source_type == SourceType::Ocr {
            push_block(&mut text, REVISION_NOTES_OCR_BLOCK);
        }

        Ok(RenderedPrompt::text_only(text))
    }
}
