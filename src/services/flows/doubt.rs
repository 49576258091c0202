use super::{decode_image, fill_template, push_block, Flow, RenderedPrompt};
use crate::{
    constants::prompts::{DOUBT_PHOTO_BLOCK, DOUBT_PROMPT},
    errors::AppResult,
    models::dto::{request::DoubtRequest, response::DoubtResult},
};

impl Flow for DoubtRequest {
    const NAME: &'static str = "solveDoubt";

    type Output = DoubtResult;

    fn render_prompt(&self) -> AppResult<RenderedPrompt> {
        let mut text = fill_template(DOUBT_PROMPT, &[("question", &self.question)]);
        let mut images = Vec::new();

        if let Some(photo) = &self.photo_data_uri {
            images.push(decode_image(photo)?);
            push_block(&mut text, DOUBT_PHOTO_BLOCK);
        }

        Ok(RenderedPrompt { text, images })
    }
}
