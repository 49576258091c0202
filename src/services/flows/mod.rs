use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::EncodedImage,
};

pub mod doubt;
pub mod ncert_summary;
pub mod quiz;
pub mod revision_notes;
pub mod test_from_book;
pub mod test_paper;
pub mod worksheet;

/// Prompt text plus the images that travel with it as separate content parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub text: String,
    pub images: Vec<EncodedImage>,
}

impl RenderedPrompt {
    pub fn text_only(text: String) -> Self {
        Self {
            text,
            images: Vec::new(),
        }
    }
}

/// A single generation task: a validated input that renders its own prompt
/// and names the structured output the model must return.
pub trait Flow: Validate + Send + Sync {
    const NAME: &'static str;

    type Output: DeserializeOwned + Serialize + JsonSchema + Validate + Send;

    /// Must be pure: the same input always renders the same prompt.
    fn render_prompt(&self) -> AppResult<RenderedPrompt>;
}

/// Substitutes `{{name}}` placeholders in a single pass, so substituted values
/// are never themselves expanded. Unknown placeholders are left alone.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let name = &after[..end];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Appends an optional block separated by a blank line.
pub(crate) fn push_block(text: &mut String, block: &str) {
    text.push_str("\n\n");
    text.push_str(block);
}

pub(crate) fn decode_image(value: &str) -> AppResult<EncodedImage> {
    EncodedImage::parse(value).map_err(|e| AppError::ValidationError(e.to_string()))
}
