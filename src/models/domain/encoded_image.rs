use std::borrow::Cow;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use validator::ValidationError;

static DATA_URI_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:(?P<mime>[a-zA-Z0-9][a-zA-Z0-9.+-]*/[a-zA-Z0-9][a-zA-Z0-9.+-]*);base64$")
        .expect("DATA_URI_HEADER_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodedImageError {
    #[error("expected a data URI of the form 'data:<mimetype>;base64,<encoded_data>'")]
    NotADataUri,

    #[error("'{0}' is not an image MIME type")]
    NotAnImage(String),

    #[error("image payload is empty")]
    EmptyPayload,

    #[error("image payload is not valid base64: {0}")]
    InvalidBase64(String),
}

/// An uploaded image carried as a MIME-tagged base64 data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    payload: String,
}

impl EncodedImage {
    pub fn parse(value: &str) -> Result<Self, EncodedImageError> {
        let (header, payload) = value
            .trim()
            .split_once(',')
            .ok_or(EncodedImageError::NotADataUri)?;

        let captures = DATA_URI_HEADER_REGEX
            .captures(header)
            .ok_or(EncodedImageError::NotADataUri)?;
        let mime_type = captures["mime"].to_ascii_lowercase();

        if !mime_type.starts_with("image/") {
            return Err(EncodedImageError::NotAnImage(mime_type));
        }

        if payload.is_empty() {
            return Err(EncodedImageError::EmptyPayload);
        }

        STANDARD
            .decode(payload)
            .map_err(|e| EncodedImageError::InvalidBase64(e.to_string()))?;

        Ok(Self {
            mime_type,
            payload: payload.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads run to megabytes; never print them.
        write!(f, "{} image ({} base64 chars)", self.mime_type, self.payload.len())
    }
}

impl TryFrom<&str> for EncodedImage {
    type Error = EncodedImageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EncodedImage::parse(value)
    }
}

fn encoded_image_error(err: EncodedImageError) -> ValidationError {
    ValidationError::new("encoded_image").with_message(Cow::Owned(err.to_string()))
}

#[allow(clippy::ptr_arg)]
pub fn validate_encoded_image(value: &String) -> Result<(), ValidationError> {
    EncodedImage::parse(value)
        .map(|_| ())
        .map_err(encoded_image_error)
}

#[allow(clippy::ptr_arg)]
pub fn validate_encoded_images(values: &Vec<String>) -> Result<(), ValidationError> {
    for (index, value) in values.iter().enumerate() {
        if let Err(err) = EncodedImage::parse(value) {
            return Err(ValidationError::new("encoded_image").with_message(Cow::Owned(
                format!("image {} is invalid: {}", index + 1, err),
            )));
        }
    }
    Ok(())
}
