pub mod encoded_image;
pub mod quiz;
pub mod user;
pub use encoded_image::EncodedImage;
pub use quiz::{QuizQuestion, QuizScore};
pub use user::User;
