pub mod inference;
pub mod question;
pub mod scoring;
