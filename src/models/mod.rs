pub mod product;
pub mod question;
pub mod score;
