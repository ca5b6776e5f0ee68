pub mod question_dto;
pub mod score_dto;
