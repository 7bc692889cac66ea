pub mod arrival_dto;
pub mod candidate_dto;
