pub mod application_dto;
pub mod auth_dto;
