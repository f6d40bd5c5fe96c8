pub mod status_dto;
