pub mod dto;
pub mod server;
