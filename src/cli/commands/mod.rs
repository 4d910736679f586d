//! CLI command modules

pub mod generate;
pub mod info;
pub mod init;
pub mod inspect;
pub mod validate;
