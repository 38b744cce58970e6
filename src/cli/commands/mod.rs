pub mod config;
pub mod export;
pub mod import;
pub mod init;
pub mod inspect;
pub mod list;
pub mod log;
