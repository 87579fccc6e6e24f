pub mod convert;
pub mod init_config;
