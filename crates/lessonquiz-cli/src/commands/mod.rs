pub mod chat;
pub mod init;
pub mod modules;
pub mod take;
pub mod validate;
