pub mod chat;
pub mod config;
pub mod settings;
pub mod store;
