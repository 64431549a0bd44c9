pub mod data;
pub mod io;
pub mod printing;

pub use data::{Config, ConfigKeyError, DEFAULT_BASE_URL};
pub use io::ConfigError;

#[cfg(test)]
pub mod tests;
