//! Client for the gpt-engineer chat and knowledge-base backend.
//!
//! The crate is organized around a small set of layers:
//! - [`api`] holds [`api::ApiClient`], the grouped method table over the
//!   backend's HTTP routes, together with the in-flight request counter and
//!   the error type every call returns.
//! - [`core`] owns the data the client caches or builds locally: settings
//!   and their bootstrap, chats, the key-value store behind the settings
//!   cache, and on-disk configuration.
//! - [`cli`] is the `gpteng` binary's command surface.
//! - [`utils`] carries URL handling, logging setup, and test helpers.

pub mod api;
pub mod cli;
pub mod core;
pub mod utils;
