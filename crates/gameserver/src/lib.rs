//! HTTP client for CodeGame game servers.
//!
//! [`GameServerClient`] implements [`cgshare_core::gameserver::GameServerApi`]
//! so the validation and resolution pipelines can query real servers.

pub mod client;

pub use client::{GameServerApiError, GameServerClient};
