//! Domain core for the share-link service.
//!
//! Holds the entry model, the payload codec, identifier generation, the
//! remote game-server capability, and the validation and resolution
//! pipelines. Nothing in here touches the database or the network directly;
//! persistence lives in `cgshare-db` and the concrete HTTP client in
//! `cgshare-gameserver`.

pub mod clock;
pub mod codec;
pub mod entry;
pub mod error;
pub mod gameserver;
pub mod ids;
pub mod network;
pub mod requests;
pub mod resolution;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;
pub mod validation;
