//! # API Module
//!
//! HTTP handlers served by the short-lived local listener that receives the
//! OAuth redirect.
//!
//! - [`callback`] - Receives the redirect from the authorization server and
//!   hands the `code` (or `error`) over to the waiting handshake.
//! - [`health`] - Reports that the listener is up.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotmix::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::{CallbackSlot, callback};
pub use health::health;
