//! # CLI Module
//!
//! User-facing flows of spotmix. The library modules do the work; this layer
//! collects the user's choices, prints progress and turns errors into exit
//! codes.
//!
//! ```text
//! mix
//!  ├── auth handshake (browser + local listener)
//!  ├── pick source playlist (own library or browse category)
//!  ├── substitute every track
//!  └── create "... BUT MIXED!! :)" playlist and fill it
//! ```

mod mix;
mod prompt;

pub use mix::{MixOptions, mix};

/// Where the source playlist comes from.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A playlist in the user's own library
    User,
    /// A playlist from one of Spotify's browse categories
    Spotify,
}
