//! # CLI Module
//!
//! Command implementations behind the `spotsync` binary.
//!
//! ## Commands
//!
//! - [`run_sync`] - builds the Discord and Spotify clients from
//!   [`crate::config::Settings`] and runs [`sync`]
//! - [`sync`] - searches the server, extracts track links, diffs them
//!   against the playlist and appends what is missing
//!
//! ## Flow
//!
//! ```text
//! Discord search (paginated, rate-limit aware)
//!     ↓
//! Link extraction (one track per message, albums resolved via Spotify)
//!     ↓
//! Set difference against the current playlist
//!     ↓
//! Batched playlist writes
//! ```
//!
//! Fatal errors (missing credentials, failed requests, exhausted rate-limit
//! retries) are returned to the caller. Messages that contain no usable link
//! only produce a warning.
//!
//! ## Usage
//!
//! ```bash
//! spotsync sync                                 # default server and playlist
//! spotsync sync --playlist-id 1o1Lie... --dry-run
//! spotsync sync --since 2024-01-01
//! ```

mod sync;

pub use sync::ADD_BATCH_SIZE;
pub use sync::DEFAULT_SEARCH_QUERY;
pub use sync::SyncOptions;
pub use sync::run_sync;
pub use sync::sync;
