//! spotsync library
//!
//! Collects Spotify links posted in a Discord server and appends the tracks
//! they point to into a Spotify playlist, skipping tracks that are already
//! there.
//!
//! # Modules
//!
//! - `cli` - Command implementations, including the sync itself
//! - `config` - Configuration management and environment variables
//! - `discord` - Discord message search client
//! - `error` - Error types
//! - `links` - Extraction of track references from chat messages
//! - `spotify` - Spotify Web API client (playlists and albums)
//! - `types` - Data structures and wire records
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotsync::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> spotsync::Res<()> {
//!     let settings = config::Settings::from_env();
//!     let options = cli::SyncOptions::new(&settings.server_id, &settings.playlist_id);
//!     let report = cli::run_sync(&settings, &options).await?;
//!     println!("{} tracks added", report.added);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod discord;
pub mod error;
pub mod links;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fatal condition of a sync run is a variant of [`Error`]; the alias
/// keeps signatures short throughout the crate.
///
/// # Example
///
/// ```
/// use spotsync::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Retrieving messages from Discord...");
/// info!("Found {} messages", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Playlist is up to date");
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("{}", err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Could not parse message: {}", err);
/// warning!("Rate limited, retrying after {} seconds", delay);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
