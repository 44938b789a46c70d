use chrono::NaiveDate;
use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotsync::{cli, config, error, success, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add tracks linked in the Discord server to the playlist
    Sync(SyncArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncArgs {
    /// Discord server (guild) to search [default: DISCORD_SERVER_ID or built-in]
    #[clap(long)]
    pub server_id: Option<String>,

    /// Spotify playlist to add tracks to [default: SPOTIFY_PLAYLIST_ID or built-in]
    #[clap(long)]
    pub playlist_id: Option<String>,

    /// Search keyword used to find messages with Spotify links
    #[clap(long, default_value = cli::DEFAULT_SEARCH_QUERY)]
    pub query: String,

    /// Only consider messages sent on or after this date (YYYY-MM-DD)
    #[clap(long, value_parser = utils::parse_date)]
    pub since: Option<NaiveDate>,

    /// Show the tracks that would be added without changing the playlist
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Sync(args) => {
            let settings = config::Settings::from_env();
            let options = cli::SyncOptions {
                server_id: args.server_id.unwrap_or_else(|| settings.server_id.clone()),
                playlist_id: args
                    .playlist_id
                    .unwrap_or_else(|| settings.playlist_id.clone()),
                query: args.query,
                since: args.since,
                dry_run: args.dry_run,
            };

            match cli::run_sync(&settings, &options).await {
                Ok(report) => success!(
                    "{} messages, {} skipped, {} unique tracks, {} already present, {} added in {} batches.",
                    report.messages,
                    report.skipped,
                    report.unique_tracks,
                    report.already_present,
                    report.added,
                    report.batches
                ),
                Err(e) => error!("Sync failed: {}", e),
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
