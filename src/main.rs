use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotmix::{
    cli::{self, MixOptions, SourceKind},
    config, error,
};

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
    /// Authorize, pick a playlist and create its remixed copy
    Mix(MixArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct MixArgs {
    /// Where the source playlist lives; prompted for when omitted
    #[clap(long, value_enum)]
    source: Option<SourceKind>,

    /// Browse category name (case sensitive), for `--source spotify`
    #[clap(long)]
    category: Option<String>,

    /// Playlist name (case sensitive)
    #[clap(long)]
    playlist: Option<String>,

    /// Seed for the random track choices, for reproducible mixes
    #[clap(long)]
    seed: Option<u64>,

    /// Stop at the first failed add-tracks call instead of skipping the chunk
    #[clap(long)]
    abort_on_write_error: bool,

    /// Only print the authorization link, do not open a browser
    #[clap(long)]
    no_browser: bool,
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
        Command::Mix(opt) => {
            cli::mix(MixOptions {
                source: opt.source,
                category: opt.category,
                playlist: opt.playlist,
                seed: opt.seed,
                abort_on_write_error: opt.abort_on_write_error,
                no_browser: opt.no_browser,
            })
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
