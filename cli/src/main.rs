//! FlashDeck command-line tool
//!
//! Loads a deck from text or a spreadsheet and prints it as a duplex-aligned
//! PDF of flash cards, eight per sheet.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{CheckArgs, RenderArgs};

#[derive(Parser, Debug)]
#[command(name = "flashdeck", version, about = "Print duplex-aligned flash cards as PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a deck to a PDF file
    Render(RenderArgs),
    /// Report card and sheet counts and rows with an empty side
    Check(CheckArgs),
    /// Manage the settings file
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommands {
    /// Write a settings file with default values
    Init {
        path: std::path::PathBuf,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective settings stored in a file
    Show { path: std::path::PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Render(args) => commands::render(&args),
        Commands::Check(args) => commands::check(&args),
        Commands::Settings { action } => match action {
            SettingsCommands::Init { path, force } => commands::settings_init(&path, force),
            SettingsCommands::Show { path } => commands::settings_show(&path),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_engine::DuplexMode;

    #[test]
    fn test_parse_render_command() {
        let cli = Cli::try_parse_from([
            "flashdeck",
            "render",
            "--input",
            "cards.csv",
            "--output",
            "cards.pdf",
            "--duplex",
            "short-edge",
            "--offset-x-mm",
            "-1.5",
            "--corner-markers",
        ])
        .unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.duplex, Some(DuplexMode::ShortEdge));
        assert_eq!(args.offset_x_mm, Some(-1.5));
        assert!(args.corner_markers);
        assert!(!args.no_cut_lines);
    }

    #[test]
    fn test_unknown_duplex_rejected() {
        let result = Cli::try_parse_from([
            "flashdeck", "render", "-i", "a.txt", "-o", "a.pdf", "--duplex", "sideways",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_settings_init() {
        let cli = Cli::try_parse_from(["flashdeck", "settings", "init", "s.json", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Settings { action: SettingsCommands::Init { force: true, .. } }
        ));
    }
}
