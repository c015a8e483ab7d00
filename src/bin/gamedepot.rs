use anyhow::Result;
use clap::Parser;
use gamedepot_core::{scan_installed, ScanConfig};
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "gamedepot")]
#[command(about = "List the Steam games installed on this machine")]
struct Args {
    /// Steam installation directory (defaults to ~/.local/share/Steam)
    #[arg(long, env = "GAMEDEPOT_STEAM_ROOT")]
    steam_root: Option<PathBuf>,

    /// Print the games as a JSON array
    #[arg(long)]
    json: bool,

    /// Print the resolved library folders instead of games
    #[arg(long)]
    roots: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match args.steam_root {
        Some(root) => ScanConfig::with_steam_root(root),
        None => ScanConfig::from_home()?,
    };

    // Best-effort: a failed scan prints nothing rather than exiting non-zero
    let report = match scan_installed(&config) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Error getting installed games");
            return Ok(());
        }
    };

    if args.roots {
        for root in &report.roots {
            println!("{}", root.path.display());
        }
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&report.games)?);
    } else {
        for game in &report.games {
            println!("{}\t{}", game.appid, game.name);
        }
    }

    Ok(())
}
