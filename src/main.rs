use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moodlist::playlist::Playlist;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moodlist", version, about = "Emotion-based playlists from a song catalogue")]
struct Cli {
    /// Path to the songs CSV (id,title,artist,lyrics,emotion)
    #[arg(long, global = true)]
    songs: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print songs matching any of the given emotions as JSON
    Playlist {
        /// Comma-separated emotions (e.g. "happy,excited"); omit for every song
        emotions: Option<String>,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// List the emotions present in the catalogue
    Emotions,

    /// Show catalogue statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = moodlist::config::AppConfig::load();

    let songs_path = config.resolve_songs_path(cli.songs);
    log::info!("Catalogue: {}", songs_path.display());

    let playlist = Playlist::load(&songs_path)
        .with_context(|| format!("Failed to load songs from {}", songs_path.display()))?;

    match cli.command {
        Commands::Playlist { emotions, compact } => {
            let requested = emotions
                .as_deref()
                .map(moodlist::query::parse_emotion_list)
                .unwrap_or_default();
            let songs = playlist.filter_by_emotions(&requested);
            log::info!("{} songs match {:?}", songs.len(), requested);

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            moodlist::output::write_json(&mut out, &songs, config.pretty && !compact)
                .context("Failed to write playlist")?;
            writeln!(out)?;
        }

        Commands::Emotions => {
            let available = playlist.available_emotions();
            if available.is_empty() {
                println!("No emotions found.");
                return Ok(());
            }
            println!("{:<20} {:>6}", "Emotion", "Songs");
            println!("{}", "-".repeat(27));
            for emotion in available {
                println!(
                    "{:<20} {:>6}",
                    emotion,
                    playlist.songs_with_emotion(emotion).len()
                );
            }
        }

        Commands::Stats => {
            let summary = playlist.summary();
            println!("Catalogue:      {}", playlist.source().display());
            println!("Songs:          {}", playlist.songs().len());
            println!("Emotions:       {}", playlist.index().len());
            println!("Skipped lines:  {}", summary.skipped);
            println!("Blank lines:    {}", summary.blank);
        }
    }

    Ok(())
}
