use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use zagruzka_core::{
    DownloadRequest, ProgressNormalizer, QualityTier, REQUIRED_TOOLS, append_error, dir_size,
    download, ensure_tool, format_size,
};

/// CLI wrapper for QualityTier (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliQuality {
    #[default]
    Best,
    Hd720,
    Sd480,
    Lowest144,
    Audio,
}

impl From<CliQuality> for QualityTier {
    fn from(cli: CliQuality) -> Self {
        match cli {
            CliQuality::Best => QualityTier::Best,
            CliQuality::Hd720 => QualityTier::Hd720,
            CliQuality::Sd480 => QualityTier::Sd480,
            CliQuality::Lowest144 => QualityTier::Lowest144,
            CliQuality::Audio => QualityTier::AudioOnly,
        }
    }
}

#[derive(Parser)]
#[command(name = "zagruzka")]
#[command(about = "Download videos or audio from YouTube and other sites with quality selection")]
struct Cli {
    /// Video or playlist URL. Prompts interactively when omitted.
    url: Option<String>,

    /// Destination directory (default: current directory)
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// Quality tier
    #[arg(short, long, default_value = "best")]
    quality: CliQuality,

    /// Extract audio only as mp3, overriding the quality tier
    #[arg(short, long)]
    audio_only: bool,

    /// Download whole playlists instead of a single video
    #[arg(short, long)]
    playlist: bool,
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", secs / 60.0, secs % 60.0)
    }
}

fn create_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos:>3}% {msg}")
            .unwrap(),
    );
    pb
}

fn prompt_dest(term: &Term) -> Result<PathBuf> {
    term.write_str("Enter the folder path for downloads (default: current directory): ")?;
    let input = term.read_line()?;
    let input = input.trim();
    if input.is_empty() {
        Ok(std::env::current_dir()?)
    } else {
        Ok(PathBuf::from(input))
    }
}

fn prompt_url(term: &Term) -> Result<String> {
    term.write_str("Enter video or playlist link: ")?;
    Ok(term.read_line()?.trim().to_string())
}

fn prompt_quality(term: &Term) -> Result<QualityTier> {
    println!("\nSelect quality:");
    println!("1. Best quality (default)");
    println!("2. 720p (HD)");
    println!("3. 480p (SD)");
    println!("4. 144p (lowest)");
    println!("5. Audio only (mp3)");
    loop {
        term.write_str("Enter your choice (1-5): ")?;
        let token = term.read_line()?;
        if let Some(tier) = QualityTier::try_from_choice(&token) {
            return Ok(tier);
        }
        println!(
            "{} Unrecognized choice {:?}, try again",
            style("!").yellow().bold(),
            token.trim()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Both external tools must be resolvable before any prompt.
    for &tool in REQUIRED_TOOLS {
        if let Err(e) = ensure_tool(tool) {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }

    let term = Term::stdout();
    let interactive = cli.url.is_none();

    let dest_dir = match cli.dest {
        Some(dir) => dir,
        None if interactive => prompt_dest(&term)?,
        None => std::env::current_dir()?,
    };

    if !dest_dir.exists() {
        tokio::fs::create_dir_all(&dest_dir).await?;
        println!(
            "{} Created directory: {}",
            style("✓").green().bold(),
            style(dest_dir.display()).dim()
        );
    }

    let url = match cli.url {
        Some(url) => url,
        None => prompt_url(&term)?,
    };

    let tier = if interactive {
        prompt_quality(&term)?
    } else {
        QualityTier::from(cli.quality)
    }
    .with_audio_only(cli.audio_only);

    let request = match DownloadRequest::new(url, dest_dir.clone(), tier) {
        Ok(req) => req.allow_playlist(cli.playlist),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    println!(
        "\n{}  {}\n",
        style("zagruzka").cyan().bold(),
        style("Video Downloader").dim()
    );
    println!(
        "{} Starting download for: {}",
        style("→").cyan().bold(),
        style(&request.url).dim()
    );

    let started = Instant::now();
    let bar = create_bar();
    let mut normalizer = ProgressNormalizer::new();

    let outcome = download(&request, |event| {
        if let Some(pct) = normalizer.observe(event) {
            bar.set_position(pct.round() as u64);
            if let Some(name) = Path::new(&event.filename).file_name() {
                bar.set_message(name.to_string_lossy().into_owned());
            }
        }
    })
    .await;

    match &outcome {
        Ok(()) => {
            bar.finish_and_clear();
            println!(
                "{} Download completed {}",
                style("✓").green().bold(),
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            );
        }
        Err(e) => {
            bar.finish_and_clear();
            eprintln!("{} {}", style("✗").red().bold(), e);
            if let Ok(cwd) = std::env::current_dir() {
                append_error(&cwd, &e.to_string());
            }
        }
    }

    // Disk-usage summary runs regardless of the download outcome.
    match dir_size(&dest_dir) {
        Ok(bytes) => println!(
            "\n{} {} in {}",
            style("Disk usage:").dim(),
            style(format_size(bytes)).cyan().bold(),
            style(dest_dir.display()).dim()
        ),
        Err(e) => eprintln!(
            "{} Could not read disk usage: {}",
            style("!").yellow().bold(),
            e
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_quality_maps_onto_core_tiers() {
        assert_eq!(QualityTier::from(CliQuality::Best), QualityTier::Best);
        assert_eq!(QualityTier::from(CliQuality::Hd720), QualityTier::Hd720);
        assert_eq!(QualityTier::from(CliQuality::Audio), QualityTier::AudioOnly);
    }

    #[test]
    fn durations_render_in_seconds_then_minutes() {
        assert_eq!(format_duration(Duration::from_secs_f64(12.34)), "12.3s");
        assert_eq!(format_duration(Duration::from_secs(150)), "2m 30s");
    }
}
