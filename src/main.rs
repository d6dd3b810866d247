//! Sitemap CLI - Command-line tool for checking, reformatting and combining XML sitemaps.
//!
//! This is the main entry point for the sitemap command-line application.
//! Files ending in `.gz` are transparently decompressed on input and
//! compressed on output.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitemap::prelude::*;

/// Sitemap - XML sitemap toolkit
#[derive(Parser)]
#[command(name = "sitemap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse sitemaps or sitemap indexes and report their entry counts
    Check {
        /// Files to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Re-encode a sitemap or sitemap index
    Fmt {
        /// Input file
        #[arg(short, long, env = "SITEMAP_INPUT")]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Write compact output without indentation
        #[arg(short, long)]
        minify: bool,
    },

    /// Export the entries of a sitemap or sitemap index as JSON
    Json {
        /// Input file
        #[arg(short, long, env = "SITEMAP_INPUT")]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Concatenate several sitemaps into one
    Merge {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Sitemaps to merge, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write compact output without indentation
        #[arg(short, long)]
        minify: bool,
    },

    /// Build a sitemap index pointing at sitemap files
    Index {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Public URL of the directory holding the sitemap files
        #[arg(short, long, env = "SITEMAP_BASE_URL")]
        base_url: String,

        /// Sitemap files to reference; their modification times become `lastmod`
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write compact output without indentation
        #[arg(short, long)]
        minify: bool,
    },
}

fn main() -> Result<()> {
    setup_logging("warn");

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { inputs } => {
            cmd_check(&inputs)?;
        }
        Commands::Fmt { input, output, minify } => {
            cmd_fmt(&input, &output, minify)?;
        }
        Commands::Json { input, output } => {
            cmd_json(&input, output.as_deref())?;
        }
        Commands::Merge { output, inputs, minify } => {
            cmd_merge(&inputs, &output, minify)?;
        }
        Commands::Index {
            output,
            base_url,
            inputs,
            minify,
        } => {
            cmd_index(&inputs, &output, &base_url, minify)?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber, using RUST_LOG when set.
fn setup_logging(default_log_settings: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_settings.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init()
}

/// A parsed input file: either kind of sitemap document.
#[derive(Debug)]
enum Document {
    Sitemap(Sitemap),
    Index(SitemapIndex),
}

impl Document {
    /// Parse bytes as a sitemap, falling back to a sitemap index.
    fn parse(data: &[u8]) -> sitemap::Result<Self> {
        match Sitemap::parse(data) {
            Ok(sitemap) => Ok(Document::Sitemap(sitemap)),
            Err(sitemap::Error::UnexpectedRoot { found, .. }) if found == "sitemapindex" => {
                SitemapIndex::parse(data).map(Document::Index)
            }
            Err(e) => Err(e),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Document::Sitemap(_) => "sitemap",
            Document::Index(_) => "sitemap index",
        }
    }

    fn entries(&self) -> &[Url] {
        match self {
            Document::Sitemap(sitemap) => sitemap.urls(),
            Document::Index(index) => index.sitemaps(),
        }
    }

    fn set_minify(&mut self, minify: bool) {
        match self {
            Document::Sitemap(sitemap) => sitemap.minify = minify,
            Document::Index(index) => index.minify = minify,
        }
    }

    fn write_to<W: Write>(&self, writer: W) -> sitemap::Result<u64> {
        match self {
            Document::Sitemap(sitemap) => sitemap.write_to(writer),
            Document::Index(index) => index.write_to(writer),
        }
    }
}

fn cmd_check(inputs: &[PathBuf]) -> Result<()> {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut failed = 0;

    for input in inputs {
        match read_input(input).and_then(|data| {
            let document = Document::parse(&data)?;
            Ok((document, data.len()))
        }) {
            Ok((document, size)) => {
                pb.println(format!(
                    "{}: {} with {} entries ({} bytes)",
                    input.display(),
                    document.kind(),
                    document.entries().len(),
                    size
                ));
            }
            Err(e) => {
                pb.println(format!("{}: {:#}", input.display(), e));
                failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!("Checked {} files in {:?}", inputs.len(), start.elapsed());

    if failed > 0 {
        anyhow::bail!("{} of {} files failed to parse", failed, inputs.len());
    }

    Ok(())
}

fn cmd_fmt(input: &Path, output: &Path, minify: bool) -> Result<()> {
    println!("Formatting: {} -> {}", input.display(), output.display());

    let data = read_input(input)?;
    let mut document = Document::parse(&data)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    document.set_minify(minify);

    let written = write_output(output, |writer| document.write_to(writer))?;
    println!("Wrote {} {} entries ({} bytes)", document.entries().len(), document.kind(), written);

    Ok(())
}

fn cmd_json(input: &Path, output: Option<&Path>) -> Result<()> {
    let data = read_input(input)?;
    let document = Document::parse(&data)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    match output {
        Some(path) => {
            let file = File::create(path).context("Failed to create output file")?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, document.entries())?;
            writer.flush()?;
            println!("Exported {} entries to {}", document.entries().len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, document.entries())?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

fn cmd_merge(inputs: &[PathBuf], output: &Path, minify: bool) -> Result<()> {
    let mut merged = Sitemap::new();
    merged.minify = minify;

    for input in inputs {
        let before = merged.len();
        let consumed = merged
            .read_from(open_input(input)?)
            .with_context(|| format!("Failed to parse {}", input.display()))?;
        info!(input = %input.display(), entries = merged.len() - before, consumed, "merged sitemap");
    }

    let written = write_output(output, |writer| merged.write_to(writer))?;
    println!(
        "Merged {} files into {} ({} entries, {} bytes)",
        inputs.len(),
        output.display(),
        merged.len(),
        written
    );

    Ok(())
}

fn cmd_index(inputs: &[PathBuf], output: &Path, base_url: &str, minify: bool) -> Result<()> {
    let mut index = SitemapIndex::new();
    index.minify = minify;

    for input in inputs {
        let modified = fs::metadata(input)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to read modification time of {}", input.display()))?;
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", input.display()))?;

        index.add(Url::new(sitemap_loc(base_url, name)).last_mod(DateTime::<Utc>::from(modified)));
    }

    let written = write_output(output, |writer| index.write_to(writer))?;
    println!("Wrote index of {} sitemaps to {} ({} bytes)", index.len(), output.display(), written);

    Ok(())
}

/// Join the public base URL and a sitemap file name.
fn sitemap_loc(base_url: &str, file_name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), file_name)
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Open an input file, decompressing `.gz` files on the fly.
fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    if is_gzip(path) {
        debug!(path = %path.display(), "reading gzip input");
        Ok(Box::new(MultiGzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    open_input(path)?
        .read_to_end(&mut data)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(data)
}

/// Create the output file and run the encoder against it, gzip-compressing
/// `.gz` outputs. Returns the uncompressed byte count reported by the encoder.
fn write_output<F>(path: &Path, encode: F) -> Result<u64>
where
    F: FnOnce(&mut dyn Write) -> sitemap::Result<u64>,
{
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let written = if is_gzip(path) {
        let mut encoder = GzEncoder::new(&mut writer, Compression::default());
        let written = encode(&mut encoder).context("Failed to write sitemap")?;
        encoder.finish().context("Failed to finish gzip stream")?;
        written
    } else {
        encode(&mut writer).context("Failed to write sitemap")?
    };

    writer.flush().context("Failed to write output file")?;
    Ok(written)
}
