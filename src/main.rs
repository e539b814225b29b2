//! Gemless - render gemtext the way the terminal browser shows it.
//!
//! # Usage
//!
//! ```bash
//! gemless index.gmi
//! gemless --width 60 --mode dumb index.gmi
//! gemless --links index.gmi
//! ```

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gemless::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use gemless::document::page_for_file;
use gemless::prelude::{Page, RenderMode};
use gemless::perf;

/// Render a gemtext document to the terminal
#[derive(Parser, Debug)]
#[command(name = "gemless", version, about, long_about = None)]
struct Cli {
    /// Gemtext file to render
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Text width in columns
    #[arg(short, long)]
    width: Option<usize>,

    /// Block layout: separated blocks (fancy) or one row per line (dumb)
    #[arg(short, long, value_enum)]
    mode: Option<RenderMode>,

    /// Glyph drawn in front of list items
    #[arg(long)]
    bullet: Option<String>,

    /// Render the file as plain text whatever its extension
    #[arg(long)]
    plain: bool,

    /// Print the link table after the document
    #[arg(short, long)]
    links: bool,

    /// Log parse and layout timings
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            width: self.width,
            mode: self.mode,
            bullet: self.bullet.clone(),
            perf: self.perf,
        }
    }
}

fn write_page(out: &mut impl Write, page: &Page, with_links: bool) -> io::Result<()> {
    for line in page.metalines() {
        writeln!(out, "{}", line.text())?;
    }
    if with_links && !page.links().is_empty() {
        writeln!(out)?;
        for (link_id, url) in page.links().iter() {
            writeln!(out, "[{link_id}] {url}")?;
        }
    }
    out.flush()
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into())
                // Timings are only emitted once --perf enables them.
                .add_directive("gemless::perf=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    perf::set_enabled(effective.perf);

    let options = effective
        .render_options()
        .context("Invalid render options")?;

    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    let page = if cli.plain {
        Page::from_text(&text)
    } else {
        page_for_file(&cli.file, &text, &options)
    }
    .with_encoding("utf-8");
    tracing::debug!(
        file = %cli.file.display(),
        rows = page.metalines().len(),
        title = page.title().unwrap_or_default(),
        "document rendered"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_page(&mut out, &page, cli.links).context("Failed to write document")
}
