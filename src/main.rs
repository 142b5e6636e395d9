//! Blockpad - a terminal block editor.
//!
//! # Usage
//!
//! ```bash
//! blockpad notes.json
//! blockpad --panel notes.json
//! blockpad --autosave notes.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use blockpad::app::App;
use blockpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal block editor
#[derive(Parser, Debug)]
#[command(name = "blockpad", version, about, long_about = None)]
struct Cli {
    /// Block document to edit (created on first save if missing)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Start with the style panel visible
    #[arg(short, long)]
    panel: bool,

    /// Hide the style panel on startup
    #[arg(long)]
    no_panel: bool,

    /// Save the document after every change
    #[arg(long)]
    autosave: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

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

    // Reject directories early; a missing file is fine (created on save).
    if cli.file.is_dir() {
        anyhow::bail!("{} is a directory", cli.file.display());
    }

    let mut app = App::new(cli.file)
        .with_panel_visible(effective.panel && !effective.no_panel)
        .with_autosave(effective.autosave)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
