//! Braille Cell Ignorer Control Tool
//!
//! CLI for managing ignored cell profiles and previewing how content and
//! routing keys are remapped on a display with broken cells.

mod config;

use anyhow::{Context, Result};
use braille_cells::{
    normalize_one_based, parse_cell_list, CellBuffer, DeviceId, IgnoredCells, ProfileSelection,
    ProfileStore, Routing, TomlProfileStore,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "braillecellctl")]
#[command(about = "Manage ignored braille display cells")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file
    #[arg(long, default_value = "config/braillecellctl.toml")]
    config: String,

    /// Profile store path (overrides the configuration file)
    #[arg(long)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ignored cell profile commands
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Show which physical cell each logical cell lands on
    Map {
        /// Display identity, e.g. baum:40
        device: String,
    },
    /// Remap a row of braille cells onto the physical display
    Render {
        /// Display identity, e.g. baum:40
        device: String,
        /// Logical cells as braille pattern characters (U+2800 block)
        cells: String,
    },
    /// Translate routing key presses to logical cell positions
    Route {
        /// Display identity, e.g. baum:40
        device: String,
        /// Physical routing key indices (0-based unless --one-based)
        #[arg(required = true)]
        keys: Vec<usize>,
        /// Interpret keys as 1-based
        #[arg(long)]
        one_based: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List stored profiles
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the ignored cells of a profile
    Show {
        /// Display identity, e.g. baum:40
        device: String,
    },
    /// Set the ignored cells of a profile
    Set {
        /// Display identity, e.g. baum:40
        device: String,
        /// 1-based cell numbers, comma-separated (empty clears)
        cells: String,
    },
    /// Remove a profile
    Remove {
        /// Display identity, e.g. baum:40
        device: String,
    },
}

/// Profile entry for JSON listing.
#[derive(Serialize)]
struct ProfileEntry {
    device: String,
    model: String,
    cells: usize,
    ignored: Vec<usize>,
}

impl ProfileEntry {
    fn new(id: &DeviceId, ignored: &IgnoredCells) -> Self {
        Self {
            device: id.key(),
            model: id.model().to_string(),
            cells: id.cells(),
            ignored: ignored.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;
    if let Some(store) = cli.store {
        config.store = store;
    }
    debug!("Using profile store {}", config.store);

    let store = TomlProfileStore::new(&config.store);

    match cli.command {
        Commands::Profile { action } => handle_profile(action, store),
        Commands::Map { device } => handle_map(&device, store),
        Commands::Render { device, cells } => handle_render(&device, &cells, store),
        Commands::Route {
            device,
            keys,
            one_based,
        } => handle_route(&device, &keys, one_based || config.one_based_keys, store),
    }
}

fn parse_device(device: &str) -> Result<DeviceId> {
    device
        .parse()
        .with_context(|| format!("Invalid display identity {:?} (expected model:cells)", device))
}

/// Attaches the display and reports (but tolerates) profile store failures.
fn attach(device: &str, store: TomlProfileStore) -> Result<ProfileSelection<TomlProfileStore>> {
    let id = parse_device(device)?;
    let mut session = ProfileSelection::new(store);
    session.device_attached(id.model(), id.cells())?;
    if let Some(e) = session.take_notice() {
        warn!("Continuing without ignored cells: {}", e);
        eprintln!("Warning: profile store unavailable ({}); no cells ignored", e);
    }
    Ok(session)
}

fn handle_profile(action: ProfileCommands, mut store: TomlProfileStore) -> Result<()> {
    match action {
        ProfileCommands::List { json } => {
            let ids = store
                .list_known_profiles()
                .context("Failed to read profile store")?;
            let mut profiles = Vec::with_capacity(ids.len());
            for id in ids {
                let ignored = store.load(&id)?;
                profiles.push((id, ignored));
            }

            if json {
                let entries: Vec<ProfileEntry> = profiles
                    .iter()
                    .map(|(id, ignored)| ProfileEntry::new(id, ignored))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if profiles.is_empty() {
                println!("No profiles stored");
            } else {
                println!("Profiles:");
                for (id, ignored) in profiles {
                    println!("  {} ({} cells): {}", id.model(), id.cells(), ignored);
                }
            }
        }
        ProfileCommands::Show { device } => {
            let id = parse_device(&device)?;
            let ignored = store.load(&id).context("Failed to read profile store")?;
            if ignored.is_empty() {
                println!("{}: no ignored cells", id);
            } else {
                println!("{}: ignored cells {}", id, ignored);
            }
        }
        ProfileCommands::Set { device, cells } => {
            let id = parse_device(&device)?;
            let ignored = parse_cell_list(&cells, id.cells())?;
            if ignored.len() == id.cells() {
                warn!("Every cell of {} is ignored; nothing will be shown", id);
            }
            store
                .save(&id, &ignored)
                .context("Failed to write profile store")?;
            if ignored.is_empty() {
                println!("Ignored cells cleared for {}", id);
            } else {
                println!("Ignored cells for {} set to: {}", id, ignored);
            }
        }
        ProfileCommands::Remove { device } => {
            let id = parse_device(&device)?;
            if store.delete(&id).context("Failed to write profile store")? {
                println!("Removed profile {}", id);
            } else {
                anyhow::bail!("No profile stored for {}", id);
            }
        }
    }

    Ok(())
}

fn handle_map(device: &str, store: TomlProfileStore) -> Result<()> {
    let session = attach(device, store)?;
    let map = session.active_map().context("No display attached")?;

    println!(
        "{} cells, {} usable",
        map.total_cells(),
        map.physical_count()
    );
    println!("  cell  physical  logical");
    for slot in 0..map.total_cells() {
        let logical = match map.physical_to_logical(slot)? {
            Some(i) => i.to_string(),
            None => "ignored".to_string(),
        };
        println!("  {:>4}  {:>8}  {:>7}", slot + 1, slot, logical);
    }
    Ok(())
}

fn handle_render(device: &str, cells: &str, store: TomlProfileStore) -> Result<()> {
    let session = attach(device, store)?;
    let logical = CellBuffer::from_braille_str(cells)?;
    let physical = session.project(logical.cells())?;
    let map = session.active_map().context("No display attached")?;

    if logical.len() > map.physical_count() {
        warn!(
            "{} logical cells truncated to {} usable cells",
            logical.len(),
            map.physical_count()
        );
    }

    let marks: String = (0..map.total_cells())
        .map(|slot| if map.is_ignored(slot) { '^' } else { ' ' })
        .collect();
    println!("Logical:  {}", logical.to_braille_string());
    println!("Physical: {}", physical.to_braille_string());
    println!("Ignored:  {}", marks.trim_end());
    Ok(())
}

fn handle_route(
    device: &str,
    keys: &[usize],
    one_based: bool,
    store: TomlProfileStore,
) -> Result<()> {
    let session = attach(device, store)?;
    let total = session.active_device().map(|d| d.cells()).unwrap_or(0);

    for &key in keys {
        let physical = if one_based {
            normalize_one_based(key, total)?
        } else {
            key
        };
        match session.route(physical)? {
            Routing::Logical(index) => println!("Key {} -> logical cell {}", key, index),
            Routing::Suppressed => println!("Key {} -> suppressed (ignored cell)", key),
        }
    }
    Ok(())
}
