//! Homestead CMS Kernel
//!
//! Command-line access to the serializers: feed a site snapshot, get the
//! frontend JSON back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use homestead_kernel::config::Config;
use homestead_kernel::content::{FilterSpec, TreeSerializer};
use homestead_kernel::models::SiteSnapshot;
use homestead_kernel::services::{self, MediaRenditions, RetryingRenditions};

/// Homestead content serializer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serialize a page and its body stream.
    Page {
        /// Site snapshot (JSON).
        #[arg(long)]
        snapshot: PathBuf,

        /// Page id.
        #[arg(long)]
        id: u64,

        /// Component type used as the image profile scope for the body.
        #[arg(long)]
        component: Option<String>,
    },

    /// Serialize the home page.
    Home {
        #[arg(long)]
        snapshot: PathBuf,

        /// Expected home page id.
        #[arg(long)]
        id: Option<u64>,
    },

    /// Serialize the house design listing.
    Designs {
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Serialize site settings.
    Settings {
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Show size profiles, or the one resolved for an image slot.
    Profiles {
        #[arg(long, requires = "field")]
        component: Option<String>,

        #[arg(long, requires = "component")]
        field: Option<String>,

        /// Tree-level component type.
        #[arg(long)]
        scope: Option<String>,
    },

    /// Compute the output of a filter spec for a source size.
    Spec {
        spec: String,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,
    },
}

#[derive(Serialize)]
struct SpecOutput<'a> {
    spec: &'a FilterSpec,
    width: u32,
    height: u32,
    suffix: String,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    info!(base_url = %config.base_url, media_url = %config.media_url, "configuration loaded");

    let settings = config.serializer_settings()?;
    let renditions = RetryingRenditions::new(
        MediaRenditions::new(&config.media_url),
        config.rendition_retries,
    );

    match cli.command {
        Command::Page {
            snapshot,
            id,
            component,
        } => {
            let snapshot = load(&snapshot)?;
            let store = snapshot.store();
            let record = store
                .page_record(id)
                .ok_or_else(|| anyhow!("page {id} is not in the snapshot"))?;
            let serializer = TreeSerializer::new(&settings, &store, &renditions);
            print_json(&services::page(&serializer, record, component.as_deref())?)
        }
        Command::Home { snapshot, id } => {
            let snapshot = load(&snapshot)?;
            let home = snapshot
                .home
                .as_ref()
                .ok_or_else(|| anyhow!("snapshot has no home page"))?;
            if let Some(id) = id
                && id != home.id
            {
                return Err(anyhow!("home page is {}, not {id}", home.id));
            }
            let store = snapshot.store();
            let serializer = TreeSerializer::new(&settings, &store, &renditions);
            print_json(&services::home_page(&serializer, home)?)
        }
        Command::Designs { snapshot } => {
            let snapshot = load(&snapshot)?;
            let store = snapshot.store();
            let serializer = TreeSerializer::new(&settings, &store, &renditions);
            print_json(&services::listing(&serializer, &snapshot)?)
        }
        Command::Settings { snapshot } => {
            let snapshot = load(&snapshot)?;
            let store = snapshot.store();
            let serializer = TreeSerializer::new(&settings, &store, &renditions);
            let record = snapshot.settings.clone().unwrap_or_default();
            print_json(&services::site_settings(&serializer, &record))
        }
        Command::Profiles {
            component,
            field,
            scope,
        } => {
            let profiles = &settings.profiles;
            match (component, field) {
                (Some(component), Some(field)) => {
                    let name = profiles.profile_name_for(&component, &field, scope.as_deref());
                    print_json(&serde_json::json!({
                        "component": component,
                        "field": field,
                        "profile": name,
                        "sizes": profiles.profile_for(&component, &field, scope.as_deref()),
                    }))
                }
                _ => {
                    let all: serde_json::Map<String, serde_json::Value> = profiles
                        .profile_names()
                        .into_iter()
                        .filter_map(|name| {
                            let profile = profiles.get(name)?;
                            Some((name.to_string(), serde_json::to_value(profile).ok()?))
                        })
                        .collect();
                    print_json(&all)
                }
            }
        }
        Command::Spec {
            spec,
            width,
            height,
        } => {
            let spec: FilterSpec = spec.parse().context("invalid filter spec")?;
            let (width, height) = spec.output_size(width, height);
            print_json(&SpecOutput {
                suffix: spec.file_suffix(),
                spec: &spec,
                width,
                height,
            })
        }
    }
}

fn load(path: &Path) -> Result<SiteSnapshot> {
    SiteSnapshot::from_path(path)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,homestead_kernel=debug"));

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
