//! Command-line front end for the listing dashboard.
//!
//! # Responsibility
//! - Resolve configuration from flags, environment and an optional `.env`.
//! - Drive the core store/view state and render results as text.
//! - Hold no listing state of its own between invocations.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use propdash_core::{
    core_version, default_log_level, format_price, init_logging, load_image_data_url,
    DashboardView, LogConfig, ModalMode, Property, PropertyId, PropertyStore, PropertyType,
    SqliteStorage, StorageError,
};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE: &str = "propdash.sqlite3";

#[derive(Parser)]
#[command(
    name = "propdash",
    about = "Manage property listings stored on this device",
    version
)]
struct Cli {
    /// Storage file holding listings and theme preference
    #[arg(long, global = true, env = "PROPDASH_DB", default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "PROPDASH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "PROPDASH_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Host prefers a dark theme; used until a theme is saved
    #[arg(long, global = true, env = "PROPDASH_PREFERS_DARK")]
    prefers_dark: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List properties matching the search text and type
    List {
        /// Case-insensitive text matched against name, location and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Exact property type, e.g. "Retail Store"
        #[arg(short = 't', long = "type", default_value = "")]
        kind: String,
    },

    /// Show one property in detail
    Show { id: String },

    /// Add a new property
    Add(AddArgs),

    /// Edit fields of an existing property
    Edit(EditArgs),

    /// Delete a property permanently
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or toggle the dark theme flag
    Theme {
        #[arg(long)]
        toggle: bool,
    },

    /// Print the core version
    Version,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long = "type", default_value = "Plot")]
    kind: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    price: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Image file to embed
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Replace the image with this file
    #[arg(long, conflicts_with = "clear_image")]
    image: Option<PathBuf>,
    /// Remove the current image
    #[arg(long)]
    clear_image: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    setup_logging(&cli)?;

    match cli.command {
        Command::Version => {
            println!("propdash_core version={}", core_version());
            Ok(())
        }
        command => run(command, &cli.db, cli.prefers_dark),
    }
}

fn run(command: Command, db: &Path, prefers_dark: bool) -> Result<()> {
    let storage = match SqliteStorage::open(db) {
        Ok(storage) => storage,
        Err(StorageError::Db(err)) if err.requires_newer_build() => {
            bail!(
                "storage at `{}` was written by a newer propdash ({err}); upgrade to open it",
                db.display()
            );
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to open storage at `{}`", db.display()));
        }
    };
    let mut store = PropertyStore::open(storage, prefers_dark)?;
    let mut view = DashboardView::new();

    match command {
        Command::List { search, kind } => {
            view.set_search_term(search);
            view.select_type(&kind)?;
            let listings = view.projection(&store);
            println!("Property Listings ({})", listings.len());
            if listings.is_empty() {
                println!("No properties found. Try adjusting your search or filter criteria.");
            }
            for property in listings {
                print_card(property);
            }
        }
        Command::Show { id } => {
            let id = PropertyId::new(id);
            view.open_record(&store, &id, ModalMode::View)?;
            if let Some(property) = view.selected(&store) {
                print_details(property);
            }
        }
        Command::Add(args) => {
            let form = view.open_create_form();
            form.name = args.name;
            form.kind = args.kind.parse::<PropertyType>()?;
            form.location = args.location;
            form.price = args.price;
            form.description = args.description;
            if let Some(path) = args.image {
                form.set_image(load_image_data_url(path)?);
            }
            let created = view.submit_create(&mut store)?;
            println!("added {}", created.id);
        }
        Command::Edit(args) => {
            let id = PropertyId::new(args.id);
            view.open_record(&store, &id, ModalMode::Edit)?;
            let Some(working) = view.working_copy_mut() else {
                bail!("property {id} is not editable");
            };
            if let Some(name) = args.name {
                working.name = name;
            }
            if let Some(kind) = args.kind {
                working.kind = kind.parse::<PropertyType>()?;
            }
            if let Some(location) = args.location {
                working.location = location;
            }
            if let Some(price) = args.price {
                working.price = price;
            }
            if let Some(description) = args.description {
                working.description = description;
            }
            if let Some(path) = args.image {
                working.set_image(load_image_data_url(path)?);
            } else if args.clear_image {
                working.clear_image();
            }
            let saved = view.save(&mut store)?;
            print_details(&saved);
        }
        Command::Delete { id, yes } => {
            let id = PropertyId::new(id);
            if let Some(property) = store.get(&id) {
                if !yes && !confirm_delete(property)? {
                    println!("kept {id}");
                    return Ok(());
                }
            }
            if view.delete(&mut store, &id)? {
                println!("deleted {id}");
            } else {
                println!("no property with id {id}");
            }
        }
        Command::Theme { toggle } => {
            let dark = if toggle {
                store.toggle_dark_mode()?
            } else {
                store.dark_mode()
            };
            println!("theme={}", if dark { "dark" } else { "light" });
        }
        Command::Version => println!("propdash_core version={}", core_version()),
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let Some(log_dir) = cli.log_dir.as_ref() else {
        return Ok(());
    };
    let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    let config = LogConfig::new(level, log_dir).map_err(anyhow::Error::msg)?;
    init_logging(&config).map_err(anyhow::Error::msg)?;
    log::info!("event=cli_start module=cli status=ok db={}", cli.db.display());
    Ok(())
}

fn confirm_delete(property: &Property) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Delete \"{}\" ({})? This cannot be undone",
            property.name, property.id
        ))
        .default(false)
        .interact()
        .context("confirmation prompt failed; pass --yes to delete without a terminal")
}

fn print_card(property: &Property) {
    println!(
        "[{}] {} | {} | {} | {}",
        property.id,
        property.name,
        property.kind,
        property.location,
        format_price(property.price)
    );
}

fn print_details(property: &Property) {
    println!("id:          {}", property.id);
    println!("name:        {}", property.name);
    println!("type:        {}", property.kind);
    println!("location:    {}", property.location);
    println!("price:       {}", format_price(property.price));
    println!("description: {}", property.description);
    println!(
        "image:       {}",
        match property.image.as_deref() {
            Some(image) if image.starts_with("data:") => "embedded",
            Some(_) => "linked",
            None => "none",
        }
    );
    println!("created:     {}", property.created_at.to_rfc3339());
    println!("updated:     {}", property.updated_at.to_rfc3339());
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn delete_asks_for_confirmation_unless_yes_is_given() {
        let cli = Cli::try_parse_from(["propdash", "delete", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { ref id, yes: false } if id == "3"));

        let cli = Cli::try_parse_from(["propdash", "delete", "3", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { yes: true, .. }));

        let cli = Cli::try_parse_from(["propdash", "delete", "-y", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { yes: true, .. }));
    }

    #[test]
    fn edit_rejects_image_together_with_clear_image() {
        let result = Cli::try_parse_from([
            "propdash",
            "edit",
            "1",
            "--image",
            "plot.png",
            "--clear-image",
        ]);
        assert!(result.is_err());
    }
}
