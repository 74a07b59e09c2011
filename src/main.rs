use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use property_edit::form::{Collection, Field, FieldEdit, SubmitOutcome};
use property_edit::{EditSession, EditorConfig, HttpGateway, MemoryGateway, PropertyGateway};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "property-edit", version, about = "Edit property listings", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.property-edit/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// API base URL
    #[arg(long, env = "PROPERTY_EDIT_API_URL")]
    api_url: Option<String>,

    /// API bearer token
    #[arg(long, env = "PROPERTY_EDIT_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Work against built-in demo listings instead of the API
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List properties
    List,
    /// Print the editable draft of a property
    Show { id: String },
    /// Apply edits to a property and save it
    Edit(EditArgs),
}

#[derive(Args)]
struct EditArgs {
    id: String,

    /// Field assignment, e.g. --set title="Sunny loft" --set yearBuilt=1998
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(Field, String)>,

    #[arg(long, value_name = "AMENITY")]
    toggle_amenity: Vec<String>,

    #[arg(long, value_name = "UTILITY")]
    toggle_utility: Vec<String>,

    /// Remove the image at this position (applied before additions)
    #[arg(long, value_name = "INDEX")]
    remove_image: Vec<usize>,

    #[arg(long, value_name = "URL")]
    add_image: Vec<String>,
}

fn parse_assignment(raw: &str) -> Result<(Field, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got {raw:?}"))?;
    let field = name
        .trim()
        .parse::<Field>()
        .map_err(|_| format!("unknown field {:?}", name.trim()))?;
    Ok((field, value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = EditorConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if cli.api_token.is_some() {
        config.api_token = cli.api_token;
    }

    let gateway: Arc<dyn PropertyGateway> = if cli.offline {
        info!("Offline mode, using demo listings");
        Arc::new(MemoryGateway::sample())
    } else {
        Arc::new(HttpGateway::with_config(&config)?)
    };

    match cli.command {
        Command::List => {
            let records = gateway.list().await.context("Failed to list properties")?;
            for (i, record) in records.iter().enumerate() {
                println!("{}. {} ({})", i + 1, record.title, record.id);
                println!("   {}", record.address);
                println!("   {} | {} bd, {} ba, {} m²", record.price, record.bedrooms, record.bathrooms, record.area);
            }
            info!("Listed {} properties", records.len());
        }
        Command::Show { id } => {
            let session = EditSession::load(gateway, &id, config.redirect_route.as_str()).await?;
            let json = serde_json::to_string_pretty(&session.snapshot().draft)?;
            println!("{json}");
        }
        Command::Edit(args) => edit(gateway, &config, args).await?,
    }

    Ok(())
}

async fn edit(gateway: Arc<dyn PropertyGateway>, config: &EditorConfig, args: EditArgs) -> Result<()> {
    let session = EditSession::load(gateway, &args.id, config.redirect_route.as_str()).await?;

    for (field, value) in &args.set {
        let edit = FieldEdit::from_input(*field, value)?;
        session.apply(edit);
        session.mark_touched(*field);
    }

    let toggles = args
        .toggle_amenity
        .iter()
        .map(|item| (Collection::Amenities, item))
        .chain(args.toggle_utility.iter().map(|item| (Collection::Utilities, item)));
    for (collection, item) in toggles {
        match session.toggle(collection, item) {
            Ok(true) => info!("Added {} to {}", item, collection),
            Ok(false) => info!("Removed {} from {}", item, collection),
            Err(err) => warn!("{}", err),
        }
    }

    let mut removals = args.remove_image.clone();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for index in removals {
        if session.remove_image(index).is_none() {
            warn!("No image at position {}", index);
        }
    }
    for url in &args.add_image {
        if let Err(err) = session.add_image(url) {
            warn!("{}: {}", err, url);
        }
    }

    match session.submit().await {
        SubmitOutcome::Saved { redirect } => {
            println!("Saved property {}. Continue at {}", args.id, redirect);
            Ok(())
        }
        SubmitOutcome::Rejected { errors } => {
            eprintln!("{}", session.banner().unwrap_or_default());
            for (field, message) in &errors {
                eprintln!("  {field}: {message}");
            }
            anyhow::bail!("{} field(s) need attention", errors.len())
        }
        SubmitOutcome::Failed { message } => anyhow::bail!("Save failed: {message}"),
        other => anyhow::bail!("Unexpected submit result: {other:?}"),
    }
}
