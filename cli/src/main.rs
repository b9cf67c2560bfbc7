use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use backoffice::auth::StaticToken;
use backoffice::config::{self, AppConfig, ConfigError};
use backoffice::nav;
use backoffice::net::api::{CatalogStore, HttpStore, TemplateStore};
use backoffice::net::error::StoreError;
use backoffice::net::types::OrderLine;
use backoffice::state::catalog::{CatalogError, CatalogState};
use backoffice::state::editor::{SubmitOutcome, TemplateEditor};
use backoffice::state::template::{SupplierOrderTemplate, ValidationError};


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing ID token; pass --token or set BACKOFFICE_TOKEN")]
    MissingToken,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("store request failed: {0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("unknown supplier `{0}`")]
    UnknownSupplier(String),
    #[error("invalid order item `{0}`; expected name:quantity:unit:price")]
    InvalidItem(String),
    #[error("template is invalid: {0}")]
    Invalid(#[from] ValidationError),
    #[error("template was not saved: {0}")]
    SaveFailed(String),
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "backoffice", about = "Supplier back-office store CLI")]
struct Cli {
    /// Overrides `BACKOFFICE_API_URL` from the environment.
    #[arg(long, env = "BACKOFFICE_API_URL")]
    base_url: Option<String>,

    #[arg(long, env = "BACKOFFICE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sidebar entries with the active one flagged.
    Nav {
        #[arg(long, default_value = "/")]
        path: String,
    },
    Suppliers,
    Pricing {
        supplier_id: String,
        #[arg(required = true)]
        items: Vec<String>,
    },
    Order(OrderArgs),
    Templates(TemplatesCommand),
    Suggestions,
}

#[derive(Args, Debug)]
struct OrderArgs {
    supplier_id: String,

    #[arg(long = "item", required = true, help = "name:quantity:unit:price, repeatable")]
    items: Vec<String>,

    #[arg(long)]
    address: String,

    #[arg(long)]
    delivery_date: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args, Debug)]
struct TemplatesCommand {
    #[command(subcommand)]
    command: TemplatesSubcommand,
}

#[derive(Subcommand, Debug)]
enum TemplatesSubcommand {
    List,
    Create {
        #[arg(long, default_value = "-", help = "Template JSON file, or - for stdin")]
        file: String,
    },
    Update {
        template_id: String,
        #[arg(long, default_value = "-", help = "Template JSON file, or - for stdin")]
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut app_config = AppConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        app_config.api_base_url = base_url.trim_end_matches('/').to_owned();
    }
    let app_config = config::init(app_config);

    if let Command::Nav { path } = &cli.command {
        return run_nav(path);
    }

    let token = cli.token.filter(|t| !t.trim().is_empty()).ok_or(CliError::MissingToken)?;
    let store = HttpStore::new(app_config, Arc::new(StaticToken::new(token)))?;
    tracing::debug!(base_url = store.base_url(), "store client ready");

    match cli.command {
        Command::Nav { .. } => Ok(()),
        Command::Suppliers => {
            let suppliers = store.list_suppliers().await?;
            print_json(&suppliers)
        }
        Command::Pricing { supplier_id, items } => {
            let mut catalog = select_supplier(&store, supplier_id).await?;
            catalog.get_pricing(&store, &items).await?;
            print_json(&catalog.pricing)
        }
        Command::Order(args) => run_order(&store, args).await,
        Command::Templates(templates) => run_templates(&store, templates).await,
        Command::Suggestions => {
            let suggestions = store.smart_suggestions().await?;
            print_json(&suggestions)
        }
    }
}

fn run_nav(path: &str) -> Result<(), CliError> {
    let items: Vec<_> = nav::nav_items(path)
        .into_iter()
        .map(|item| {
            json!({
                "label": item.entry.label,
                "route": item.entry.route,
                "icon": item.entry.icon.name(),
                "active": item.active,
            })
        })
        .collect();
    print_json(&items)
}

async fn run_order(store: &HttpStore, args: OrderArgs) -> Result<(), CliError> {
    let lines = args
        .items
        .iter()
        .map(|raw| parse_order_item(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut catalog = select_supplier(store, args.supplier_id).await?;
    for line in lines {
        catalog.order.add_line(line);
    }
    catalog.order.delivery_address = args.address;
    catalog.order.delivery_date = args.delivery_date;
    catalog.order.notes = args.notes;

    let total = catalog.order.total();
    let order_id = catalog.place_order(store).await?;
    print_json(&json!({ "orderId": order_id, "total": total }))
}

async fn select_supplier(store: &HttpStore, supplier_id: String) -> Result<CatalogState, CliError> {
    let mut catalog = CatalogState::new();
    let token = catalog.begin_load_suppliers();
    let suppliers = store.list_suppliers().await?;
    catalog.apply_suppliers(token, Ok(suppliers));
    if !catalog.select(&supplier_id) {
        return Err(CliError::UnknownSupplier(supplier_id));
    }
    Ok(catalog)
}

async fn run_templates(store: &HttpStore, templates: TemplatesCommand) -> Result<(), CliError> {
    match templates.command {
        TemplatesSubcommand::List => {
            let templates = store.list_templates().await?;
            print_json(&templates)
        }
        TemplatesSubcommand::Create { file } => {
            let mut template = read_template(&file)?;
            template.id = None;
            save_template(store, &template).await
        }
        TemplatesSubcommand::Update { template_id, file } => {
            let mut template = read_template(&file)?;
            template.id = Some(template_id);
            save_template(store, &template).await
        }
    }
}

async fn save_template(store: &HttpStore, template: &SupplierOrderTemplate) -> Result<(), CliError> {
    let mut editor = TemplateEditor::new();
    editor.open(Some(template));
    match editor.submit(store).await {
        SubmitOutcome::Saved { template, created } => {
            print_json(&json!({ "created": created, "template": template }))
        }
        SubmitOutcome::Invalid(invalid) => Err(CliError::Invalid(invalid)),
        SubmitOutcome::Failed(message) => Err(CliError::SaveFailed(message)),
    }
}

fn read_template(file: &str) -> Result<SupplierOrderTemplate, CliError> {
    let raw = if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(file)?
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Parse `name:quantity:unit:price`. The name may itself contain colons.
fn parse_order_item(raw: &str) -> Result<OrderLine, CliError> {
    let invalid = || CliError::InvalidItem(raw.to_owned());
    let mut parts = raw.rsplitn(4, ':');
    let price = parts.next().ok_or_else(invalid)?;
    let unit = parts.next().ok_or_else(invalid)?;
    let quantity = parts.next().ok_or_else(invalid)?;
    let name = parts.next().ok_or_else(invalid)?;

    let name = name.trim();
    let unit = unit.trim();
    if name.is_empty() || unit.is_empty() {
        return Err(invalid());
    }
    let quantity = quantity.trim().parse::<u32>().map_err(|_| invalid())?;
    let unit_price = price.trim().parse::<f64>().map_err(|_| invalid())?;
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(invalid());
    }

    Ok(OrderLine { name: name.to_owned(), quantity, unit: unit.to_owned(), unit_price })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
