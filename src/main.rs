//! `pharmadash`: pharmacy inventory dashboard CLI.
//!
//! Renders the dashboard in the terminal, runs row actions, edits
//! inventory records, or serves the dashboard page over HTTP.

use std::io::{BufRead, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use pharmadash_lib::client::{HttpInventoryClient, InventoryApi};
use pharmadash_lib::config::DashboardConfig;
use pharmadash_lib::dashboard::{
    local_today, AssumeYes, DeleteOutcome, InventoryDashboard, Prompt,
};
use pharmadash_lib::models::{MedicineInput, SupplierRef};
use pharmadash_lib::page::{Page, PageLayout};
use pharmadash_lib::render::{PageRenderer, TerminalRenderer};
use pharmadash_lib::server::{self, ServerState};
use pharmadash_lib::views::build_medicine_table;

/// Pharmacy inventory dashboard.
#[derive(Parser, Debug)]
#[command(name = "pharmadash", version, about = "Pharmacy inventory dashboard")]
struct Cli {
    /// Inventory API base URL (default: $PHARMADASH_API_BASE or http://127.0.0.1:5000).
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Print the page model as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Debug logging.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Full dashboard: summary, chart, alerts and the medicine table.
    Show {
        /// Only show rows containing this text.
        #[arg(long)]
        search: Option<String>,
        /// Only show rows in this category.
        #[arg(long, value_parser = ["expired", "near", "low"])]
        category: Option<String>,
    },
    /// Low-stock and near-expiry alerts.
    Alerts,
    /// Stock counts and chart.
    Summary,
    /// Delete a medicine, then list what remains.
    Delete {
        id: i64,
        /// Do not ask for confirmation.
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// Print the update page location for a medicine.
    Edit { id: i64 },
    /// Add a medicine.
    Add {
        #[command(flatten)]
        medicine: MedicineArgs,
    },
    /// Replace a medicine's fields.
    Update {
        id: i64,
        #[command(flatten)]
        medicine: MedicineArgs,
    },
    /// Search by name or batch number on the backend.
    Search { query: String },
    /// Serve the dashboard page over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
}

#[derive(Args, Debug)]
struct MedicineArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    batch: String,
    /// Expiry date, YYYY-MM-DD.
    #[arg(long)]
    expiry: NaiveDate,
    #[arg(long)]
    quantity: u32,
    /// Supplier id or code.
    #[arg(long)]
    supplier: String,
    #[arg(long)]
    category: i64,
    #[arg(long)]
    price: f64,
}

impl From<MedicineArgs> for MedicineInput {
    fn from(args: MedicineArgs) -> Self {
        let supplier_id = match args.supplier.parse::<i64>() {
            Ok(id) => SupplierRef::Id(id),
            Err(_) => SupplierRef::Code(args.supplier),
        };
        MedicineInput {
            name: args.name,
            batch_number: args.batch,
            expiry_date: args.expiry,
            quantity: args.quantity,
            supplier_id,
            category_id: args.category,
            price: args.price,
        }
    }
}

/// Asks on stderr, reads the answer from stdin.
struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    pharmadash_lib::init_tracing(cli.verbose);

    let config = DashboardConfig::from_env().with_api_base(cli.api_base.clone());
    let client = HttpInventoryClient::new(&config.api_base)?;

    match cli.command {
        Commands::Show { search, category } => {
            let mut dashboard = InventoryDashboard::new(client, config, PageLayout::full());
            dashboard.init();
            if let Some(text) = search.as_deref() {
                dashboard.search(text);
            }
            if let Some(category) = category.as_deref() {
                dashboard.filter_by_category(category);
            }
            print_page(dashboard.page(), cli.json)?;
        }
        Commands::Alerts => {
            let layout = PageLayout {
                alerts: true,
                ..PageLayout::empty()
            };
            let mut dashboard = InventoryDashboard::new(client, config, layout);
            dashboard.render_alerts();
            print_page(dashboard.page(), cli.json)?;
        }
        Commands::Summary => {
            let layout = PageLayout {
                total_count: true,
                expired_count: true,
                low_stock_count: true,
                chart: true,
                ..PageLayout::empty()
            };
            let mut dashboard = InventoryDashboard::new(client, config, layout);
            dashboard.render_summary();
            print_page(dashboard.page(), cli.json)?;
        }
        Commands::Delete { id, yes } => {
            let mut dashboard = InventoryDashboard::new(client, config, PageLayout::table_only());
            let outcome = if yes {
                dashboard.delete_medicine(id, &AssumeYes)
            } else {
                dashboard.delete_medicine(id, &StdinPrompt)
            };
            match outcome {
                DeleteOutcome::Cancelled => println!("Cancelled."),
                DeleteOutcome::Deleted => print_page(dashboard.page(), cli.json)?,
            }
        }
        Commands::Edit { id } => {
            let dashboard = InventoryDashboard::new(client, config, PageLayout::table_only());
            println!("{}", dashboard.edit_location(id));
        }
        Commands::Add { medicine } => {
            let id = client.create_medicine(&medicine.into())?;
            println!("Medicine added with id {id}");
        }
        Commands::Update { id, medicine } => {
            client.update_medicine(id, &medicine.into())?;
            println!("Medicine {id} updated");
        }
        Commands::Search { query } => {
            let results = client.search_medicines(&query)?;
            let table = build_medicine_table(&results, local_today());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print!("{}", TerminalRenderer::default().render_table(&table));
            }
        }
        Commands::Serve { bind } => {
            let state = ServerState::new(Arc::new(client), config);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(bind, state))?;
        }
    }

    Ok(())
}

fn print_page(page: &Page, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
    } else {
        print!("{}", TerminalRenderer::default().render(page));
    }
    Ok(())
}
