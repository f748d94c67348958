use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::{
    engine::OrderHistoryEngine,
    orders::Order,
    simulate::{SimConfig, run_simulation, seed_history},
    state::AppState,
    utils::shutdown_token,
};

/// Simple CLI to interact with the fraud engine
#[derive(Parser)]
#[command(name = "Baloot Fraud Engine CLI")]
#[command(
    version = "0.1",
    about = "order-fraud scoring over an in-memory order history"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average historical order quantity for one customer
    Average {
        /// JSON file holding the order history (array of orders)
        #[arg(long)]
        history: PathBuf,
        customer: u64,
    },

    /// Quantity spread (max - min) at one price point
    Pattern {
        #[arg(long)]
        history: PathBuf,
        price: i64,
    },

    /// Score a candidate order against the history and ingest it
    Score {
        #[arg(long)]
        history: PathBuf,
        id: u64,
        customer: u64,
        price: i64,
        quantity: i64,
    },

    /// Display the order history as the engine sees it
    History {
        #[arg(long)]
        history: PathBuf,
    },

    /// Feed randomized checkout traffic into a shared engine
    Simulate {
        /// Total duration in seconds (runs until ctrl-c if omitted)
        #[arg(long)]
        run_secs: Option<u64>,

        /// Poisson arrival rate for incoming orders
        #[arg(long, default_value_t = 20.0)]
        arrival_rate_hz: f64,

        /// Mean order quantity
        #[arg(long, default_value_t = 5.0)]
        mean_qty: f64,

        /// Number of distinct customers
        #[arg(long, default_value_t = 8)]
        customers: u64,

        /// Number of distinct price points
        #[arg(long, default_value_t = 4)]
        price_levels: u64,

        /// Probability an order re-sends the previous id
        #[arg(long, default_value_t = 0.05)]
        retry_rate: f64,
    },
}

fn load_history(path: &Path) -> anyhow::Result<Vec<Order>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading order history from {}", path.display()))?;
    let history: Vec<Order> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing order history in {}", path.display()))?;
    Ok(history)
}

fn handle_average(history: Vec<Order>, customer: u64) {
    let engine = OrderHistoryEngine::with_history(history);
    let average = engine.average_order_quantity_by_customer(customer);
    println!("Average order quantity for customer {}: {}", customer, average);
}

fn handle_pattern(history: Vec<Order>, price: i64) {
    let engine = OrderHistoryEngine::with_history(history);
    let spread = engine.quantity_pattern_by_price(price);
    println!("Quantity spread at price {}: {}", price, spread);
}

fn handle_score(history: Vec<Order>, order: Order) -> anyhow::Result<()> {
    let mut engine = OrderHistoryEngine::with_history(history);
    let score = engine
        .add_order_and_get_fraudulent_quantity(order.clone())
        .with_context(|| format!("scoring order {}", order.id))?;
    if score > 0 {
        println!("Order {} flagged: fraudulent quantity {}", order.id, score);
    } else {
        println!("Order {} clean", order.id);
    }
    Ok(())
}

fn print_history(history: &[Order]) {
    println!("------ Order History ------");
    for order in history {
        println!(
            "id: {}, customer: {}, price: {}, qty: {}",
            order.id, order.customer, order.price, order.quantity
        );
    }
    println!("{} orders total", history.len());
    println!("---------------------------");
}

pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Average { history, customer } => {
            handle_average(load_history(&history)?, customer);
        }
        Commands::Pattern { history, price } => {
            handle_pattern(load_history(&history)?, price);
        }
        Commands::Score {
            history,
            id,
            customer,
            price,
            quantity,
        } => {
            let order = Order {
                id,
                customer,
                price,
                quantity,
            };
            handle_score(load_history(&history)?, order)?;
        }
        Commands::History { history } => {
            print_history(&load_history(&history)?);
        }
        Commands::Simulate {
            run_secs,
            arrival_rate_hz,
            mean_qty,
            customers,
            price_levels,
            retry_rate,
        } => {
            let cfg = SimConfig {
                run_secs,
                arrival_rate_hz,
                mean_qty,
                customers,
                price_levels,
                retry_rate,
            };
            let state = AppState::with_history(seed_history(&cfg));
            let token = shutdown_token();
            run_simulation(state, cfg, token).await?;
        }
    }
    Ok(())
}
