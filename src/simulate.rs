//! Simulation harness that stands in for the checkout service as the
//! engine's concurrent caller.
//!
//! Continuously feeds randomized orders into a shared [`AppState`] to:
//! 1. Watch the fraud heuristics fire on realistic, noisy order flow.
//! 2. Stress-test the ingest path under stochastic arrival rates and
//!    heavy-tailed order sizes, including retried (duplicate-id) orders.
//!
//! ## Components
//!
//! - `SimConfig` holds the simulation parameters:
//!   - `run_secs`: optional total duration in seconds; `None` runs until cancelled.
//!   - `arrival_rate_hz`: Poisson arrival rate (λ) for incoming orders (exponential inter-arrival).
//!   - `mean_qty`: average order size — each order samples an Exp(1) variate and multiplies
//!     it by `mean_qty`, giving heavy-tailed sizes around the mean.
//!   - `customers`: number of distinct customer ids in play.
//!   - `price_levels`: number of distinct price points orders are spread over.
//!   - `retry_rate`: probability an order re-sends the previous id, exercising
//!     the duplicate-absorption path the way flaky checkout retries would.
//! - `seed_history(cfg)`: one baseline order per customer, since the scoring
//!   operation rejects customers with no history at all.
//! - `run_simulation(state, cfg, cancel_token)`: the main loop — draw an
//!   inter-arrival delay from `Exp(λ)`, build a random order, ingest it under
//!   the state lock, and tally clean/flagged/duplicate/rejected outcomes.
//!
//! Supply a `CancellationToken` (e.g. tied to Ctrl-C) for clean shutdown.

use rand::Rng;
use rand_distr::{Distribution, Exp, Exp1};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{errors::EngineError, orders::Order, state::AppState};

#[derive(Clone)]
pub struct SimConfig {
    pub run_secs: Option<u64>,
    pub arrival_rate_hz: f64,
    pub mean_qty: f64,
    pub customers: u64,
    pub price_levels: u64,
    pub retry_rate: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            run_secs: Some(10),
            arrival_rate_hz: 20.0,
            mean_qty: 5.0,
            customers: 8,
            price_levels: 4,
            retry_rate: 0.05,
        }
    }
}

/// Running tallies of ingest outcomes, printed when the simulation stops.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimReport {
    pub clean: u64,
    pub flagged: u64,
    pub duplicates: u64,
    pub rejected: u64,
}

fn price_for_level(level: u64) -> i64 {
    // spaced price points so the spread heuristic has buckets to fill
    (level as i64 + 1) * 25
}

/// One baseline order per customer. Scoring rejects a customer with zero
/// prior orders, so a fresh engine needs this floor before the loop starts.
pub fn seed_history(cfg: &SimConfig) -> Vec<Order> {
    (1..=cfg.customers)
        .map(|customer| Order {
            id: customer,
            customer,
            price: price_for_level(customer % cfg.price_levels.max(1)),
            quantity: cfg.mean_qty.round() as i64,
        })
        .collect()
}

fn next_order(cfg: &SimConfig, next_id: &mut u64, last_id: u64) -> Order {
    let mut rng = rand::rng();
    let id = if rng.random_bool(cfg.retry_rate) {
        last_id
    } else {
        *next_id += 1;
        *next_id
    };
    let qty_draw: f64 = rng.sample(Exp1);
    Order {
        id,
        customer: rng.random_range(1..=cfg.customers),
        price: price_for_level(rng.random_range(0..cfg.price_levels.max(1))),
        quantity: (qty_draw * cfg.mean_qty).round() as i64,
    }
}

pub async fn run_simulation(
    state: AppState,
    cfg: SimConfig,
    cancel_token: CancellationToken,
) -> anyhow::Result<SimReport> {
    let inter_arrival = Exp::new(cfg.arrival_rate_hz)?;
    let start = Instant::now();
    let mut report = SimReport::default();
    // seed ids occupy 1..=customers
    let mut next_id = cfg.customers;
    let mut last_id = cfg.customers;

    loop {
        if let Some(secs) = cfg.run_secs {
            if start.elapsed() >= Duration::from_secs(secs) {
                break;
            }
        }
        let delay = inter_arrival.sample(&mut rand::rng());
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = sleep(Duration::from_secs_f64(delay)) => {}
        }

        let order = next_order(&cfg, &mut next_id, last_id);
        let is_retry = order.id == last_id;
        last_id = next_id;

        let outcome = {
            let mut engine = state.engine.lock().unwrap();
            engine.add_order_and_get_fraudulent_quantity(order.clone())
        };
        match outcome {
            Ok(0) if is_retry => report.duplicates += 1,
            Ok(0) => report.clean += 1,
            Ok(score) => {
                report.flagged += 1;
                warn!(
                    "flagged order {} (customer {} qty {}): fraudulent quantity {}",
                    order.id, order.customer, order.quantity, score
                );
            }
            Err(EngineError::CustomerNotFound(customer)) => {
                report.rejected += 1;
                warn!("rejected order {}: customer {} has no history", order.id, customer);
            }
        }

        println!(
            "[{:.1}s] order={} customer={} price={} qty={} clean={} flagged={} dup={} rejected={}",
            start.elapsed().as_secs_f64(),
            order.id,
            order.customer,
            order.price,
            order.quantity,
            report.clean,
            report.flagged,
            report.duplicates,
            report.rejected,
        );
    }
    println!(
        "--- done --- clean={} flagged={} duplicates={} rejected={}",
        report.clean, report.flagged, report.duplicates, report.rejected
    );
    Ok(report)
}
