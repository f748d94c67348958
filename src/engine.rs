use crate::{errors::EngineError, orders::Order};
use tracing::{info, warn};

/// An [`OrderHistoryEngine`] owns the append-only history of every order it
/// has ingested and answers fraud-relevant aggregate queries over it:
///
/// - the customer's average historical order quantity
/// - the quantity spread (max − min) observed at a given price point
///
/// Insertion order is preserved and nothing is ever removed; the only
/// mutation is the append performed by
/// [`add_order_and_get_fraudulent_quantity`](Self::add_order_and_get_fraudulent_quantity).
pub struct OrderHistoryEngine {
    history: Vec<Order>,
}

impl OrderHistoryEngine {
    /// Creates a new engine with an empty order history.
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
        }
    }

    /// Creates an engine seeded with an existing history, e.g. one loaded
    /// from a checkout export. The sequence is taken as-is: no reordering,
    /// no duplicate-id filtering.
    pub fn with_history(history: Vec<Order>) -> Self {
        Self { history }
    }

    /// The full ingested history, oldest first.
    pub fn history(&self) -> &[Order] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Average order quantity over this customer's history, truncating
    /// toward zero.
    ///
    /// Returns `0` when the customer has no orders at all — the "new
    /// customer" case is not an error here, so callers must not read `0`
    /// as proof the customer is known.
    pub fn average_order_quantity_by_customer(&self, customer: u64) -> i64 {
        let mut sum: i64 = 0;
        let mut count: i64 = 0;
        for order in self.history.iter().filter(|o| o.customer == customer) {
            sum += order.quantity;
            count += 1;
        }
        if count == 0 { 0 } else { sum / count }
    }

    /// Quantity spread (max − min) among all orders at exactly `price`,
    /// across every customer.
    ///
    /// A wide spread at one price point is a weak fraud signal independent
    /// of any single customer's history. Fewer than two matching orders
    /// give no spread, so the result degrades to `0`.
    pub fn quantity_pattern_by_price(&self, price: i64) -> i64 {
        let mut quantities = self.history.iter().filter(|o| o.price == price).map(|o| o.quantity);
        let Some(first) = quantities.next() else {
            return 0;
        };
        let (mut min, mut max) = (first, first);
        for q in quantities {
            min = min.min(q);
            max = max.max(q);
        }
        max - min
    }

    /// The portion of `order.quantity` that exceeds the customer's average
    /// over the *current* history (the candidate itself is not counted
    /// unless it was already ingested). At or below average, the excess
    /// is `0`.
    ///
    /// Unlike the plain average query, scoring a customer with zero prior
    /// orders is an error: there is no baseline to compare against.
    pub fn customer_fraudulent_quantity(&self, order: &Order) -> Result<i64, EngineError> {
        if !self.history.iter().any(|o| o.customer == order.customer) {
            return Err(EngineError::CustomerNotFound(order.customer));
        }
        let average = self.average_order_quantity_by_customer(order.customer);
        Ok((order.quantity - average).max(0))
    }

    /// Scores an incoming order and appends it to the history.
    ///
    /// The score is the stronger of the two heuristics: the customer's
    /// excess over their own average, or the quantity spread at the
    /// order's price.
    ///
    /// Re-ingesting an id already in the history is an idempotent no-op
    /// that returns `Ok(0)`, so checkout retries are absorbed silently.
    /// A `CustomerNotFound` failure leaves the history untouched.
    pub fn add_order_and_get_fraudulent_quantity(
        &mut self,
        order: Order,
    ) -> Result<i64, EngineError> {
        if self.history.iter().any(|o| o.id == order.id) {
            warn!("order {} already ingested, ignoring duplicate", order.id);
            return Ok(0);
        }
        let excess = self.customer_fraudulent_quantity(&order)?;
        let spread = self.quantity_pattern_by_price(order.price);
        let score = excess.max(spread);
        info!(
            "scored order {} for customer {}: excess={} spread={} score={}",
            order.id, order.customer, excess, spread, score
        );
        self.history.push(order);
        Ok(score)
    }
}

impl Default for OrderHistoryEngine {
    fn default() -> Self {
        Self::new()
    }
}
