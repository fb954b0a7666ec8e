use std::collections::HashMap;

use crate::common::money::Money;

/// Running sale totals, keyed by product name and by customer id.
///
/// Updated exclusively by the settlement engine when a transaction settles.
/// Totals accumulate for the lifetime of the process and are never persisted;
/// a restart starts over from zero.
#[derive(Debug, Default)]
pub struct SalesStats {
    product_revenue: HashMap<String, Money>,
    customer_spend: HashMap<u32, Money>,
}

impl SalesStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sale(&mut self, product_name: &str, customer_id: u32, amount: Money) {
        *self
            .product_revenue
            .entry(product_name.to_owned())
            .or_insert_with(Money::zero) += amount;
        *self
            .customer_spend
            .entry(customer_id)
            .or_insert_with(Money::zero) += amount;
    }

    pub fn product_revenue(&self, name: &str) -> Money {
        self.product_revenue.get(name).copied().unwrap_or_default()
    }

    pub fn customer_spend(&self, id: u32) -> Money {
        self.customer_spend.get(&id).copied().unwrap_or_default()
    }

    /// Totals per product, sorted by name ascending so callers iterate
    /// deterministically.
    pub fn product_totals(&self) -> Vec<(&str, Money)> {
        let mut totals: Vec<(&str, Money)> = self
            .product_revenue
            .iter()
            .map(|(name, total)| (name.as_str(), *total))
            .collect();
        totals.sort_unstable_by(|a, b| a.0.cmp(b.0));
        totals
    }

    /// Totals per customer, sorted by id ascending.
    pub fn customer_totals(&self) -> Vec<(u32, Money)> {
        let mut totals: Vec<(u32, Money)> = self
            .customer_spend
            .iter()
            .map(|(id, total)| (*id, *total))
            .collect();
        totals.sort_unstable_by_key(|entry| entry.0);
        totals
    }

    pub fn is_empty(&self) -> bool {
        self.product_revenue.is_empty() && self.customer_spend.is_empty()
    }
}
