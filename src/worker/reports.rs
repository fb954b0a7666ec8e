use crate::common::money::Money;
use crate::domain::{ledger::Ledger, stats::SalesStats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopProduct {
    pub name: String,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopCustomer {
    pub id: u32,
    pub full_name: String,
    pub spend: Money,
}

/// Product with the strictly greatest cumulative settled revenue.
///
/// Candidates are scanned in ascending name order, so a tie keeps the
/// lexicographically smallest name. `None` when nothing has settled or no
/// total is above zero.
pub fn top_product(stats: &SalesStats) -> Option<TopProduct> {
    let mut best: Option<TopProduct> = None;
    for (name, revenue) in stats.product_totals() {
        let current_max = best.as_ref().map_or(Money::zero(), |b| b.revenue);
        if revenue > current_max {
            best = Some(TopProduct {
                name: name.to_owned(),
                revenue,
            });
        }
    }
    best
}

/// Customer with the strictly greatest cumulative settled spend, resolved to
/// a full name via the roster. Ties keep the smallest id; a top spender
/// missing from the roster yields `None`.
pub fn top_customer(ledger: &Ledger) -> Option<TopCustomer> {
    let mut best: Option<(u32, Money)> = None;
    for (id, spend) in ledger.stats.customer_totals() {
        let current_max = best.map_or(Money::zero(), |b| b.1);
        if spend > current_max {
            best = Some((id, spend));
        }
    }

    let (id, spend) = best?;
    let customer = ledger.customer_by_id(id)?;
    Some(TopCustomer {
        id,
        full_name: customer.full_name(),
        spend,
    })
}
