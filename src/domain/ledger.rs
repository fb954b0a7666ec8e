use crate::domain::{
    customer::Customer, product::Product, stats::SalesStats, transaction::Transaction,
};

/// The combined in-memory state the settlement engine operates on.
///
/// Owned by the caller and passed by mutable borrow into the engine; there is
/// no shared global state. Records keep their stored order, which is the
/// order settlement processes them in.
#[derive(Debug, Default)]
pub struct Ledger {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
    pub stats: SalesStats,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_position(&self, id: u32) -> Option<usize> {
        self.customers.iter().position(|c| c.id == id)
    }

    /// First match wins; duplicate names resolve to the earliest record.
    pub fn product_position(&self, name: &str) -> Option<usize> {
        self.products.iter().position(|p| p.name == name)
    }

    pub fn customer_by_id(&self, id: u32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.transactions.iter().filter(|t| t.is_pending()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::money::Money;

    #[test]
    fn product_lookup_takes_first_match_on_duplicate_names() {
        let mut ledger = Ledger::new();
        ledger
            .products
            .push(Product::new("widget", 5, Money::new(10)));
        ledger
            .products
            .push(Product::new("widget", 99, Money::new(20)));

        let pos = ledger.product_position("widget").unwrap();
        assert_eq!(pos, 0);
        assert_eq!(ledger.products[pos].inventory, 5);
    }

    #[test]
    fn customer_lookup_is_by_exact_id() {
        let mut ledger = Ledger::new();
        ledger
            .customers
            .push(Customer::new("Ada", "Lovelace", 7, Money::zero()));

        assert_eq!(ledger.customer_position(7), Some(0));
        assert_eq!(ledger.customer_position(999), None);
        assert!(ledger.customer_by_id(999).is_none());
    }

    #[test]
    fn pending_count_ignores_completed_transactions() {
        let mut ledger = Ledger::new();
        ledger.transactions.push(Transaction::new(1, "widget", 1));
        let mut done = Transaction::new(1, "widget", 2);
        done.completed = true;
        ledger.transactions.push(done);

        assert_eq!(ledger.pending_count(), 1);
    }
}
