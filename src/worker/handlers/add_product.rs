use crate::common::money::Money;
use crate::domain::{ledger::Ledger, product::Product};

/// Appends a product to the catalog. Duplicate names are not rejected;
/// settlement keeps resolving them to the earliest record.
pub fn handle(ledger: &mut Ledger, name: impl Into<String>, inventory: u32, unit_price: Money) {
    ledger
        .products
        .push(Product::new(name, inventory, unit_price));
}
