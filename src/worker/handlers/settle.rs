use std::fmt;

use crate::common::money::Money;
use crate::domain::ledger::Ledger;

/// Minimum allowed customer balance. A debit that would leave the balance
/// below this line is rejected; landing exactly on it is allowed.
pub const CREDIT_FLOOR: Money = Money::new(-200_000);

/// Outcome of one pending transaction. Rejections are expected per-transaction
/// results, not errors; none of them aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Settled {
        total_cost: Money,
    },
    CustomerNotFound {
        customer_id: u32,
    },
    ProductNotFound {
        product_name: String,
    },
    InsufficientInventory {
        product_name: String,
        available: u32,
        requested: u32,
    },
    InsufficientBalance {
        customer_id: u32,
        total_cost: Money,
    },
}

impl Outcome {
    pub fn is_settled(&self) -> bool {
        matches!(self, Outcome::Settled { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Settled { .. } => write!(f, "Completed successfully"),
            Outcome::CustomerNotFound { customer_id } => {
                write!(f, "Customer with ID {customer_id} not found")
            }
            Outcome::ProductNotFound { product_name } => {
                write!(f, "Product with name {product_name} not found")
            }
            Outcome::InsufficientInventory { product_name, .. } => {
                write!(f, "Insufficient inventory for product {product_name}")
            }
            Outcome::InsufficientBalance { .. } => write!(f, "Insufficient customer balance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Position of the transaction in the ledger's stored order.
    pub index: usize,
    pub outcome: Outcome,
}

/// Per-transaction outcomes of one settlement run, in processing order.
/// Already-completed transactions do not appear.
#[derive(Debug, Default)]
pub struct SettlementReport {
    entries: Vec<ReportEntry>,
}

impl SettlementReport {
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn settled_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.is_settled())
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.entries.len() - self.settled_count()
    }

    fn push(&mut self, index: usize, outcome: Outcome) {
        self.entries.push(ReportEntry { index, outcome });
    }
}

/// Settles every pending transaction in stored order.
///
/// Each transaction is validated against the cumulative state left by the
/// ones processed before it in the same run. A settled transaction mutates
/// stock, balance, the completed flag and the sales statistics as a unit;
/// a rejected one mutates nothing. Completed transactions are skipped
/// entirely, which makes repeated invocations no-ops until new pending work
/// arrives.
pub fn handle(ledger: &mut Ledger) -> SettlementReport {
    let mut report = SettlementReport::default();
    for index in 0..ledger.transactions.len() {
        if ledger.transactions[index].completed {
            continue;
        }
        let outcome = settle_one(ledger, index);
        report.push(index, outcome);
    }
    report
}

fn settle_one(ledger: &mut Ledger, index: usize) -> Outcome {
    let (customer_id, quantity) = {
        let tx = &ledger.transactions[index];
        (tx.customer_id, tx.quantity)
    };

    let Some(customer_pos) = ledger.customer_position(customer_id) else {
        return Outcome::CustomerNotFound { customer_id };
    };
    let Some(product_pos) = ledger.product_position(&ledger.transactions[index].product_name)
    else {
        return Outcome::ProductNotFound {
            product_name: ledger.transactions[index].product_name.clone(),
        };
    };

    let product = &ledger.products[product_pos];
    let total_cost = product.unit_price * quantity;

    if product.inventory < quantity {
        return Outcome::InsufficientInventory {
            product_name: product.name.clone(),
            available: product.inventory,
            requested: quantity,
        };
    }
    if ledger.customers[customer_pos].balance - total_cost < CREDIT_FLOOR {
        return Outcome::InsufficientBalance {
            customer_id,
            total_cost,
        };
    }

    // Apply as a unit: stock, balance, completion flag and statistics.
    let product_name = product.name.clone();
    ledger.products[product_pos].inventory -= quantity;
    ledger.customers[customer_pos].balance -= total_cost;
    ledger.transactions[index].completed = true;
    ledger.stats.record_sale(&product_name, customer_id, total_cost);

    Outcome::Settled { total_cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{customer::Customer, product::Product, transaction::Transaction};

    fn money(v: i64) -> Money {
        Money::new(v)
    }

    fn ledger_with(
        products: Vec<Product>,
        customers: Vec<Customer>,
        transactions: Vec<Transaction>,
    ) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.products = products;
        ledger.customers = customers;
        ledger.transactions = transactions;
        ledger
    }

    #[test]
    fn settles_pending_transaction_and_mutates_only_involved_records() {
        let mut ledger = ledger_with(
            vec![
                Product::new("bolt", 10, money(50)),
                Product::new("nut", 20, money(5)),
            ],
            vec![
                Customer::new("Ada", "Lovelace", 7, money(1000)),
                Customer::new("Alan", "Turing", 9, money(400)),
            ],
            vec![Transaction::new(7, "bolt", 3)],
        );

        let report = handle(&mut ledger);

        assert_eq!(report.settled_count(), 1);
        assert_eq!(report.rejected_count(), 0);
        assert_eq!(
            report.entries()[0].outcome,
            Outcome::Settled {
                total_cost: money(150)
            }
        );

        // exactly the involved product and customer change
        assert_eq!(ledger.products[0].inventory, 7);
        assert_eq!(ledger.products[1].inventory, 20);
        assert_eq!(ledger.customers[0].balance, money(850));
        assert_eq!(ledger.customers[1].balance, money(400));
        assert!(ledger.transactions[0].completed);
    }

    #[test]
    fn records_matching_stats_for_settled_transaction() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 10, money(50))],
            vec![Customer::new("Ada", "Lovelace", 7, money(0))],
            vec![Transaction::new(7, "bolt", 3)],
        );

        handle(&mut ledger);

        assert_eq!(ledger.stats.product_revenue("bolt"), money(150));
        assert_eq!(ledger.stats.customer_spend(7), money(150));
    }

    #[test]
    fn unknown_customer_is_rejected_without_mutation() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 10, money(50))],
            vec![Customer::new("Ada", "Lovelace", 7, money(1000))],
            vec![Transaction::new(999, "bolt", 1)],
        );

        let report = handle(&mut ledger);

        assert_eq!(
            report.entries()[0].outcome,
            Outcome::CustomerNotFound { customer_id: 999 }
        );
        assert_eq!(ledger.products[0].inventory, 10);
        assert_eq!(ledger.customers[0].balance, money(1000));
        assert!(ledger.transactions[0].is_pending());
        assert!(ledger.stats.is_empty());
    }

    #[test]
    fn unknown_product_is_rejected_without_mutation() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 10, money(50))],
            vec![Customer::new("Ada", "Lovelace", 7, money(1000))],
            vec![Transaction::new(7, "girder", 1)],
        );

        let report = handle(&mut ledger);

        assert_eq!(
            report.entries()[0].outcome,
            Outcome::ProductNotFound {
                product_name: "girder".to_owned()
            }
        );
        assert!(ledger.transactions[0].is_pending());
        assert!(ledger.stats.is_empty());
    }

    #[test]
    fn insufficient_inventory_is_rejected_without_mutation() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 2, money(50))],
            vec![Customer::new("Ada", "Lovelace", 7, money(1000))],
            vec![Transaction::new(7, "bolt", 3)],
        );

        let report = handle(&mut ledger);

        assert_eq!(
            report.entries()[0].outcome,
            Outcome::InsufficientInventory {
                product_name: "bolt".to_owned(),
                available: 2,
                requested: 3,
            }
        );
        assert_eq!(ledger.products[0].inventory, 2);
        assert_eq!(ledger.customers[0].balance, money(1000));
        assert!(ledger.transactions[0].is_pending());
    }

    #[test]
    fn debit_breaking_the_credit_floor_is_rejected() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 10, money(250000))],
            vec![Customer::new("Ada", "Lovelace", 7, money(0))],
            vec![Transaction::new(7, "bolt", 1)],
        );

        let report = handle(&mut ledger);

        assert_eq!(
            report.entries()[0].outcome,
            Outcome::InsufficientBalance {
                customer_id: 7,
                total_cost: money(250000),
            }
        );
        assert_eq!(ledger.customers[0].balance, money(0));
        assert_eq!(ledger.products[0].inventory, 10);
        assert!(ledger.transactions[0].is_pending());
    }

    #[test]
    fn debit_landing_exactly_on_the_floor_settles() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 1, money(200000))],
            vec![Customer::new("Ada", "Lovelace", 7, money(0))],
            vec![Transaction::new(7, "bolt", 1)],
        );

        let report = handle(&mut ledger);

        assert_eq!(report.settled_count(), 1);
        assert_eq!(ledger.customers[0].balance, CREDIT_FLOOR);
    }

    #[test]
    fn later_transactions_see_cumulative_balance_effects() {
        // Two debits of 150000 against a zero balance: the first lands at
        // -150000, the second would land at -300000 and is rejected.
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 10, money(150000))],
            vec![Customer::new("Ada", "Lovelace", 7, money(0))],
            vec![Transaction::new(7, "bolt", 1), Transaction::new(7, "bolt", 1)],
        );

        let report = handle(&mut ledger);

        assert!(report.entries()[0].outcome.is_settled());
        assert_eq!(
            report.entries()[1].outcome,
            Outcome::InsufficientBalance {
                customer_id: 7,
                total_cost: money(150000),
            }
        );
        assert_eq!(ledger.customers[0].balance, money(-150000));
        assert_eq!(ledger.products[0].inventory, 9);
        assert!(ledger.transactions[0].completed);
        assert!(ledger.transactions[1].is_pending());
    }

    #[test]
    fn later_transactions_see_cumulative_inventory_effects() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 4, money(10))],
            vec![Customer::new("Ada", "Lovelace", 7, money(1000))],
            vec![Transaction::new(7, "bolt", 3), Transaction::new(7, "bolt", 2)],
        );

        let report = handle(&mut ledger);

        assert!(report.entries()[0].outcome.is_settled());
        assert_eq!(
            report.entries()[1].outcome,
            Outcome::InsufficientInventory {
                product_name: "bolt".to_owned(),
                available: 1,
                requested: 2,
            }
        );
        assert_eq!(ledger.products[0].inventory, 1);
    }

    #[test]
    fn rejection_does_not_block_later_transactions() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 10, money(50))],
            vec![Customer::new("Ada", "Lovelace", 7, money(1000))],
            vec![
                Transaction::new(999, "bolt", 1),
                Transaction::new(7, "bolt", 2),
            ],
        );

        let report = handle(&mut ledger);

        assert_eq!(report.entries().len(), 2);
        assert!(!report.entries()[0].outcome.is_settled());
        assert!(report.entries()[1].outcome.is_settled());
        assert_eq!(ledger.products[0].inventory, 8);
    }

    #[test]
    fn completed_transactions_are_skipped_entirely() {
        let mut done = Transaction::new(7, "bolt", 5);
        done.completed = true;
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 10, money(50))],
            vec![Customer::new("Ada", "Lovelace", 7, money(1000))],
            vec![done, Transaction::new(7, "bolt", 1)],
        );

        let report = handle(&mut ledger);

        // only the pending transaction shows up, with its stored index
        assert_eq!(report.entries().len(), 1);
        assert_eq!(report.entries()[0].index, 1);
        assert_eq!(ledger.products[0].inventory, 9);
        assert_eq!(ledger.stats.product_revenue("bolt"), money(50));
    }

    #[test]
    fn second_run_with_no_new_work_is_a_noop() {
        let mut ledger = ledger_with(
            vec![Product::new("bolt", 10, money(50))],
            vec![Customer::new("Ada", "Lovelace", 7, money(1000))],
            vec![Transaction::new(7, "bolt", 3)],
        );

        let first = handle(&mut ledger);
        assert_eq!(first.settled_count(), 1);

        let second = handle(&mut ledger);
        assert!(second.entries().is_empty());
        assert_eq!(ledger.products[0].inventory, 7);
        assert_eq!(ledger.customers[0].balance, money(850));
        assert_eq!(ledger.stats.product_revenue("bolt"), money(150));
        assert_eq!(ledger.stats.customer_spend(7), money(150));
    }

    #[test]
    fn duplicate_product_names_resolve_to_the_first_record() {
        let mut ledger = ledger_with(
            vec![
                Product::new("bolt", 5, money(10)),
                Product::new("bolt", 100, money(99)),
            ],
            vec![Customer::new("Ada", "Lovelace", 7, money(1000))],
            vec![Transaction::new(7, "bolt", 2)],
        );

        let report = handle(&mut ledger);

        assert_eq!(
            report.entries()[0].outcome,
            Outcome::Settled {
                total_cost: money(20)
            }
        );
        assert_eq!(ledger.products[0].inventory, 3);
        assert_eq!(ledger.products[1].inventory, 100);
    }

    #[test]
    fn zero_price_product_settles_with_zero_cost() {
        let mut ledger = ledger_with(
            vec![Product::new("flyer", 10, money(0))],
            vec![Customer::new("Ada", "Lovelace", 7, money(0))],
            vec![Transaction::new(7, "flyer", 2)],
        );

        let report = handle(&mut ledger);

        assert!(report.entries()[0].outcome.is_settled());
        assert_eq!(ledger.customers[0].balance, money(0));
        assert_eq!(ledger.products[0].inventory, 8);
        assert_eq!(ledger.stats.product_revenue("flyer"), money(0));
    }
}
