use std::io::Write;

use crate::domain::{customer::Customer, product::Product, transaction::Transaction};

/// Writes product records in load order, one field per line.
///
/// Output is a faithful round-trip of [`crate::io::reader::read_products`];
/// the caller truncates the destination first (overwrite, never append).
pub fn write_products<W: Write>(mut writer: W, products: &[Product]) -> std::io::Result<()> {
    for product in products {
        writeln!(writer, "{}", product.name)?;
        writeln!(writer, "{}", product.inventory)?;
        writeln!(writer, "{}", product.unit_price)?;
    }
    writer.flush()
}

pub fn write_customers<W: Write>(mut writer: W, customers: &[Customer]) -> std::io::Result<()> {
    for customer in customers {
        writeln!(writer, "{}", customer.first_name)?;
        writeln!(writer, "{}", customer.last_name)?;
        writeln!(writer, "{}", customer.id)?;
        writeln!(writer, "{}", customer.balance)?;
    }
    writer.flush()
}

pub fn write_transactions<W: Write>(
    mut writer: W,
    transactions: &[Transaction],
) -> std::io::Result<()> {
    for transaction in transactions {
        writeln!(writer, "{}", transaction.customer_id)?;
        writeln!(writer, "{}", transaction.product_name)?;
        writeln!(writer, "{}", transaction.quantity)?;
        writeln!(writer, "{}", transaction.completed)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::money::Money;
    use crate::io::reader;

    fn write_to_string<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
    {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn products_write_one_field_per_line_in_field_order() {
        let products = vec![
            Product::new("bolt", 12, Money::new(40)),
            Product::new("nut", 30, Money::new(15)),
        ];

        let s = write_to_string(|out| write_products(out, &products));
        assert_eq!(s, "bolt\n12\n40\nnut\n30\n15\n");
    }

    #[test]
    fn customers_round_trip_through_reader() {
        let customers = vec![
            Customer::new("Ada", "Lovelace", 7, Money::new(-150000)),
            Customer::new("Alan", "Turing", 9, Money::new(500)),
        ];

        let s = write_to_string(|out| write_customers(out, &customers));
        let back = reader::read_customers(s.as_bytes()).unwrap();
        assert_eq!(back, customers);
    }

    #[test]
    fn transactions_round_trip_preserves_completed_flag() {
        let mut done = Transaction::new(7, "bolt", 3);
        done.completed = true;
        let transactions = vec![done, Transaction::new(9, "nut", 1)];

        let s = write_to_string(|out| write_transactions(out, &transactions));
        assert_eq!(s, "7\nbolt\n3\ntrue\n9\nnut\n1\nfalse\n");

        let back = reader::read_transactions(s.as_bytes()).unwrap();
        assert_eq!(back, transactions);
    }

    #[test]
    fn empty_collections_write_nothing() {
        assert_eq!(write_to_string(|out| write_products(out, &[])), "");
        assert_eq!(write_to_string(|out| write_customers(out, &[])), "");
        assert_eq!(write_to_string(|out| write_transactions(out, &[])), "");
    }
}
