use std::io::BufRead;
use std::str::FromStr;

use crate::common::money::Money;
use crate::domain::{
    customer::Customer, product::Product, staff::Staff, transaction::Transaction,
};

/// Record files are line oriented: one field per line, records back to back
/// with no separator. A record cut short at end of file is dropped silently
/// and reading stops; malformed numeric fields read as zero and malformed
/// booleans as false. Only real read failures surface as errors.
fn next_field<R: BufRead>(lines: &mut std::io::Lines<R>) -> std::io::Result<Option<String>> {
    match lines.next() {
        Some(Ok(line)) => Ok(Some(line.trim().to_owned())),
        Some(Err(err)) => Err(err),
        None => Ok(None),
    }
}

fn parse_or_default<T: FromStr + Default>(field: &str) -> T {
    field.parse().unwrap_or_default()
}

/// Reads product records: name, inventory, unit price.
///
/// # Examples
///
/// ```
/// use warehouse_ledger::io::reader::read_products;
///
/// let data = "bolt\n12\n40\nnut\n30\n15\n";
/// let products = read_products(data.as_bytes()).unwrap();
///
/// assert_eq!(products.len(), 2);
/// assert_eq!(products[0].name, "bolt");
/// assert_eq!(products[1].inventory, 30);
/// ```
pub fn read_products<R: BufRead>(reader: R) -> std::io::Result<Vec<Product>> {
    let mut lines = reader.lines();
    let mut products = Vec::new();
    while let Some(name) = next_field(&mut lines)? {
        let Some(inventory) = next_field(&mut lines)? else {
            break;
        };
        let Some(price) = next_field(&mut lines)? else {
            break;
        };
        products.push(Product::new(
            name,
            parse_or_default::<u32>(&inventory),
            parse_or_default::<Money>(&price),
        ));
    }
    Ok(products)
}

/// Reads customer records: first name, last name, id, balance.
pub fn read_customers<R: BufRead>(reader: R) -> std::io::Result<Vec<Customer>> {
    let mut lines = reader.lines();
    let mut customers = Vec::new();
    while let Some(first_name) = next_field(&mut lines)? {
        let Some(last_name) = next_field(&mut lines)? else {
            break;
        };
        let Some(id) = next_field(&mut lines)? else {
            break;
        };
        let Some(balance) = next_field(&mut lines)? else {
            break;
        };
        customers.push(Customer::new(
            first_name,
            last_name,
            parse_or_default::<u32>(&id),
            parse_or_default::<Money>(&balance),
        ));
    }
    Ok(customers)
}

/// Reads transaction records: customer id, product name, quantity, completed.
pub fn read_transactions<R: BufRead>(reader: R) -> std::io::Result<Vec<Transaction>> {
    let mut lines = reader.lines();
    let mut transactions = Vec::new();
    while let Some(customer_id) = next_field(&mut lines)? {
        let Some(product_name) = next_field(&mut lines)? else {
            break;
        };
        let Some(quantity) = next_field(&mut lines)? else {
            break;
        };
        let Some(completed) = next_field(&mut lines)? else {
            break;
        };
        let mut transaction = Transaction::new(
            parse_or_default::<u32>(&customer_id),
            product_name,
            parse_or_default::<u32>(&quantity),
        );
        transaction.completed = parse_or_default::<bool>(&completed);
        transactions.push(transaction);
    }
    Ok(transactions)
}

/// Reads staff records: username, password. The role falls out of the
/// username prefix.
pub fn read_staff<R: BufRead>(reader: R) -> std::io::Result<Vec<Staff>> {
    let mut lines = reader.lines();
    let mut staff = Vec::new();
    while let Some(username) = next_field(&mut lines)? {
        let Some(password) = next_field(&mut lines)? else {
            break;
        };
        staff.push(Staff::new(username, password));
    }
    Ok(staff)
}
