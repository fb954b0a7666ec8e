use std::io::Write;

use crate::domain::{ledger::Ledger, stats::SalesStats};

#[derive(serde::Serialize)]
/// CSV row for the per-product section of the sales report.
/// Headers written (in this order): `product,revenue`.
struct ProductSalesRow {
    product: String,
    revenue: i64,
}

#[derive(serde::Serialize)]
/// CSV row for the per-customer section of the sales report.
/// Headers written (in this order): `customer_id,name,spend`.
struct CustomerSalesRow {
    customer_id: u32,
    name: String,
    spend: i64,
}

/// Writes cumulative settled revenue per product as CSV.
///
/// For deterministic output, rows are sorted by product name ascending.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use warehouse_ledger::domain::stats::SalesStats;
/// use warehouse_ledger::io::export::write_product_sales;
/// use warehouse_ledger::common::money::Money;
///
/// let mut stats = SalesStats::new();
/// stats.record_sale("bolt", 7, Money::new(150));
///
/// let mut out = Vec::new();
/// write_product_sales(&mut out, &stats).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.starts_with("product,revenue\n"));
/// ```
pub fn write_product_sales<W: Write>(writer: W, stats: &SalesStats) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written explicitly so the header survives an empty report.
    wtr.write_record(["product", "revenue"])?;
    for (product, revenue) in stats.product_totals() {
        wtr.serialize(ProductSalesRow {
            product: product.to_owned(),
            revenue: revenue.as_i64(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes cumulative settled spend per customer as CSV, names resolved
/// against the roster. Rows are sorted by customer id ascending; a customer
/// missing from the roster gets an empty name.
pub fn write_customer_sales<W: Write>(writer: W, ledger: &Ledger) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(["customer_id", "name", "spend"])?;
    for (customer_id, spend) in ledger.stats.customer_totals() {
        let name = ledger
            .customer_by_id(customer_id)
            .map(|c| c.full_name())
            .unwrap_or_default();
        wtr.serialize(CustomerSalesRow {
            customer_id,
            name,
            spend: spend.as_i64(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
