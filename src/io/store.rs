use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::common::error::AppError;
use crate::domain::{ledger::Ledger, product::Product, staff::Staff};
use crate::io::{reader, writer};

/// Durable record store: the four flat files under one data directory.
///
/// Load failures are fatal at startup; saves overwrite the files in full.
/// Sales statistics are deliberately not part of the store, only raw records
/// survive a restart.
#[derive(Debug, Clone)]
pub struct Store {
    products_path: PathBuf,
    customers_path: PathBuf,
    transactions_path: PathBuf,
    staff_path: PathBuf,
}

impl Store {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            products_path: data_dir.join("warehouse.txt"),
            customers_path: data_dir.join("customer.txt"),
            transactions_path: data_dir.join("transaction.txt"),
            staff_path: data_dir.join("staff.txt"),
        }
    }

    pub fn load_staff(&self) -> Result<Vec<Staff>, AppError> {
        let file = File::open(&self.staff_path)?;
        let staff = reader::read_staff(BufReader::new(file))?;
        info!(count = staff.len(), "loaded staff roster");
        Ok(staff)
    }

    /// Loads products, customers and transactions into a fresh ledger.
    /// Statistics start at zero; they are rebuilt by settlement only.
    pub fn load_ledger(&self) -> Result<Ledger, AppError> {
        let mut ledger = Ledger::new();

        let file = File::open(&self.products_path)?;
        ledger.products = reader::read_products(BufReader::new(file))?;

        let file = File::open(&self.customers_path)?;
        ledger.customers = reader::read_customers(BufReader::new(file))?;

        let file = File::open(&self.transactions_path)?;
        ledger.transactions = reader::read_transactions(BufReader::new(file))?;

        info!(
            products = ledger.products.len(),
            customers = ledger.customers.len(),
            transactions = ledger.transactions.len(),
            pending = ledger.pending_count(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    pub fn save_products(&self, products: &[Product]) -> Result<(), AppError> {
        let file = File::create(&self.products_path)?;
        writer::write_products(BufWriter::new(file), products)?;
        Ok(())
    }

    /// Persists everything settlement touches: products, customers and
    /// transactions, each file overwritten in full.
    pub fn save_ledger(&self, ledger: &Ledger) -> Result<(), AppError> {
        self.save_products(&ledger.products)?;

        let file = File::create(&self.customers_path)?;
        writer::write_customers(BufWriter::new(file), &ledger.customers)?;

        let file = File::create(&self.transactions_path)?;
        writer::write_transactions(BufWriter::new(file), &ledger.transactions)?;

        info!("saved ledger records");
        Ok(())
    }
}
