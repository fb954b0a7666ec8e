use std::io::{BufRead, BufWriter, Write, stdin, stdout};
use std::path::Path;

use tracing::{info, warn};

use crate::common::error::AppError;
use crate::common::money::Money;
use crate::domain::{
    ledger::Ledger,
    staff::{Role, Staff},
};
use crate::io::{export, store::Store};
use crate::worker::{
    handlers::{add_product, settle},
    reports,
};

/// Entry point for the interactive session. The optional first argument is
/// the data directory holding the record files (defaults to the current
/// directory).
pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    let data_dir = args.get(1).map(String::as_str).unwrap_or(".");
    let store = Store::new(Path::new(data_dir));

    let staff = store.load_staff()?;
    let mut ledger = store.load_ledger()?;

    let stdin = stdin();
    let stdout = stdout();
    let mut output = BufWriter::new(stdout.lock());
    session_loop(stdin.lock(), &mut output, &staff, &mut ledger, &store)
}

/// Reads one trimmed line; `None` on end of input.
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn login<'a>(staff: &'a [Staff], username: &str, password: &str) -> Option<&'a Staff> {
    staff
        .iter()
        .find(|s| s.username == username && s.password == password)
}

/// Login loop. Ends cleanly on end of input or an empty username.
pub fn session_loop<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    staff: &[Staff],
    ledger: &mut Ledger,
    store: &Store,
) -> Result<(), AppError> {
    writeln!(output, "=== Warehouse Management System ===")?;
    loop {
        write!(output, "\nUsername: ")?;
        output.flush()?;
        let username = match read_line(&mut input)? {
            Some(line) if !line.is_empty() => line,
            _ => return Ok(()),
        };
        write!(output, "Password: ")?;
        output.flush()?;
        let Some(password) = read_line(&mut input)? else {
            return Ok(());
        };

        match login(staff, &username, &password) {
            Some(member) => {
                writeln!(output, "Welcome, {}!", member.username)?;
                match member.role {
                    Role::Admin => admin_menu(&mut input, output, ledger)?,
                    Role::Employee => employee_menu(&mut input, output, ledger, store)?,
                    Role::Warehouse => warehouse_menu(&mut input, output, ledger, store)?,
                    Role::Unknown => writeln!(output, "Unknown user role.")?,
                }
            }
            None => {
                warn!(username = %username, "rejected login");
                writeln!(output, "Invalid username or password. Please try again.")?;
            }
        }
    }
}

fn admin_menu<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    ledger: &Ledger,
) -> Result<(), AppError> {
    loop {
        writeln!(output, "\n=== Admin Menu ===")?;
        writeln!(output, "1. View inventory")?;
        writeln!(output, "2. View customers")?;
        writeln!(output, "3. View best selling product")?;
        writeln!(output, "4. View best customer")?;
        writeln!(output, "5. Export sales report")?;
        writeln!(output, "6. Log out")?;
        write!(output, "Please select an option: ")?;
        output.flush()?;

        let Some(choice) = read_line(input)? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => show_products(output, ledger)?,
            "2" => show_customers(output, ledger)?,
            "3" => show_top_product(output, ledger)?,
            "4" => show_top_customer(output, ledger)?,
            "5" => export_sales_report(output, ledger)?,
            "6" => return Ok(()),
            _ => writeln!(output, "Invalid option, please try again.")?,
        }
    }
}

fn employee_menu<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    ledger: &mut Ledger,
    store: &Store,
) -> Result<(), AppError> {
    loop {
        writeln!(output, "\n=== Employee Menu ===")?;
        writeln!(output, "1. View inventory")?;
        writeln!(output, "2. View customers")?;
        writeln!(output, "3. Process transactions")?;
        writeln!(output, "4. Log out")?;
        write!(output, "Please select an option: ")?;
        output.flush()?;

        let Some(choice) = read_line(input)? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => show_products(output, ledger)?,
            "2" => show_customers(output, ledger)?,
            "3" => process_transactions(output, ledger, store)?,
            "4" => return Ok(()),
            _ => writeln!(output, "Invalid option, please try again.")?,
        }
    }
}

fn warehouse_menu<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    ledger: &mut Ledger,
    store: &Store,
) -> Result<(), AppError> {
    loop {
        writeln!(output, "\n=== Warehouse Menu ===")?;
        writeln!(output, "1. View inventory")?;
        writeln!(output, "2. Add new product")?;
        writeln!(output, "3. Log out")?;
        write!(output, "Please select an option: ")?;
        output.flush()?;

        let Some(choice) = read_line(input)? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => show_products(output, ledger)?,
            "2" => prompt_add_product(input, output, ledger, store)?,
            "3" => return Ok(()),
            _ => writeln!(output, "Invalid option, please try again.")?,
        }
    }
}

fn show_products<W: Write>(output: &mut W, ledger: &Ledger) -> Result<(), AppError> {
    writeln!(output, "\n=== Product List ===")?;
    for (i, product) in ledger.products.iter().enumerate() {
        if !product.name.is_empty() {
            writeln!(
                output,
                "{}. Name: {}, Inventory: {}, Price: {}",
                i + 1,
                product.name,
                product.inventory,
                product.unit_price
            )?;
        }
    }
    writeln!(output, "====================")?;
    Ok(())
}

fn show_customers<W: Write>(output: &mut W, ledger: &Ledger) -> Result<(), AppError> {
    writeln!(output, "\n=== Customer List ===")?;
    for (i, customer) in ledger.customers.iter().enumerate() {
        if !customer.first_name.is_empty() {
            writeln!(
                output,
                "{}. Name: {}, ID: {}, Balance: {}",
                i + 1,
                customer.full_name(),
                customer.id,
                customer.balance
            )?;
        }
    }
    writeln!(output, "====================")?;
    Ok(())
}

fn show_top_product<W: Write>(output: &mut W, ledger: &Ledger) -> Result<(), AppError> {
    writeln!(output, "\n=== Best Selling Product ===")?;
    match reports::top_product(&ledger.stats) {
        Some(top) => writeln!(
            output,
            "Best selling product: {} with {} in sales",
            top.name, top.revenue
        )?,
        None => writeln!(output, "No transactions recorded yet.")?,
    }
    writeln!(output, "========================")?;
    Ok(())
}

fn show_top_customer<W: Write>(output: &mut W, ledger: &Ledger) -> Result<(), AppError> {
    writeln!(output, "\n=== Best Customer ===")?;
    match reports::top_customer(ledger) {
        Some(top) => writeln!(
            output,
            "Best customer: {} with {} in purchases",
            top.full_name, top.spend
        )?,
        None => writeln!(output, "No transactions recorded yet.")?,
    }
    writeln!(output, "=====================")?;
    Ok(())
}

fn export_sales_report<W: Write>(output: &mut W, ledger: &Ledger) -> Result<(), AppError> {
    writeln!(output, "\n=== Sales Report ===")?;
    export::write_product_sales(&mut *output, &ledger.stats)?;
    export::write_customer_sales(&mut *output, ledger)?;
    writeln!(output, "====================")?;
    Ok(())
}

/// Runs the settlement engine over the pending transactions, renders every
/// per-transaction outcome and persists the mutated records.
fn process_transactions<W: Write>(
    output: &mut W,
    ledger: &mut Ledger,
    store: &Store,
) -> Result<(), AppError> {
    writeln!(output, "\n=== Processing Transactions ===")?;
    let report = settle::handle(ledger);
    for entry in report.entries() {
        writeln!(output, "Transaction {}: {}", entry.index + 1, entry.outcome)?;
    }
    store.save_ledger(ledger)?;
    info!(
        settled = report.settled_count(),
        rejected = report.rejected_count(),
        "settlement run finished"
    );
    writeln!(output, "Transaction processing completed.")?;
    Ok(())
}

fn prompt_add_product<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    ledger: &mut Ledger,
    store: &Store,
) -> Result<(), AppError> {
    write!(output, "Product name: ")?;
    output.flush()?;
    let Some(name) = read_line(input)? else {
        return Ok(());
    };
    write!(output, "Inventory quantity: ")?;
    output.flush()?;
    let Some(inventory) = read_line(input)? else {
        return Ok(());
    };
    write!(output, "Unit price: ")?;
    output.flush()?;
    let Some(price) = read_line(input)? else {
        return Ok(());
    };

    let (Ok(inventory), Ok(price)) = (inventory.parse::<u32>(), price.parse::<Money>()) else {
        writeln!(output, "Invalid number, product not added.")?;
        return Ok(());
    };

    add_product::handle(ledger, name, inventory, price);
    store.save_products(&ledger.products)?;
    writeln!(output, "Product added successfully.")?;
    Ok(())
}
