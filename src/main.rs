// Storage Spots demo: builds one location, rents a few units, bills a month

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use rust_decimal_macros::dec;
use std::path::PathBuf;

use storage_spots::{format_currency, Customer, LocationConfig, StorageLocation, UnitType};

/// Walk through renting and billing at a single storage location
#[derive(Parser, Debug)]
#[command(name = "storage-spots")]
#[command(version)]
struct Cli {
    /// Location designation: state, two digits, city (e.g. WA23Issaquah)
    #[arg(short, long, default_value = "WA23Issaquah")]
    designation: String,

    /// JSON file with grid shape, row bands and pricing
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final location snapshot as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => LocationConfig::from_file(path)?,
        None => LocationConfig::default(),
    };

    // Set up location and some sample customers
    let mut location = StorageLocation::with_config(cli.designation.as_str(), config)
        .with_context(|| format!("Failed to create location {:?}", cli.designation))?;
    location.add_customer(Customer::new("Pat Perkins", "425-555-1314")?);
    location.add_customer(Customer::new("Chris Connoly", "425-555-3141")?);

    if !cli.json {
        println!("Storage Location : {}", location.designation());
        println!("Customer count   : {:>3}", location.customer_count());
        println!("Empty unit count : {:>3}", location.empty_units(None).len());

        println!("\nCustomers");
        for (idx, customer) in location.customers().iter().enumerate() {
            println!("  {:>2}. {} ({})", idx, customer.name(), customer.phone());
        }

        println!("\nUnits per type");
        for unit_type in UnitType::ALL {
            let rows = location.config().rows_of_type(unit_type);
            println!(
                "  {:<11} : {:>3} rows, {:>4} units",
                unit_type.as_str(),
                rows,
                rows * location.units_per_row_count()
            );
        }
    }

    // Rent two units to Pat
    let pat = location.customer(0)?.clone();
    let today = Local::now().date_naive();
    location.storage_unit_mut(1, 5)?.rent(&pat, today, dec!(199.95))?;
    location.storage_unit_mut(1, 6)?.rent(&pat, today, dec!(199.95))?;

    if cli.json {
        location.charge_monthly_rent();
        println!("{}", serde_json::to_string_pretty(&location.snapshot())?);
        return Ok(());
    }

    println!("\nRenting two units to {}", pat.name());
    println!("Empty count               : {:>3}", location.empty_units(None).len());
    println!(
        "Pat's unit count          : {:>3}",
        location.customer_units(Some(&pat)).map_or(0, |units| units.len())
    );
    println!(
        "Empty standard unit count : {:>3}",
        location.empty_units(Some(UnitType::Standard)).len()
    );
    println!(
        "Empty humidity unit count : {:>3}",
        location.empty_units(Some(UnitType::Humidity)).len()
    );

    println!("\nShowing storage units, rented and unrented");
    println!("{}", location.storage_unit(1, 5)?);
    println!("{}", location.storage_unit(0, 4)?);
    println!();

    // Charge a month of rent
    println!(
        "Pat's balance before charging monthly rent :  {:>10}",
        format_currency(pat.balance())
    );
    let total = location.charge_monthly_rent();
    println!(
        "Pat's balance after charging monthly rent  :  {:>10}",
        format_currency(pat.balance())
    );
    println!(
        "Total rent charged for all units           :  {:>10}",
        format_currency(total)
    );

    Ok(())
}
