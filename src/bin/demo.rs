//! Demo storefront session.
//!
//! Fills a cart from the sample catalogue, prints the lines and totals, and
//! walks a registration through a couple of point awards.

use std::error::Error;

use clap::Parser;
use tabled::{Table, Tabled};

use levelup::{
    fixtures::sample_catalog,
    prelude::*,
};

/// Arguments for the demo session
#[derive(Debug, Parser)]
struct DemoArgs {
    /// Number of sample products to add to the cart
    #[clap(short, long, default_value_t = 3)]
    n: usize,

    /// Directory for a file-backed store; in-memory when omitted
    #[clap(short, long)]
    store: Option<String>,

    /// Username to register for the loyalty walkthrough
    #[clap(short, long, default_value = "valentina")]
    username: String,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Code")]
    code: String,

    #[tabled(rename = "Product")]
    name: String,

    #[tabled(rename = "Qty")]
    quantity: u32,

    #[tabled(rename = "Unit")]
    unit_price: String,

    #[tabled(rename = "Total")]
    line_total: String,
}

impl From<&CartLineItem> for LineRow {
    fn from(line: &CartLineItem) -> Self {
        Self {
            code: line.product().code().to_owned(),
            name: line.product().name().to_owned(),
            quantity: line.quantity(),
            unit_price: line.product().unit_price().to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = DemoArgs::parse();

    let store: Box<dyn KeyValueStore> = match &args.store {
        Some(dir) => Box::new(FileStore::open(dir.as_str())?),
        None => Box::new(MemoryStore::new()),
    };

    let mut session = Session::open(store, CartConfig::default(), LevelTable::default())?;
    let catalog = sample_catalog()?;

    for product in catalog.iter().take(args.n) {
        session.add_item(product.clone(), 1)?;
    }

    let rows: Vec<LineRow> = session.cart().lines().iter().map(LineRow::from).collect();
    println!("{}", Table::new(rows));

    let totals = session.totals()?;
    println!("Subtotal:  {}", totals.subtotal);
    println!("IVA (19%): {}", totals.tax);
    println!("Shipping:  {}", totals.shipping);
    println!("Total:     {}", totals.total);
    if totals.free_shipping_reached {
        println!("Free shipping reached, you saved {}", totals.savings);
    } else {
        println!(
            "Spend {} more for free shipping",
            totals.free_shipping_remaining
        );
    }

    let mut ledger = ReferralLedger::new();
    let mut rng = rand::thread_rng();
    let registration = session.register(&mut rng, &args.username, None, &mut ledger)?;
    println!(
        "\nRegistered {} with referral code {}",
        args.username, registration.referral_code
    );

    session.award_points(PointAward::Review)?;
    let balance = session.award_points(PointAward::Activity(300))?;
    let status = session.level_status()?;
    println!(
        "{balance} points, level {} ({}% towards level {})",
        status.level, status.progress_percent, status.next_level
    );

    Ok(())
}
