//! # Seed Data Generator
//!
//! Populates a database with demo bills and a front-desk account.
//!
//! ## Usage
//! ```bash
//! # 25 bills (default) into ./rch_dev.db
//! cargo run -p rch-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p rch-db --bin seed -- --count 120 --db ./data/rch.db
//! ```
//!
//! Each bill gets the next `RCH{DD}{Mon}{NN}` id, a stay of one to three
//! nights ending on or before today, and GST computed the way the billing
//! form computes it.

use chrono::{Duration, Local, NaiveDate};
use clap::Parser;

use rch_core::{
    gst, BillSequence, Money, NewBillingRecord, PaymentMode, PaymentStatus, RoomType,
};
use rch_db::{hash_password, AuthProvider, BillingStore, Database, DbConfig, NewUser};

const GUESTS: &[&str] = &[
    "Arun Kumar",
    "Priya Raman",
    "Senthil Nathan",
    "Meena Lakshmi",
    "Karthik Subramanian",
    "Divya Krishnan",
    "Rahul Sharma",
    "Anitha Selvam",
    "Vignesh Murugan",
    "Lakshmi Narayanan",
    "Farhan Ali",
    "Sneha Iyer",
];

/// Nightly room rates in rupees, by occupancy.
const RATES: &[(RoomType, i64)] = &[
    (RoomType::Double, 1200),
    (RoomType::Triple, 1650),
    (RoomType::Four, 2100),
];

/// Seed the RCH Billing database with demo data.
#[derive(Debug, Parser)]
#[command(name = "seed", about = "RCH Billing seed data generator")]
struct Args {
    /// Number of bills to generate
    #[arg(short, long, default_value_t = 25)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./rch_dev.db")]
    db: String,

    /// Demo account email
    #[arg(long, default_value = "frontdesk@rightchoicehotels.in")]
    email: String,

    /// Demo account password
    #[arg(long, default_value = "rameswaram")]
    password: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 RCH Billing Seed Data Generator");
    println!("==================================");
    println!("Database: {}", args.db);
    println!("Bills:    {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Demo account
    if db.users().find_by_email(&args.email).await?.is_some() {
        println!("⚠ Account {} already exists", args.email);
    } else {
        db.users()
            .insert(&NewUser {
                email: args.email.clone(),
                password_hash: Some(hash_password(&args.password)?),
                display_name: Some("Front Desk".to_string()),
                provider: AuthProvider::Password,
            })
            .await?;
        println!("✓ Created account {}", args.email);
    }

    let billing = db.billing();
    let existing = billing.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} bills", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating bills...");

    let today = Local::now().date_naive();
    let mut sequence = BillSequence::from_count(existing);
    let start = std::time::Instant::now();

    for seed in 0..args.count {
        let bill = generate_bill(&sequence, today, seed);

        if let Err(e) = billing.insert(&bill).await {
            eprintln!("Failed to insert {}: {}", bill.bill_id, e);
            continue;
        }
        sequence.advance();
    }

    println!(
        "✓ Generated {} bills in {:?}",
        sequence.count() - existing,
        start.elapsed()
    );
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one bill with plausible figures.
fn generate_bill(sequence: &BillSequence, today: NaiveDate, seed: usize) -> NewBillingRecord {
    let (room_type, nightly) = RATES[seed % RATES.len()];
    let nights = 1 + (seed % 3) as i64;

    let check_out_date = today - Duration::days((seed / 2) as i64);
    let check_in_date = check_out_date - Duration::days(nights);

    let room_charges = Money::from_rupees(nightly * nights);
    // Every third stay has a minibar or laundry charge
    let extra_charges = if seed % 3 == 0 {
        Money::from_rupees(150 + (seed as i64 * 37) % 400)
    } else {
        Money::zero()
    };

    let breakdown = gst::compute_for_stay(room_charges, extra_charges);

    let payment_status = if seed % 4 == 1 {
        PaymentStatus::Pending
    } else {
        PaymentStatus::Paid
    };

    NewBillingRecord {
        bill_id: sequence.next_id(today),
        guest_name: GUESTS[seed % GUESTS.len()].to_string(),
        mobile_number: format!("9{:09}", 787_114_088u64.wrapping_add(seed as u64 * 7919) % 1_000_000_000),
        room_no: format!("{}{:02}", 1 + seed % 3, 1 + (seed * 5) % 12),
        check_in_date,
        check_out_date,
        room_type,
        room_charges,
        extra_charges,
        tax: breakdown.tax,
        total: breakdown.total,
        payment_status,
        payment_mode: PaymentMode::ALL[seed % PaymentMode::ALL.len()],
    }
}
