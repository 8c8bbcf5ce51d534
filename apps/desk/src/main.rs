//! # RCH Desk Entry Point
//!
//! Command-line front end for the front desk. Each subcommand maps onto
//! one screen action from [`rch_desk::commands`].
//!
//! ## Usage
//! ```bash
//! rch-desk user add --email desk@hotel.in --password secret123
//! rch-desk login --email desk@hotel.in --password secret123
//! rch-desk bill add --guest-name "Asha" --mobile 9876543210 --room-no 101 \
//!     --check-in 2025-03-05 --check-out 2025-03-06 --room-charges 1000
//! rch-desk dashboard --watch 5
//! rch-desk invoices list
//! rch-desk invoice pdf RCH05Mar01
//! rch-desk logout
//! ```
//!
//! The session token lives in `session.jwt` next to the database; every
//! command except `user add` and `login` resumes it.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use rch_core::InvoiceDocument;
use rch_desk::clock::Clock;
use rch_desk::commands::{self, billing, dashboard, invoice, login, Route};
use rch_desk::error::Notification;
use rch_desk::state::{DeskConfig, FormField, Session};
use rch_desk::DeskContext;

#[derive(Debug, Parser)]
#[command(name = "rch-desk", version, about = "RCH Billing front desk")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage desk accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Sign in and store the session
    Login(LoginArgs),
    /// Sign out and forget the stored session
    Logout,
    /// Billing form
    Bill {
        #[command(subcommand)]
        action: BillAction,
    },
    /// Summary cards and the most recent bills
    Dashboard {
        /// Keep the clock running for this many seconds
        #[arg(long)]
        watch: Option<u64>,
    },
    /// Invoice listing
    Invoices {
        #[command(subcommand)]
        action: InvoicesAction,
    },
    /// A single invoice
    Invoice {
        #[command(subcommand)]
        action: InvoiceAction,
    },
}

#[derive(Debug, Subcommand)]
enum UserAction {
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Debug, Args)]
struct LoginArgs {
    #[arg(long, required_unless_present = "federated")]
    email: Option<String>,
    #[arg(long, required_unless_present = "federated")]
    password: Option<String>,
    /// ID token from the federated provider
    #[arg(long, conflicts_with_all = ["email", "password"])]
    federated: Option<String>,
}

#[derive(Debug, Subcommand)]
enum BillAction {
    Add(BillArgs),
}

#[derive(Debug, Args)]
struct BillArgs {
    #[arg(long)]
    guest_name: String,
    #[arg(long)]
    mobile: String,
    #[arg(long)]
    room_no: String,
    /// YYYY-MM-DD
    #[arg(long)]
    check_in: String,
    /// YYYY-MM-DD
    #[arg(long)]
    check_out: String,
    #[arg(long, default_value = "Double")]
    room_type: String,
    #[arg(long)]
    room_charges: String,
    #[arg(long, default_value = "")]
    extra_charges: String,
    #[arg(long, default_value = "Paid")]
    payment_status: String,
    #[arg(long, default_value = "Cash")]
    payment_mode: String,
}

impl BillArgs {
    fn fields(&self) -> [(FormField, &str); 10] {
        [
            (FormField::GuestName, &self.guest_name),
            (FormField::MobileNumber, &self.mobile),
            (FormField::RoomNo, &self.room_no),
            (FormField::CheckInDate, &self.check_in),
            (FormField::CheckOutDate, &self.check_out),
            (FormField::RoomType, &self.room_type),
            (FormField::RoomCharges, &self.room_charges),
            (FormField::ExtraCharges, &self.extra_charges),
            (FormField::PaymentStatus, &self.payment_status),
            (FormField::PaymentMode, &self.payment_mode),
        ]
    }
}

#[derive(Debug, Subcommand)]
enum InvoicesAction {
    List,
}

#[derive(Debug, Subcommand)]
enum InvoiceAction {
    /// Show the detail modal
    Show { bill_id: String },
    /// Write the printable HTML view
    Print { bill_id: String },
    /// Write the A4 PDF
    Pdf { bill_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    rch_desk::init_tracing();

    let cli = Cli::parse();
    let config = DeskConfig::load(cli.config).context("loading desk config")?;
    let ctx = DeskContext::open(config).await?;

    info!("Starting RCH Billing desk");

    let result = run(&ctx, cli.command).await;
    ctx.db.inner().close().await;
    result
}

async fn run(ctx: &DeskContext, command: Command) -> Result<()> {
    match command {
        Command::User {
            action:
                UserAction::Add {
                    email,
                    password,
                    name,
                },
        } => {
            let user = ctx
                .identity
                .create_user(&email, &password, name.as_deref())
                .await?;
            println!("✓ Created {} ({})", user.email, user.id);
        }

        Command::Login(args) => {
            let outcome = match args.federated {
                Some(token) => login::login_federated(&ctx.identity, &token).await,
                None => {
                    let credentials = login::Credentials {
                        email: args.email.unwrap_or_default(),
                        password: args.password.unwrap_or_default(),
                    };
                    login::login(&ctx.identity, &credentials).await
                }
            };

            println!("{}", outcome.notification);
            match outcome.session {
                Some(session) => {
                    let path = ctx.config.session_file()?;
                    std::fs::write(&path, &session.token)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Signed in as {} → {}", session.label(), outcome.route);
                }
                None => bail!("sign-in failed"),
            }
        }

        Command::Logout => {
            let session = resume(ctx, Route::Homepage).await?;
            let outcome = login::logout(&ctx.identity, session, Route::Homepage).await;
            println!("{}", outcome.notification);

            if outcome.session.is_none() {
                let path = ctx.config.session_file()?;
                std::fs::remove_file(&path)
                    .with_context(|| format!("removing {}", path.display()))?;
            }
        }

        Command::Bill {
            action: BillAction::Add(args),
        } => {
            resume(ctx, Route::BillingForm).await?;
            let store = ctx.db.billing();

            let mut state = billing::open_billing_form(&store).await?;
            for (field, value) in args.fields() {
                state = billing::update_field(&state, field.name(), value)?;
            }
            println!(
                "Tax: {}  Total: {}",
                state.form.tax.fixed2(),
                state.form.total.fixed2()
            );

            let outcome = billing::submit_bill(&store, &state, Local::now().date_naive()).await;
            print_notification(&outcome.notification)?;
            if let Some(bill_id) = outcome.bill_id {
                println!("Bill ID: {}", bill_id);
            }
        }

        Command::Dashboard { watch } => {
            let session = resume(ctx, Route::Homepage).await?;
            let tick = Duration::from_millis(ctx.config.dashboard.clock_interval_ms);
            let clock = Clock::start(tick);

            let view =
                dashboard::load_dashboard(&ctx.db.billing(), ctx.config.dashboard.page_size).await;

            println!("{}  |  {}", session.label(), clock.now());
            if let Some(error) = &view.error {
                println!("✗ {}", error);
            }
            println!("Total Payments:  {}", view.summary.total_payments);
            println!("Pending Amount:  {}", view.summary.pending_amount);
            println!("Invoices:        {}", view.summary.invoice_count);
            println!();
            print_rows(&view.rows, view.table_message());

            if let Some(secs) = watch {
                let mut ticks = clock.subscribe();
                let deadline = tokio::time::sleep(Duration::from_secs(secs));
                tokio::pin!(deadline);
                loop {
                    tokio::select! {
                        _ = &mut deadline => break,
                        changed = ticks.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            println!("{}", *ticks.borrow_and_update());
                        }
                    }
                }
            }
            clock.stop().await;
        }

        Command::Invoices {
            action: InvoicesAction::List,
        } => {
            resume(ctx, Route::Invoice).await?;
            let view =
                invoice::load_invoices(&ctx.db.billing(), ctx.config.invoices.page_size).await;
            if let Some(notification) = &view.notification {
                print_notification(notification)?;
            }
            print_rows(&view.rows, view.table_message());
        }

        Command::Invoice { action } => {
            resume(ctx, Route::Invoice).await?;
            let view =
                invoice::load_invoices(&ctx.db.billing(), ctx.config.invoices.page_size).await;
            if let Some(notification) = &view.notification {
                print_notification(notification)?;
            }

            let bill_id = match &action {
                InvoiceAction::Show { bill_id }
                | InvoiceAction::Print { bill_id }
                | InvoiceAction::Pdf { bill_id } => bill_id,
            };
            let view = invoice::select_invoice(&view, bill_id)?;
            let Some(selected) = view.selected else {
                bail!("no invoice selected");
            };

            match action {
                InvoiceAction::Show { .. } => {
                    println!("{}", selected.modal.title);
                    for field in &selected.modal.fields {
                        println!("  {:<16}{}", format!("{}:", field.label), field.value);
                    }
                }
                InvoiceAction::Print { .. } => {
                    let out_dir = &ctx.config.export.directory;
                    let path = invoice::print_invoice(&selected.document, out_dir)?;
                    println!("✓ Print view written to {}", path.display());
                }
                InvoiceAction::Pdf { .. } => {
                    let path = export(ctx, &selected.document)?;
                    println!("✓ PDF written to {}", path.display());
                }
            }
        }
    }

    Ok(())
}

/// Loads the stored session and checks it against `route`.
async fn resume(ctx: &DeskContext, route: Route) -> Result<Session> {
    let path = ctx.config.session_file()?;
    let token = match std::fs::read_to_string(&path) {
        Ok(token) => token,
        Err(_) => bail!("not signed in; run `rch-desk login` first"),
    };

    let session = ctx.identity.resume(token.trim()).await?;
    if commands::guard(route, Some(&session), Utc::now()) != route {
        bail!("session expired; run `rch-desk login` again");
    }
    Ok(session)
}

fn export(ctx: &DeskContext, document: &InvoiceDocument) -> Result<PathBuf> {
    let path = invoice::export_pdf(
        document,
        &ctx.config.hotel,
        &ctx.config.export.logo_path,
        &ctx.config.export.directory,
    )?;
    Ok(path)
}

fn print_notification(notification: &Notification) -> Result<()> {
    println!("{}", notification);
    if notification.is_error() {
        bail!("{}", notification.message);
    }
    Ok(())
}

fn print_rows(rows: &[rch_core::InvoiceRow], message: Option<&str>) {
    println!(
        "{:<14}{:<24}{:<10}{:>12}  {}",
        "Bill ID", "Guest Name", "Room No", "Amount", "Status"
    );
    if let Some(message) = message {
        println!("{}", message);
        return;
    }
    for row in rows {
        println!(
            "{:<14}{:<24}{:<10}{:>12}  {}",
            row.bill_id,
            row.guest_name,
            row.room_no,
            row.amount.to_string(),
            row.status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rch_desk::state::BillingForm;

    #[test]
    fn test_bill_add_defaults_match_the_form() {
        let cli = Cli::try_parse_from([
            "rch-desk",
            "bill",
            "add",
            "--guest-name",
            "Asha",
            "--mobile",
            "9876543210",
            "--room-no",
            "101",
            "--check-in",
            "2025-03-05",
            "--check-out",
            "2025-03-06",
            "--room-charges",
            "1000",
        ])
        .unwrap();

        let Command::Bill {
            action: BillAction::Add(args),
        } = cli.command
        else {
            panic!("expected bill add");
        };

        let defaults = BillingForm::default();
        assert_eq!(args.payment_status, defaults.payment_status.to_string());
        assert_eq!(args.payment_mode, defaults.payment_mode.to_string());
        assert_eq!(args.room_type, defaults.room_type.to_string());
        assert!(args.extra_charges.is_empty());
    }
}
