use std::error::Error;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{Engine, Party, StockLedgerRow};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tally_admin")]
#[command(about = "Admin utilities for Tally (bootstrap master data, run reports)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./tally.db?mode=rwc")]
    database_url: String,

    /// User id recorded on rows created by this tool.
    #[arg(long, default_value_t = 1)]
    actor: i32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Item(Item),
    Customer(CustomerCmd),
    Vendor(VendorCmd),
    Report(Report),
}

#[derive(Args, Debug)]
struct Item {
    #[command(subcommand)]
    command: ItemCommand,
}

#[derive(Subcommand, Debug)]
enum ItemCommand {
    Create(ItemCreateArgs),
}

#[derive(Args, Debug)]
struct ItemCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    sell_price: Decimal,
}

#[derive(Args, Debug)]
struct CustomerCmd {
    #[command(subcommand)]
    command: PartyCommand,
}

#[derive(Args, Debug)]
struct VendorCmd {
    #[command(subcommand)]
    command: PartyCommand,
}

#[derive(Subcommand, Debug)]
enum PartyCommand {
    Create(PartyCreateArgs),
}

#[derive(Args, Debug)]
struct PartyCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

#[derive(Args, Debug)]
struct Report {
    #[command(subcommand)]
    command: ReportCommand,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Cash book over a date range.
    Cash {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Statement for one customer or vendor.
    Party {
        #[arg(long, conflicts_with = "vendor")]
        customer: Option<i32>,
        #[arg(long)]
        vendor: Option<i32>,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Stock ledger for one item.
    Stock {
        #[arg(long)]
        item: i32,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// Loan disbursements and repayments.
    Loan,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let db = connect_db(&cli.database_url).await?;
    let actor = cli.actor;

    match cli.command {
        Command::Item(Item {
            command: ItemCommand::Create(args),
        }) => {
            let item = engine::items::ActiveModel {
                item_name: Set(args.name.clone()),
                avg_price: Set(None),
                sell_price: Set(args.sell_price),
                created_by: Set(actor),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            let item = engine::items::Entity::insert(item)
                .exec_with_returning(&db)
                .await?;
            println!("created item: {} (id {})", args.name, item.item_id);
        }
        Command::Customer(CustomerCmd {
            command: PartyCommand::Create(args),
        }) => {
            let customer = engine::customers::ActiveModel {
                customer_name: Set(args.name.clone()),
                phone: Set(args.phone),
                address: Set(args.address),
                created_by: Set(actor),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            let customer = engine::customers::Entity::insert(customer)
                .exec_with_returning(&db)
                .await?;
            println!(
                "created customer: {} (id {})",
                args.name, customer.customer_id
            );
        }
        Command::Vendor(VendorCmd {
            command: PartyCommand::Create(args),
        }) => {
            let vendor = engine::vendors::ActiveModel {
                vendor_name: Set(args.name.clone()),
                phone: Set(args.phone),
                address: Set(args.address),
                created_by: Set(actor),
                created_at: Set(Utc::now()),
                ..Default::default()
            };
            let vendor = engine::vendors::Entity::insert(vendor)
                .exec_with_returning(&db)
                .await?;
            println!("created vendor: {} (id {})", args.name, vendor.vendor_id);
        }
        Command::Report(Report { command }) => {
            let engine = Engine::builder().database(db.clone()).build().await?;
            match command {
                ReportCommand::Cash { from, to } => {
                    let report = engine.cash_report(from, to).await?;
                    println!("Cash book {from} .. {to}");
                    println!("Opening balance: {}", report.opening_balance);
                    println!("Receipts:");
                    for row in &report.receipts {
                        println!("  {}  {:<32}  {}", row.date, row.particular, row.amount);
                    }
                    println!("Payments:");
                    for row in &report.payments {
                        println!("  {}  {:<32}  {}", row.date, row.particular, row.amount);
                    }
                    println!("Closing balance: {}", report.closing_balance);
                }
                ReportCommand::Party {
                    customer,
                    vendor,
                    from,
                    to,
                } => {
                    let party = match (customer, vendor) {
                        (Some(id), None) => Party::Customer(id),
                        (None, Some(id)) => Party::Vendor(id),
                        _ => {
                            eprintln!("pass exactly one of --customer or --vendor");
                            std::process::exit(2);
                        }
                    };
                    let report = engine.party_report(party, from, to).await?;
                    println!("Statement {from} .. {to}");
                    println!("Opening balance: {}", report.opening_balance);
                    for row in &report.rows {
                        println!("  {}  {:<32}  {}", row.date, row.particular, row.amount);
                    }
                    println!("Closing balance: {}", report.closing_balance);
                }
                ReportCommand::Stock { item, from, to } => {
                    let rows = engine.stock_ledger(item, from, to).await?;
                    println!("Stock ledger for item {item}, {from} .. {to}");
                    for row in &rows {
                        match row {
                            StockLedgerRow::Opening { date, quantity } => {
                                println!("  {date}  opening             {quantity}");
                            }
                            StockLedgerRow::Movement {
                                date,
                                reference,
                                quantity,
                                unit_price,
                                running,
                                ..
                            } => {
                                println!(
                                    "  {date}  {:<14} {quantity:>6} @ {unit_price:<10} = {running}",
                                    reference.as_str()
                                );
                            }
                            StockLedgerRow::Closing { date, quantity } => {
                                println!("  {date}  closing             {quantity}");
                            }
                        }
                    }
                }
                ReportCommand::Loan => {
                    let report = engine.loan_report().await?;
                    for row in &report.rows {
                        println!("  {}  {:<40}  {}", row.date, row.particular, row.amount);
                    }
                    println!("Outstanding: {}", report.outstanding);
                }
            }
        }
    }

    Ok(())
}
