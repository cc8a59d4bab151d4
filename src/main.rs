use std::io::{self, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use spinbook_rs::account::{fetch_account, format_near_amount, AccountState};
use spinbook_rs::config::Settings;
use spinbook_rs::market_data::adapters::near::NearRpcClient;
use spinbook_rs::market_data::adapters::LedgerView;
use spinbook_rs::market_data::catalog::MarketCatalog;
use spinbook_rs::market_data::fetcher::OrderBookFetcher;
use spinbook_rs::market_data::router::{MarketRouter, Selection};
use spinbook_rs::market_data::types::{MarketDescriptor, MarketOption, NormalisedOrder, OrderBook};
use spinbook_rs::telemetry;

#[derive(Parser)]
#[command(name = "spinbook", version, about = "Read-only order book viewer for a NEAR spot DEX contract")]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<String>,
    /// JSON-RPC endpoint override
    #[arg(long, global = true)]
    node_url: Option<String>,
    /// Market contract override
    #[arg(long, global = true)]
    contract: Option<String>,
    /// Account to show the balance of
    #[arg(long, global = true)]
    account: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List markets
    Markets,
    /// Print the normalised order book of one market
    Book { market_id: u64 },
    /// Show the account balance
    Account,
    /// Interactive market selector (default)
    Watch,
}

// Helper function to print the market list
fn print_markets(markets: &[MarketDescriptor]) {
    if markets.is_empty() {
        println!("No markets available");
        return;
    }
    println!("{:>4}  {:<14} {:>6}", "id", "market", "fee");
    for m in markets {
        println!("{:>4}  {:<14} {:>6}", m.id, m.label(), m.fee.to_string());
    }
}

fn print_side(orders: &[NormalisedOrder]) {
    for o in orders {
        println!("{:<28} {}", o.price, o.quantity);
    }
}

// Asks then bids, in ledger order
fn print_book(label: &str, book: &OrderBook<NormalisedOrder>) {
    println!("\n=== {} ===", label);
    println!("{:<28} {}", "price", "quantity");
    print_side(&book.ask_orders);
    print_side(&book.bid_orders);
    if book.is_empty() {
        println!("(empty book)");
    }
}

fn print_account(state: &AccountState) {
    let balance = state.balance();
    println!("Account: {}", state.account_id);
    println!("Balance: {} NEAR", format_near_amount(balance.available));
}

fn label_for(options: &[MarketOption], market_id: u64) -> String {
    options
        .iter()
        .find(|o| o.value == market_id)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| format!("market {market_id}"))
}

fn print_selection(options: &[MarketOption], selection: &Selection) {
    match selection {
        Selection::Current(snapshot) => print_book(&label_for(options, snapshot.market_id), &snapshot.book),
        Selection::Superseded { market_id } => println!("Result for market {market_id} discarded (newer selection)"),
    }
}

async fn watch(view: Arc<dyn LedgerView>, settings: &Settings) -> anyhow::Result<()> {
    if let Some(account_id) = &settings.account_id {
        match fetch_account(view.as_ref(), account_id).await {
            Ok(state) => print_account(&state),
            Err(e) => eprintln!("Could not load account {account_id}: {e}"),
        }
    }

    let router = MarketRouter::new(view, &settings.contract_id);
    let start = router.start().await?;
    print_markets(&start.markets);
    let options = start.options;

    let mut current = None;
    if let Some(selection) = &start.initial {
        print_selection(&options, selection);
        if let Selection::Current(snapshot) = selection {
            current = Some(snapshot.market_id);
        }
    }

    // CLI loop
    loop {
        print!("\nspinbook> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let command = input.trim().to_lowercase();

        match command.as_str() {
            "help" | "h" => {
                println!("Available commands:");
                println!("  <id>          - Select market and show its order book");
                println!("  list, ls      - List markets");
                println!("  refresh, r    - Re-fetch the selected market");
                println!("  quit, q       - Exit");
            }
            "list" | "ls" => {
                for o in &options {
                    println!("  {:>4}  {}", o.value, o.label);
                }
            }
            "refresh" | "r" => match current {
                Some(id) => match router.select(id).await {
                    Ok(selection) => print_selection(&options, &selection),
                    Err(e) => eprintln!("Refresh failed: {e}"),
                },
                None => println!("No market selected"),
            },
            "quit" | "q" | "exit" => {
                println!("Goodbye!");
                break;
            }
            "" => continue,
            other => match other.parse::<u64>() {
                Ok(id) if options.iter().any(|o| o.value == id) => match router.select(id).await {
                    Ok(selection) => {
                        print_selection(&options, &selection);
                        if let Selection::Current(snapshot) = &selection {
                            current = Some(snapshot.market_id);
                        }
                    }
                    // previous book stays the current one
                    Err(e) => eprintln!("Could not load market {id}: {e}"),
                },
                Ok(id) => println!("Market {id} is not listed. Type 'list' to see markets."),
                Err(_) => println!("Unknown command. Type 'help' for available commands."),
            },
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(node_url) = cli.node_url {
        settings.node_url = node_url;
    }
    if let Some(contract) = cli.contract {
        settings.contract_id = contract;
    }
    if cli.account.is_some() {
        settings.account_id = cli.account;
    }

    telemetry::init_tracing(&settings.log_filter);
    telemetry::init_metrics()?;
    tracing::info!(
        network = %settings.network_id,
        node = %settings.node_url,
        contract = %settings.contract_id,
        "Starting spinbook"
    );

    let view: Arc<dyn LedgerView> = Arc::new(NearRpcClient::from_settings(&settings)?);

    match cli.command.unwrap_or(Command::Watch) {
        Command::Markets => {
            let markets = MarketCatalog::new(view, &settings.contract_id).list_markets().await?;
            print_markets(&markets);
        }
        Command::Book { market_id } => {
            let book = OrderBookFetcher::new(view, &settings.contract_id).fetch_normalised(market_id).await?;
            print_book(&format!("market {market_id}"), &book);
        }
        Command::Account => {
            let account_id = settings
                .account_id
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("no account configured (use --account or SPINBOOK_ACCOUNT_ID)"))?;
            let state = fetch_account(view.as_ref(), account_id).await?;
            print_account(&state);
        }
        Command::Watch => watch(view, &settings).await?,
    }

    Ok(())
}
