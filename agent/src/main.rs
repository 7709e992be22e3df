//! Mystery Box Agent CLI
//!
//! Wallet and endpoints come from the environment (see `Config::load`):
//! - mystery-box-agent claim-for <ADDR> [--percentage N]
//! - mystery-box-agent fund <AMOUNT>
//! - mystery-box-agent withdraw <AMOUNT>
//! - mystery-box-agent balance
//! - mystery-box-agent next-claim <ADDR>
//! - mystery-box-agent history [--user ADDR] [--limit N]

use clap::{Parser, Subcommand};
use cosmwasm_std::Uint128;
use tracing::info;

use mystery_box_agent::history::format_amount;
use mystery_box_agent::ledger::TxResult;
use mystery_box_agent::{Config, FaucetLedger, FaucetToolService, LcdFaucetClient};

#[derive(Parser)]
#[command(name = "mystery-box-agent")]
#[command(about = "Agent tools for the Mystery Box faucet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Claim a share of the faucet balance for a user
    ClaimFor {
        /// Recipient address
        recipient: String,

        /// Percentage of the balance (1-100); random when omitted
        #[arg(short, long)]
        percentage: Option<u8>,
    },

    /// Fund the faucet from the agent wallet (base units)
    Fund { amount: u128 },

    /// Emergency withdraw to the owner (base units, owner only)
    Withdraw { amount: u128 },

    /// Show the faucet balance
    Balance,

    /// Show when a user may claim again
    NextClaim { user: String },

    /// Summarize recent claims
    History {
        /// Highlight this user's claims
        #[arg(short, long)]
        user: Option<String>,

        /// Number of recent claims to read
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = Config::load()?;
    info!(
        lcd = %config.lcd_url,
        chain_id = %config.chain_id,
        faucet = %config.faucet_address,
        "Configuration loaded"
    );

    let client = LcdFaucetClient::new(&config)?;
    let service = FaucetToolService::new(client, config.max_random_percentage);

    match cli.command {
        Commands::ClaimFor {
            recipient,
            percentage,
        } => {
            let outcome = service
                .claim_for_user(Some(&recipient), percentage)
                .await?;
            println!("{}", outcome);
        }
        Commands::Fund { amount } => {
            let tx = service.fund_faucet(Some(Uint128::new(amount))).await?;
            println!(
                "Funded faucet with {} base units. Transaction hash: {}{}",
                amount,
                tx.hash,
                pending_note(&tx)
            );
        }
        Commands::Withdraw { amount } => {
            let tx = service
                .emergency_withdraw(Some(Uint128::new(amount)))
                .await?;
            println!(
                "Withdrew {} base units. Transaction hash: {}{}",
                amount,
                tx.hash,
                pending_note(&tx)
            );
        }
        Commands::Balance => {
            println!("{}", service.faucet_balance().await?);
        }
        Commands::NextClaim { user } => {
            println!("{}", service.time_until_next_claim(Some(&user)).await?);
        }
        Commands::History { user, limit } => {
            let decimals = service.ledger().token_decimals().await?;
            let summary = service.claims_summary(user.as_deref(), limit).await?;

            println!(
                "Last {} claims: {} tokens paid out",
                summary.recent_count,
                format_amount(summary.recent_total, decimals)
            );

            if let Some(user) = user.as_deref() {
                println!(
                    "{} in this window: {} claims, {} tokens (average {})",
                    user,
                    summary.user_count,
                    format_amount(summary.user_total, decimals),
                    format_amount(summary.user_average, decimals)
                );

                let stats = service.account_stats(Some(user)).await?;
                println!(
                    "{} lifetime: {} claims, {} tokens (average {})",
                    user,
                    stats.claim_count,
                    format_amount(stats.total_claimed, decimals),
                    format_amount(stats.average_claim, decimals)
                );
            }
        }
    }

    Ok(())
}

fn pending_note(tx: &TxResult) -> &'static str {
    if tx.confirmed {
        ""
    } else {
        " (not yet confirmed; check the transaction status on the explorer)"
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mystery_box_agent=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
