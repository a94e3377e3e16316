use alloy::primitives::Address;
use eyre::WrapErr;

use eris_bridge::amount::{self, ERIS_DECIMALS};
use eris_bridge::{BridgeOrchestrator, Config, EvmBridgeClient, RunState};

fn main() -> eyre::Result<()> {
    // Install color-eyre for better error reporting
    color_eyre::install()?;

    // Run the async main
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> eyre::Result<()> {
    init_logging();

    tracing::info!("Starting ERIS bridge run");

    let config = Config::load().wrap_err("Failed to load configuration")?;
    tracing::info!(
        destination = %config.destination_chain,
        amount = %config.amount,
        quote_only = config.quote_only,
        "Configuration loaded"
    );

    let token_address: Address = config
        .contract_address
        .parse()
        .wrap_err("Invalid contract address")?;
    let amount = amount::parse_amount(&config.amount, ERIS_DECIMALS)?;

    let client = EvmBridgeClient::new(&config.rpc_url, token_address, &config.private_key)?;
    let orchestrator = BridgeOrchestrator::new(client, config.orchestrator_settings());

    if config.quote_only {
        let quote = orchestrator
            .quote_fee(&config.destination_chain, amount)
            .await?;
        tracing::info!(
            fee_wei = %quote.fee_quote,
            buffered_wei = %quote.buffered_budget,
            "Fee quote complete"
        );
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    let report = orchestrator.run(&config.destination_chain, amount).await?;

    match report.final_state {
        RunState::Done => tracing::info!(
            tx_hash = ?report.tx_hash,
            event_found = report.event.is_some(),
            "Bridge run complete"
        ),
        RunState::Submitted => tracing::warn!(
            tx_hash = ?report.tx_hash,
            "Bridge transaction submitted but unconfirmed; re-run confirmation later"
        ),
        state => tracing::info!(state = %state, "Bridge run ended"),
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initialize tracing/logging with structured output
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,eris_bridge=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
