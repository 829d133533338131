//! Interactive transaction load generator. Pick a network and a payload
//! size, then submit the same transaction on a fixed interval until Ctrl+C.

use alloy::{
    primitives::{
        U256,
        utils::{format_ether, format_units},
    },
    signers::Signer,
};
use clap::Parser;
use init4_bin_base::{
    deps::tracing::{error, info},
    init4,
    utils::from_env::FromEnv,
};
use loadgen::{
    chains::{Chain, ChainRegistry},
    config::LoadGenConfig,
    generator::{LoadGenerator, build_template, preflight},
    payload::DataSize,
    prompt::{chain_by_selection, select_chain, select_data_size},
    provider::connect_provider,
};

#[derive(Parser, Debug)]
#[command(about = "Repeatedly submit transactions to an EVM RPC endpoint")]
struct Args {
    /// Menu number of the target network. Skips the network menu.
    #[arg(long)]
    chain: Option<u32>,
    /// Payload size in KB, capped at 64. Skips the data size menu.
    #[arg(long)]
    data_size: Option<u32>,
    /// Stop after this many submissions instead of running until Ctrl+C.
    #[arg(long)]
    count: Option<u64>,
}

/// Resolve the network and payload size, prompting for whatever was not
/// given on the command line.
fn choose(args: &Args, registry: &ChainRegistry) -> eyre::Result<(Chain, DataSize)> {
    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout();

    let chain = match args.chain {
        Some(selection) => chain_by_selection(registry, selection)?,
        None => select_chain(registry, &mut input, &mut output)?,
    };
    println!("\n✅ Selected: {}", chain.name);

    let data_size = match args.data_size {
        Some(kb) => DataSize::new(kb),
        None => select_data_size(&mut input, &mut output)?,
    };
    println!("\n✅ Data size: {data_size}");

    Ok((chain, data_size))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("interrupt received, stopping");
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    let _guard = init4();
    let args = Args::parse();

    println!("🔥 Transaction Load Generator");

    let registry = ChainRegistry::from_env();
    let (chain, data_size) = choose(&args, &registry)?;

    let config = LoadGenConfig::from_env()?;
    let settings = config.settings()?;

    let signer = config.signer_config.connect().await?;
    let sender = signer.address();
    let provider = connect_provider(signer, &chain.rpc).await?;
    info!(%sender, %chain, "connected to signer and provider");

    let template = build_template(sender, &settings, data_size.generate());

    println!("\n📊 Configuration:");
    println!("   Network:    {}", chain.name);
    println!("   RPC:        {}", chain.rpc);
    println!("   Sender:     {sender}");
    println!("   Recipient:  {}", settings.recipient(sender));
    println!("   Delay:      {}ms", settings.delay.as_millis());
    println!("   Value:      {} wei", settings.value);
    println!(
        "   Gas Price:  {} gwei",
        format_units(U256::from(settings.gas_price), "gwei")?
    );
    println!("   Data Size:  ~{data_size}");

    println!("\n🔍 Testing transaction estimation...");
    let preflight = preflight(&provider, sender, &template).await?;
    println!("   Chain ID:   {}", preflight.chain_id);
    println!("   Balance:    {} ETH", format_ether(preflight.balance));
    println!("   Est. Gas:   {}", preflight.gas_limit);

    println!("\n🎯 Starting continuous transaction generation...");
    println!("Press Ctrl+C to stop\n");

    let generator = LoadGenerator::new(provider, template, preflight.gas_limit, settings.delay)
        .with_limit(args.count);
    let summary = generator
        .run(&mut std::io::stdout(), shutdown_signal())
        .await?;

    println!(
        "\n🏁 Sent {} transaction(s), {} failed",
        summary.sent, summary.failed
    );

    Ok(())
}
