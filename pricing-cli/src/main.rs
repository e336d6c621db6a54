use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Price a product through the configured discount, tax and shipping pipeline.
#[derive(Debug, Parser)]
#[command(name = "price-quote", version)]
struct Args {
    /// Pricing config file. Defaults to the layered `config/` directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Quote request JSON; `-` or omitted reads stdin.
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Pretty-print the result
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| pricing_cli::DEFAULT_LOG_FILTER.into()),
        )
        // stdout carries the JSON result
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = pricing_cli::load_config(args.config.as_deref())?;
    let request = pricing_cli::read_request(args.request.as_deref())?;
    tracing::info!(product = %request.product.name, "Pricing quote request");

    let result = pricing_cli::quote(&config, request)?;
    tracing::info!(total = %result.final_price(), "Quote ready");

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);
    Ok(())
}
