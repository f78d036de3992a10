use eyre::Result;
use multihop_router::{
    ConcentratedLiquidityVenue, ConfigLoader, ConstantProductVenue, MultiHopRouter, QuoteSourceConfigSection, RouterConfig,
    VenueQuoteSource, WeightedVaultVenue,
};
use tracing::info;

/// Scan a venue set once and print every opportunity.
///
/// With a file argument the `[router]` and `[quote_source]` sections are read from it
/// (see `demos/router.example.toml`), otherwise a built-in Arbitrum-like venue set is used.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let (config, source) = match std::env::args().nth(1) {
        Some(file_name) => {
            let config = RouterConfig::load_section_from_file(file_name.clone()).await?;
            let source = QuoteSourceConfigSection::load_section_from_file(file_name).await?.into_source();
            (config, source)
        }
        None => (RouterConfig::default(), builtin_source()),
    };
    info!(venues = source.venues().len(), probe_amount_in = source.probe_amount_in(), "Loaded venue set");

    let mut router = MultiHopRouter::new(config)?;
    let report = router.scan(&source, 10.0).await?;

    println!(
        "{} quotes, {} tokens, {} pairs, {} cycles evaluated, {} rejected",
        report.quotes_ingested,
        report.token_count,
        report.pair_count,
        report.cycles_evaluated,
        report.rejections.total()
    );
    if report.opportunities.is_empty() {
        println!("No opportunity above the profit threshold");
    }
    for opportunity in &report.opportunities {
        println!("\n{}", MultiHopRouter::format_opportunity(opportunity));
        println!("Route: {}", opportunity.route_hash);
    }

    Ok(())
}

fn builtin_source() -> VenueQuoteSource {
    VenueQuoteSource::new(
        vec![
            // ~3000 USDC per WETH
            ConcentratedLiquidityVenue::new("uniswap_v3", "WETH", "USDC", 5_000_000.0, 3000f64.sqrt()).with_fee_ppm(500).into(),
            ConstantProductVenue::new("sushiswap", "WETH", "ARB", 400.0, 1_000_000.0).into(),
            // ARB slightly rich against USDC on camelot
            ConstantProductVenue::new("camelot", "ARB", "USDC", 500_000.0, 650_000.0).into(),
            WeightedVaultVenue::new("balancer", vec!["USDC", "DAI", "WETH"], vec![300_000.0, 300_000.0, 100.0], vec![0.4, 0.4, 0.2])
                .into(),
        ],
        1.0,
    )
}
