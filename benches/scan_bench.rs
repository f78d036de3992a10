use criterion::{Criterion, criterion_group, criterion_main};
use lazy_static::lazy_static;
use multihop_router::{MultiHopRouter, Quote, RouterConfig};
use std::hint::black_box;

lazy_static! {
    static ref QUOTES: Vec<Quote> = market_quotes(16);
}

// Every ordered pair quoted on two venues with slightly skewed prices
fn market_quotes(size: usize) -> Vec<Quote> {
    let mut tokens: Vec<String> = ["USDC", "USDT", "WETH", "DAI"].iter().map(|token| token.to_string()).collect();
    tokens.extend((tokens.len()..size).map(|i| format!("T{i}")));

    let mut quotes = Vec::new();
    for (i, token_in) in tokens.iter().enumerate() {
        for (j, token_out) in tokens.iter().enumerate() {
            if i != j {
                let skew = ((i * 31 + j * 17) % 11) as f64 * 0.004 - 0.02;
                quotes.push(Quote::unit(token_in.clone(), token_out.clone(), "uniswap_v3".to_string(), 1.0 + skew, 20_000.0));
                quotes.push(Quote::unit(token_in.clone(), token_out.clone(), "sushiswap".to_string(), 1.0 + skew * 0.9, 8_000.0));
            }
        }
    }
    quotes
}

fn scan(config: RouterConfig) -> eyre::Result<usize> {
    let mut router = MultiHopRouter::new(config)?;
    router.update(QUOTES.iter().cloned());
    Ok(router.find_triangular_opportunities(black_box(100.0)).len())
}

fn benchmark_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(10);

    group.bench_function("sequential_16_tokens", |b| b.iter(|| scan(RouterConfig::default().with_hops(2, 3))));
    group.bench_function("parallel_16_tokens", |b| {
        b.iter(|| scan(RouterConfig::default().with_hops(2, 3).with_parallel_search(true)))
    });
    group.finish();
}

criterion_group!(benches, benchmark_scan);
criterion_main!(benches);
