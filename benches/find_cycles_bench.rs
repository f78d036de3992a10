use criterion::{Criterion, criterion_group, criterion_main};
use multihop_router::{CycleFinder, LiquidityGraph, Quote};
use std::hint::black_box;

// Complete digraph over `size` tokens, one quote per direction
fn complete_graph(size: usize) -> LiquidityGraph {
    let tokens: Vec<String> = (0..size).map(|i| format!("T{i}")).collect();
    let mut quotes = Vec::new();
    for token_in in &tokens {
        for token_out in &tokens {
            if token_in != token_out {
                quotes.push(Quote::unit(token_in.clone(), token_out.clone(), "dex".to_string(), 1.0, 1.0));
            }
        }
    }
    LiquidityGraph::from_quotes(quotes)
}

fn benchmark_find_cycles(c: &mut Criterion) {
    let graph = complete_graph(12);
    let finder = CycleFinder::default();

    let mut group = c.benchmark_group("find_cycles");
    for hops in [2usize, 3, 4] {
        group.bench_function(format!("complete_12_hops_{hops}"), |b| {
            b.iter(|| finder.find_cycles(black_box(&graph), black_box("T0"), black_box(hops)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_find_cycles);
criterion_main!(benches);
