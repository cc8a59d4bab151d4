use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spinbook_rs::market_data::normaliser::{normalise, normalise_book};
use spinbook_rs::market_data::types::{OrderBook, RawOrder};

fn bench_normalise(c: &mut Criterion) {
    c.bench_function("normalise plain", |b| b.iter(|| normalise(black_box("123.45"))));
    c.bench_function("normalise negative exponent", |b| b.iter(|| normalise(black_box("1.5e-7"))));
    c.bench_function("normalise positive exponent", |b| b.iter(|| normalise(black_box("1.2345e21"))));

    let side: Vec<RawOrder> = (1..=50)
        .map(|i| RawOrder { price: format!("{i}.25e-6"), quantity: format!("{i}e3") })
        .collect();
    let book = OrderBook { ask_orders: side.clone(), bid_orders: side };
    c.bench_function("normalise_book 50x50", |b| b.iter(|| normalise_book(black_box(&book))));
}

criterion_group!(benches, bench_normalise);
criterion_main!(benches);
