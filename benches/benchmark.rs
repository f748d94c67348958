use baloot_engine::engine::OrderHistoryEngine;
use baloot_engine::orders::Order;
use criterion::{Criterion, criterion_group, criterion_main};

fn setup_engine(customers: u64, orders_per_customer: u64) -> OrderHistoryEngine {
    let mut history = Vec::new();
    let mut id = 0u64;
    for customer in 1..=customers {
        for i in 0..orders_per_customer {
            id += 1;
            history.push(Order {
                id,
                customer,
                price: ((i % 10) as i64 + 1) * 25,
                quantity: (i as i64 % 17) + 1,
            });
        }
    }
    OrderHistoryEngine::with_history(history)
}

fn bench_queries(c: &mut Criterion) {
    let customers = 100;
    let orders_per_customer = 100;
    let engine = setup_engine(customers, orders_per_customer);

    c.bench_function("average over 10k orders", |b| {
        b.iter(|| engine.average_order_quantity_by_customer(customers / 2))
    });

    c.bench_function("quantity pattern over 10k orders", |b| {
        b.iter(|| engine.quantity_pattern_by_price(50))
    });
}

fn bench_ingest(c: &mut Criterion) {
    let customers = 100;
    let orders_per_customer = 100;

    c.bench_function("ingest 1 order into 10k history", |b| {
        let mut engine = setup_engine(customers, orders_per_customer);
        let mut id = customers * orders_per_customer;
        b.iter(|| {
            id += 1;
            engine
                .add_order_and_get_fraudulent_quantity(Order {
                    id,
                    customer: 1,
                    price: 25,
                    quantity: 40,
                })
                .unwrap();
        })
    });
}

criterion_group!(benches, bench_queries, bench_ingest);
criterion_main!(benches);
