use criterion::{Criterion, black_box, criterion_group, criterion_main};
use txpool::Pool;
use txpool::test::scenario;

fn admit_remove_cycle(c: &mut Criterion) {
    let utxos = scenario::funded_ledger(1);
    let mut pool = Pool::new(1_000);

    c.bench_function("txpool admit_remove_cycle", |b| {
        b.iter(|| {
            pool.admit(scenario::single_spend("tx", 0, black_box(5.0)), &utxos)
                .unwrap();
            pool.remove("tx");
        })
    });
}

fn priority_view_on_large_pool(c: &mut Criterion) {
    let n = 10_000;
    let utxos = scenario::funded_ledger(n);
    // -- Fill the pool to capacity with distinct spends
    let mut pool = Pool::new(n * 54);
    for i in 0..n {
        pool.admit(
            scenario::single_spend(&format!("tx{i}"), i, 1.0 + i as f64),
            &utxos,
        )
        .unwrap();
    }

    c.bench_function("txpool by_fee_rate_on_large_pool", |b| {
        b.iter(|| {
            let view = pool.by_fee_rate(black_box(Some(100)));
            assert_eq!(view.len(), 100);
            assert_eq!(view[0].fee_rate(), n as f64); //<-- highest fee rate admitted
        })
    });
}

criterion_group!(benches, admit_remove_cycle, priority_view_on_large_pool);
criterion_main!(benches);
