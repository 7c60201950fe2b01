use account_forms::{AccountStore, MemoryStorage, StoreConfig};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::time::Duration;
use tokio::runtime::Runtime;

const NUM_ACCOUNTS: u64 = 1_000;

fn store_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    group.throughput(Throughput::Elements(NUM_ACCOUNTS));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(20);

    group.bench_function("add_1K_accounts", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt).iter(|| async {
            let mut store =
                AccountStore::initialize(MemoryStorage::new(), &StoreConfig::with_debounce_ms(0))
                    .unwrap();
            for _ in 0..NUM_ACCOUNTS {
                store.add_account();
            }
            store.settle().await;
        });
    });

    group.bench_function("update_1K_accounts", |b| {
        let rt = Runtime::new().unwrap();
        b.to_async(rt).iter(|| async {
            let mut store =
                AccountStore::initialize(MemoryStorage::new(), &StoreConfig::with_debounce_ms(0))
                    .unwrap();
            let ids: Vec<_> = (0..NUM_ACCOUNTS).map(|_| store.add_account()).collect();
            for id in ids {
                let mut record = store.get(id).unwrap();
                record.login = format!("user{id}");
                store.update_account(record);
            }
            store.settle().await;
        });
    });

    group.finish();
}

criterion_group!(benches, store_mutations);
criterion_main!(benches);
