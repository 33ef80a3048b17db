use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pegs_core::{AwardPolicy, PegEvent, aggregate, close_out, rank};

const TIERS: [(&str, usize); 3] = [("small", 100), ("medium", 2_000), ("large", 20_000)];
const LABELS: [&str; 3] = ["brave", "awesome", "customer"];

/// Deterministic snapshot: 50 people, roughly one penalty in ten.
fn snapshot(count: usize) -> Vec<PegEvent> {
    (0..count)
        .map(|i| {
            let sender = i % 50;
            let receiver = (i * 7 + 3) % 50;
            PegEvent {
                sender_id: format!("p{sender}"),
                sender_name: format!("Person {sender}"),
                receiver_id: format!("p{receiver}"),
                receiver_name: format!("Person {receiver}"),
                comment: String::new(),
                categories: std::iter::once(LABELS[i % LABELS.len()].to_string()).collect(),
                is_valid: i % 10 != 0,
            }
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("standings.rank");

    for (name, count) in TIERS {
        let events = snapshot(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &events, |b, events| {
            b.iter(|| {
                let standings = aggregate(events).expect("generated events are valid");
                black_box(rank(&standings).len())
            });
        });
    }

    group.finish();
}

fn bench_close_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("standings.close_out");

    for (name, count) in TIERS {
        let events = snapshot(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &events, |b, events| {
            b.iter(|| {
                let report = close_out(events, &LABELS, &AwardPolicy::new(1, Some(3)))
                    .expect("generated events are valid");
                black_box(report.categories.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank, bench_close_out);
criterion_main!(benches);
