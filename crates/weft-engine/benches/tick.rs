//! Tick-loop benchmarks: how fast does a sheet evaluate end to end?

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use weft_core::{
    Block, BlockKind, Connection, LoggerParams, Sheet, SignalParams, SourceParams, SumParams,
    TransferFnParams, WaveShape,
};
use weft_engine::{SimConfig, Simulation};

/// A chain: sine → tf₀ → tf₁ → … → tfₙ₋₁ → logger, plus a sum fan-in.
fn chain_sheet(filters: usize) -> Sheet {
    let mut blocks = vec![Block::new(
        "sig",
        BlockKind::Source(SourceParams::signal(SignalParams {
            shape: WaveShape::Sine,
            period: 1.0,
            amplitude: 1.0,
            offset: 0.0,
        })),
    )];
    let mut connections = Vec::new();

    let mut upstream = "sig".to_string();
    for i in 0..filters {
        let id = format!("tf{i}");
        blocks.push(Block::new(
            id.as_str(),
            BlockKind::TransferFn(TransferFnParams::parse("0.5", "1,-0.5").unwrap()),
        ));
        connections.push(Connection::new(upstream.as_str(), id.as_str(), "in"));
        upstream = id;
    }

    blocks.push(Block::new("sum", BlockKind::Sum(SumParams::default())));
    connections.push(Connection::new("sig", "sum", "in1"));
    connections.push(Connection::new(upstream.as_str(), "sum", "in2"));

    blocks.push(Block::new(
        "log",
        BlockKind::Logger(LoggerParams {
            recording: true,
            max_entries: 64,
        }),
    ));
    connections.push(Connection::new("sum", "log", "in"));

    Sheet::new(blocks, connections)
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for filters in [4usize, 32, 128] {
        let sheet = chain_sheet(filters);
        group.bench_function(format!("chain_{filters}"), |b| {
            b.iter_batched(
                || Simulation::new(SimConfig::default()).unwrap(),
                |mut sim| {
                    for _ in 0..100 {
                        sim.step(&sheet).unwrap();
                    }
                    sim
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
