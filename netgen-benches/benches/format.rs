//! Text format benchmarks.
//!
//! Writing and reading are measured separately on networks generated once
//! during setup.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use netgen_benches::{error::BenchSetupError, scenario};
use netgen_core::{read_problem, write_network};

fn format_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut write_group = c.benchmark_group("write_network");
    let mut rendered = Vec::new();
    for scenario in scenario::all() {
        let network = scenario.generator()?.generate()?;
        let mut text = Vec::new();
        write_network(&network, &mut text)?;
        // Fail setup rather than benchmark an unreadable file.
        read_problem(text.as_slice())?;

        write_group.throughput(Throughput::Bytes(text.len() as u64));
        write_group.bench_with_input(
            BenchmarkId::from_parameter(&scenario),
            &network,
            |b, network| {
                b.iter(|| {
                    let mut buffer = Vec::with_capacity(text.len());
                    write_network(network, &mut buffer)
                });
            },
        );
        rendered.push((scenario, text));
    }
    write_group.finish();

    let mut read_group = c.benchmark_group("read_problem");
    for (scenario, text) in &rendered {
        read_group.throughput(Throughput::Bytes(text.len() as u64));
        read_group.bench_with_input(BenchmarkId::from_parameter(scenario), text, |b, text| {
            b.iter(|| read_problem(text.as_slice()));
        });
    }
    read_group.finish();
    Ok(())
}

fn format(c: &mut Criterion) {
    if let Err(err) = format_impl(c) {
        panic!("format benchmark setup failed: {err}");
    }
}

criterion_group!(benches, format);
criterion_main!(benches);
