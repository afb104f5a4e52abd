use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use recent_workspaces::classify;
use recent_workspaces::parsers::parse_history_payload;

/// Synthetic recently-opened payload mixing local, remote and file entries
fn generate_payload(num_entries: usize) -> String {
    let entries: Vec<String> = (0..num_entries)
        .map(|i| match i % 5 {
            0 => format!(r#"{{"folderUri":"file:///home/dev/project-{}"}}"#, i),
            1 => format!(
                r#"{{"folderUri":"vscode-remote://wsl%2BUbuntu/home/dev/service-{}","remoteAuthority":"wsl+Ubuntu"}}"#,
                i
            ),
            2 => format!(
                r#"{{"folderUri":"vscode-remote://ssh-remote%2Bbuild/srv/app%20{}","remoteAuthority":"ssh-remote+build"}}"#,
                i
            ),
            3 => format!(r#"{{"folderUri":"vscode-remote://dev-container%2B{:x}/workspaces/w{}"}}"#, i, i),
            _ => format!(r#"{{"fileUri":"file:///home/dev/notes-{}.md"}}"#, i),
        })
        .collect();
    format!(r#"{{"entries":[{}]}}"#, entries.join(","))
}

fn bench_parse_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_history_payload");

    for size in [50, 500, 5_000].iter() {
        let payload = generate_payload(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| parse_history_payload(black_box(&payload)).unwrap());
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for size in [50, 500, 5_000].iter() {
        let document = parse_history_payload(&generate_payload(*size)).unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| classify(black_box(&document)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_payload, bench_classify);
criterion_main!(benches);
