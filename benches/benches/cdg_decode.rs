//! Benchmark suite for CD+G stream decoding and repair
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use cdg_benches::{generate_test_cdg_data, sizes};
use cdg_types::codec::{decode, encode};
use cdg_types::constants::PACKET_SIZE;
use cdg_types::repair::{RepairConfig, Rules, repair};
use cdg_types::sequence::PacketSequence;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Benchmark loading whole streams of increasing length
fn bench_load_stream(c: &mut Criterion) {
	let mut group = c.benchmark_group("cdg_load");

	for (name, count) in [("second", sizes::SECOND), ("minute", sizes::MINUTE), ("track", sizes::TRACK)] {
		let data = generate_test_cdg_data(count, 42);
		group.throughput(Throughput::Elements(count as u64));
		group.bench_with_input(BenchmarkId::new("from_bytes", name), &data, |b, data| {
			b.iter(|| {
				let result = PacketSequence::from_bytes(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark single frame decode and encode
fn bench_frame_codec(c: &mut Criterion) {
	let mut group = c.benchmark_group("cdg_frame");

	let data = generate_test_cdg_data(sizes::SECOND, 42);
	let frames: Vec<[u8; PACKET_SIZE]> = data
		.chunks_exact(PACKET_SIZE)
		.filter_map(|chunk| chunk.try_into().ok())
		.collect();

	group.throughput(Throughput::Elements(frames.len() as u64));
	group.bench_function("decode", |b| {
		b.iter(|| {
			for frame in &frames {
				black_box(decode(black_box(frame)));
			}
		});
	});

	let packets: Vec<_> = frames.iter().map(decode).collect();
	group.bench_function("encode", |b| {
		b.iter(|| {
			for packet in &packets {
				black_box(encode(black_box(packet.data())));
			}
		});
	});

	group.finish();
}

/// Benchmark a repair pass over a full track
fn bench_repair(c: &mut Criterion) {
	let mut group = c.benchmark_group("cdg_repair");

	let data = generate_test_cdg_data(sizes::TRACK, 42);
	let sequence = match PacketSequence::from_bytes(&data) {
		Ok(sequence) => sequence,
		Err(e) => {
			eprintln!("Warning: Could not decode synthetic stream: {e}");
			return;
		}
	};
	let rules = Rules::default();

	group.sample_size(50);
	group.throughput(Throughput::Elements(sequence.len() as u64));
	for (name, config) in [("strict", RepairConfig::strict()), ("default", RepairConfig::default())] {
		group.bench_function(name, |b| {
			b.iter_batched(
				|| sequence.clone(),
				|mut sequence| black_box(repair(&mut sequence, &rules, &config)),
				criterion::BatchSize::LargeInput,
			);
		});
	}

	group.finish();
}

criterion_group!(benches, bench_load_stream, bench_frame_codec, bench_repair);

criterion_main!(benches);
