//! Benchmark suite for the CD+G renderer
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench cdg_render

use cdg_benches::{generate_test_cdg_data, sizes};
use cdg_types::packet::{MemoryPreset, Packet, PacketData, TileBlock, TileBlockType, TilePixels};
use cdg_types::render::Renderer;
use cdg_types::sequence::PacketSequence;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Benchmark replaying a full track through a fresh renderer
fn bench_apply_track(c: &mut Criterion) {
	let mut group = c.benchmark_group("cdg_apply");

	let data = generate_test_cdg_data(sizes::TRACK, 42);
	let sequence = match PacketSequence::from_bytes(&data) {
		Ok(sequence) => sequence,
		Err(e) => {
			eprintln!("Warning: Could not decode synthetic stream: {e}");
			return;
		}
	};

	group.sample_size(30);
	group.throughput(Throughput::Elements(sequence.len() as u64));
	group.bench_function("apply_all", |b| {
		b.iter(|| {
			let mut renderer = Renderer::new();
			black_box(renderer.apply_all(black_box(&sequence)))
		});
	});

	group.finish();
}

/// Benchmark individual operations
fn bench_operations(c: &mut Criterion) {
	let mut group = c.benchmark_group("cdg_ops");

	let clear = Packet::new(PacketData::MemoryPreset(MemoryPreset::new(3, 0)));
	group.bench_function("memory_preset", |b| {
		let mut renderer = Renderer::new();
		b.iter(|| black_box(renderer.apply(black_box(&clear))));
	});

	let tile = Packet::new(PacketData::TileBlock(
		TileBlock::new(TileBlockType::Xor, 8, 25, 1, 0).with_pixels(TilePixels::filled()),
	));
	group.bench_function("tile_block_xor", |b| {
		let mut renderer = Renderer::new();
		b.iter(|| black_box(renderer.apply(black_box(&tile))));
	});

	group.finish();
}

/// Benchmark resolving the framebuffer into colors and images
fn bench_render(c: &mut Criterion) {
	let mut group = c.benchmark_group("cdg_render");

	let data = generate_test_cdg_data(sizes::MINUTE, 42);
	let mut renderer = Renderer::with_default_palette();
	if let Ok(sequence) = PacketSequence::from_bytes(&data) {
		renderer.apply_all(&sequence);
	}

	group.throughput(Throughput::Elements(300 * 216));
	group.bench_function("render", |b| {
		b.iter(|| black_box(renderer.render()));
	});

	let raster = renderer.render();
	group.bench_function("to_rgb_image", |b| {
		b.iter(|| black_box(raster.to_rgb_image()));
	});

	group.finish();
}

criterion_group!(benches, bench_apply_track, bench_operations, bench_render);

criterion_main!(benches);
