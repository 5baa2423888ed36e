//! Image to stream to image.

use cdg_rs::prelude::*;
use image::{Rgb, RgbImage};
use test_log::test;

/// Compares the area inside the border; the border shows the border color.
fn assert_screen_matches(renderer: &Renderer, image: &RgbImage) {
	let rendered = renderer.render().to_rgb_image();
	for y in constants::BORDER_HEIGHT as u32..(constants::SCREEN_HEIGHT - constants::BORDER_HEIGHT) as u32 {
		for x in constants::BORDER_WIDTH as u32..(constants::SCREEN_WIDTH - constants::BORDER_WIDTH) as u32 {
			assert_eq!(rendered.get_pixel(x, y), image.get_pixel(x, y), "pixel ({x}, {y})");
		}
	}
	assert_eq!(rendered.get_pixel(0, 0), &Rgb([0, 0, 0]));
}

fn title_card() -> RgbImage {
	// channel values are multiples of 17 so they survive 4-bit color tables
	RgbImage::from_fn(300, 216, |x, y| match (x / 50, y / 72) {
		(0, _) => Rgb([0, 0, 0]),
		(1, 0) => Rgb([255, 0, 0]),
		(1, _) => Rgb([0, 255, 0]),
		(2, 1) => Rgb([0, 0, 255]),
		(3, _) if (x + y) % 7 == 0 => Rgb([255, 255, 255]),
		(4, 2) => Rgb([68, 136, 204]),
		_ => Rgb([17, 34, 51]),
	})
}

#[test]
fn synthesized_stream_renders_source_image() {
	let image = title_card();
	let sequence = synthesize(&image, &PassthroughQuantizer).unwrap();

	let mut renderer = Renderer::new();
	assert_eq!(renderer.apply_all(&sequence), 0);
	assert_screen_matches(&renderer, &image);
}

#[test]
fn synthesized_stream_survives_bytes() {
	let image = title_card();
	let sequence = synthesize(&image, &PassthroughQuantizer).unwrap();

	let bytes = sequence.to_bytes();
	assert_eq!(bytes.len(), sequence.len() * constants::PACKET_SIZE);

	let reloaded = PacketSequence::from_bytes(&bytes).unwrap();
	assert_eq!(reloaded.len(), sequence.len());
	assert!(reloaded.iter().zip(sequence.iter()).all(|(a, b)| a.data() == b.data()));

	let mut renderer = Renderer::new();
	renderer.apply_all(&reloaded);
	assert_screen_matches(&renderer, &image);
}

#[test]
fn synthesized_stream_passes_repair() {
	let image = title_card();
	let mut sequence = synthesize(&image, &PassthroughQuantizer).unwrap();

	// every off color is 0 and every location is on screen
	let results = repair(&mut sequence, &Rules::default(), &RepairConfig::default());
	assert!(results.iter().all(|r| r.kind != ValidationKind::Unresolved));
	assert!(results.iter().all(|r| !r.message.contains("column") && !r.message.contains("row")));
}

#[test]
fn unknown_instructions_survive_reload() {
	let mut bytes = crate::stream(&[crate::frame(5, &[1, 2, 3]), crate::frame(1, &[7, 0])]);
	bytes[0] = 0x3C;

	let sequence = PacketSequence::from_bytes(&bytes).unwrap();
	assert_eq!(sequence[0].instruction(), Instruction::Timing);
	assert_eq!(sequence.to_bytes(), bytes);
}

#[test]
fn untouched_stream_saves_identical_bytes() {
	let mut border = crate::frame(2, &[5]);
	border[0] = 0x00;
	border[2] = 0x11;
	border[21] = 0x2A;
	let mut tile = crate::frame(6, &[0x10, 0x21, 3, 7, 0xFF]);
	tile[23] = 0x55;
	let bytes = crate::stream(&[border, tile]);

	let mut sequence = PacketSequence::from_bytes(&bytes).unwrap();
	assert_eq!(sequence.to_bytes(), bytes);

	// a repair pass that finds nothing to fix leaves the bytes alone
	repair(&mut sequence, &Rules::default(), &RepairConfig::default());
	assert_eq!(sequence.to_bytes(), bytes);
}

#[test]
fn trailing_partial_frame_is_dropped() {
	let mut bytes = crate::stream(&[crate::frame(1, &[0, 0]); 2]);
	bytes.extend_from_slice(&[0x09, 0x06, 0, 0]);

	let sequence = PacketSequence::from_bytes(&bytes).unwrap();
	assert_eq!(sequence.len(), 2);
}

#[test]
fn saved_file_reopens() {
	let dir = std::env::temp_dir().join(format!("cdg_rs_pipeline_{}", std::process::id()));
	std::fs::create_dir_all(&dir).unwrap();
	let path = dir.join("title.CDG");

	let sequence = synthesize(&title_card(), &PassthroughQuantizer).unwrap();
	sequence.save(&path).unwrap();
	let reopened = PacketSequence::open(&path).unwrap();
	assert_eq!(reopened.to_bytes(), sequence.to_bytes());

	let wrong = dir.join("title.bin");
	std::fs::write(&wrong, sequence.to_bytes()).unwrap();
	assert!(matches!(PacketSequence::open(&wrong), Err(CdgError::UnsupportedExtension { .. })));

	std::fs::remove_dir_all(&dir).unwrap();
}
