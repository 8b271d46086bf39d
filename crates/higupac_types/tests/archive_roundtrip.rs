//! End-to-end tests over complete in-memory PAC archives.

use std::io::Cursor;

use higupac_types::prelude::*;

/// Builds the editable inputs of a small accessory archive: one bitmap,
/// one animation document, one opaque blob.
fn editable_fixtures() -> Vec<(&'static str, PayloadKind, Vec<u8>)> {
	let bitmap = {
		// Tiny fake bitmap; contents are opaque to the codec
		let mut raw = b"BM".to_vec();
		raw.extend(std::iter::repeat_n(0x5Au8, 256));
		raw
	};

	let animation = serde_json::json!({
		"maybe_ttp_type": 3,
		"frame_count": 2,
		"window_width": 160,
		"window_height": 120,
		"frames": [
			{
				"sprite_name": "梨花立ち絵.bmz",
				"se_name": "",
				"textbox_name": "box.bmz",
				"delay_ms": 120,
				"x_offset_textbox": 8,
				"y_offset_textbox": 8,
				"x_offset": 0,
				"y_offset": 0
			},
			{
				"sprite_name": "梨花笑顔.bmz",
				"se_name": "se_suzu",
				"textbox_name": "",
				"delay_ms": 360,
				"x_offset_textbox": 0,
				"y_offset_textbox": 0,
				"x_offset": 4,
				"y_offset": 12
			}
		],
		"onetime_wakeup_dont_play_sound": 1
	})
	.to_string()
	.into_bytes();

	vec![
		("rika.bmp", PayloadKind::Bmz, bitmap),
		("wakeup.json", PayloadKind::Ttp, animation),
		("config.dat", PayloadKind::Other, b"opaque configuration".to_vec()),
	]
}

#[test]
fn pack_then_reread_preserves_everything() {
	let fixtures = editable_fixtures();

	let mut builder = PacFileBuilder::new();
	for (name, kind, data) in &fixtures {
		let payload = Payload::from_editable(data, *kind).unwrap();
		let packed_name = match *kind {
			PayloadKind::Bmz => name.replace(".bmp", ".bmz"),
			PayloadKind::Ttp => name.replace(".json", ".ttp"),
			PayloadKind::Other => (*name).to_string(),
		};
		builder.add_entry(packed_name, payload).unwrap();
	}

	let bytes = builder.to_bytes().unwrap();
	let archive = PacFile::from_reader(&mut Cursor::new(&bytes)).unwrap();

	assert_eq!(archive.num_entries(), 3);

	// Bitmap extracts back to the original raw bytes
	let bmp = archive.find_entry("rika.bmz").unwrap();
	assert_eq!(bmp.payload.kind(), PayloadKind::Bmz);
	assert_eq!(bmp.payload.to_editable().unwrap(), fixtures[0].2);

	// Animation survives with its optional flag and Shift-JIS names
	let ttp = archive.find_entry("wakeup.ttp").unwrap();
	match &ttp.payload {
		Payload::Ttp {
			file,
			..
		} => {
			assert_eq!(file.maybe_ttp_type, 3);
			assert_eq!(file.num_frames(), 2);
			assert_eq!(file.onetime_wakeup_dont_play_sound, Some(1));
			assert_eq!(file.frames[0].sprite_name.as_str(), "梨花立ち絵.bmz");
		}
		other => panic!("expected ttp payload, got {}", other.kind()),
	}

	// Opaque data passes through untouched
	let dat = archive.find_entry("config.dat").unwrap();
	assert_eq!(dat.payload.to_editable().unwrap(), b"opaque configuration");
}

#[test]
fn offsets_match_header_block_plus_prefix_sums() {
	let mut builder = PacFileBuilder::new();
	for (name, kind, data) in editable_fixtures() {
		builder.add_entry(name, Payload::from_editable(&data, kind).unwrap()).unwrap();
	}

	let bytes = builder.to_bytes().unwrap();
	let archive = PacFile::from_reader(&mut Cursor::new(&bytes)).unwrap();

	let mut expected = (4 + 3 * Entry::header_size()) as u32;
	for entry in archive.entries() {
		assert_eq!(entry.offset, expected);
		expected += entry.size;
	}
	assert_eq!(expected as usize, bytes.len());
}

#[test]
fn stale_frame_count_is_normalized_through_packing() {
	// A hand-edited document declaring 99 frames but holding 2
	let mut doc: serde_json::Value =
		serde_json::from_slice(&editable_fixtures()[1].2).unwrap();
	doc["frame_count"] = serde_json::json!(99);

	let payload = Payload::from_editable(doc.to_string().as_bytes(), PayloadKind::Ttp).unwrap();

	let mut builder = PacFileBuilder::new();
	builder.add_entry("wakeup.ttp", payload).unwrap();
	let bytes = builder.to_bytes().unwrap();

	let archive = PacFile::from_reader(&mut Cursor::new(&bytes)).unwrap();
	match &archive.entries()[0].payload {
		Payload::Ttp {
			file,
			raw,
		} => {
			assert_eq!(file.num_frames(), 2);
			// The binary header itself carries the true count
			assert_eq!(u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]), 2);
		}
		other => panic!("expected ttp payload, got {}", other.kind()),
	}
}

#[test]
fn editable_json_reimports_identically() {
	// extract -> edit nothing -> repack must be byte-stable
	let payload = Payload::from_editable(&editable_fixtures()[1].2, PayloadKind::Ttp).unwrap();
	let packed_once = payload.to_packed_bytes();

	let json = payload.to_editable().unwrap();
	let reimported = Payload::from_editable(&json, PayloadKind::Ttp).unwrap();

	assert_eq!(reimported.to_packed_bytes(), packed_once);
}

#[test]
fn name_capacity_is_enforced_at_pack_time() {
	let mut builder = PacFileBuilder::new();

	// 27 two-byte kana plus ".b" is 56 encoded bytes: one too many
	let name = format!("{}.b", "あ".repeat(27));
	let err = builder.add_entry(name, Payload::Other(Vec::new())).unwrap_err();
	assert!(matches!(err, PacError::NameTooLong { encoded_len: 56, .. }));

	// One kana fewer fits
	let name = format!("{}.b", "あ".repeat(26));
	builder.add_entry(name, Payload::Other(Vec::new())).unwrap();
	assert_eq!(builder.num_entries(), 1);
}
