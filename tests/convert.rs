//! End-to-end decode + encode scenarios on synthetic BMPs.

use bmp2array::*;
use enough::Unstoppable;

/// Minimal BMP with a 40-byte info header and `palette` BGRA entries.
fn build_bmp(width: u32, height: u32, depth: u16, palette: u32, rows: &[Vec<u8>]) -> Vec<u8> {
    let offset = 54 + palette * 4;
    let data_len: usize = rows.iter().map(Vec::len).sum();
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + data_len as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&depth.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(data_len as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&palette.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for i in 0..palette {
        let v = i as u8;
        out.extend_from_slice(&[v, v, v, 0]);
    }
    for row in rows {
        out.extend_from_slice(row);
    }
    out
}

fn set_compression(bmp: &mut [u8], code: u32) {
    bmp[30..34].copy_from_slice(&code.to_le_bytes());
}

/// Array body lines between `{` and `};`.
fn body_lines(text: &str) -> Vec<&str> {
    let start = text.find("{\n").unwrap() + 2;
    let end = text.rfind("};").unwrap();
    text[start..end].lines().collect()
}

// ── 1-bit ────────────────────────────────────────────────────────────

#[test]
fn mono_2x2_end_to_end() {
    let rows = vec![vec![0b1000_0000, 0, 0, 0], vec![0b0100_0000, 0, 0, 0]];
    let bmp = build_bmp(2, 2, 1, 2, &rows);

    let record = DecodeRequest::new(&bmp)
        .with_depth(BitDepth::One)
        .decode(Unstoppable);
    assert!(record.status().is_ok());
    assert!(record.decode_complete());
    assert!(record.image_data_read());

    let header = record.header();
    assert_eq!(&header.signature, b"BM");
    assert_eq!(header.header_size, 54);
    assert_eq!(header.pixel_data_offset, 62);
    assert!(header.has_palette);
    assert_eq!(header.row_stride, 4);
    assert_eq!(header.depth, BitDepth::One);
    assert_eq!(header.compression, Compression::None);
    assert_eq!(record.rows(), &rows[..]);

    let text = encode_array(&record, false, Unstoppable).unwrap();
    assert_eq!(
        text,
        "static const uint8_t imgArray[] = \n{\n\
         0b01111111, 0b11111111, 0b11111111, 0b11111111, \n\
         0b10111111, 0b11111111, 0b11111111, 0b11111111, \n\
         };"
    );
}

#[test]
fn mono_polarity_all_zero_and_all_ones() {
    let bmp = build_bmp(64, 2, 1, 2, &[vec![0x00; 8], vec![0xff; 8]]);
    let record = decode_bmp(&bmp, Unstoppable);
    let text = encode_array(&record, false, Unstoppable).unwrap();
    let lines = body_lines(&text);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "0b11111111, ".repeat(8));
    assert_eq!(lines[1], "0b00000000, ".repeat(8));
}

#[test]
fn mono_reverse_flips_row_order() {
    let rows: Vec<Vec<u8>> = (0..5u8).map(|i| vec![i, 0, 0, i]).collect();
    let bmp = build_bmp(20, 5, 1, 2, &rows);
    let record = decode_bmp(&bmp, Unstoppable);

    let forward = encode_array(&record, false, Unstoppable).unwrap();
    let reversed = encode_array(&record, true, Unstoppable).unwrap();
    let mut forward_lines = body_lines(&forward);
    let reversed_lines = body_lines(&reversed);
    assert_eq!(forward_lines.len(), 5);
    assert_ne!(forward_lines, reversed_lines);
    forward_lines.reverse();
    assert_eq!(forward_lines, reversed_lines);
}

#[test]
fn mono_dump_is_not_inverted() {
    let bmp = build_bmp(2, 1, 1, 2, &[vec![0b1100_0000, 0, 0, 0]]);
    let record = decode_bmp(&bmp, Unstoppable);
    let dump = dump_rows(&record).unwrap();
    assert_eq!(dump, format!("11{}\n", "0".repeat(30)));
}

#[test]
fn custom_array_name() {
    let bmp = build_bmp(8, 1, 1, 2, &[vec![0xaa, 0, 0, 0]]);
    let record = decode_bmp(&bmp, Unstoppable);
    let text = ArrayRequest::new()
        .with_name("logo")
        .encode(&record, Unstoppable)
        .unwrap();
    assert!(text.starts_with("static const uint8_t logo[] = \n{\n0b01010101, "));
}

// ── 4-bit ────────────────────────────────────────────────────────────

fn nibble_record() -> ImageRecord {
    // width 3: stride 4, pixel bytes 2
    let rows = vec![vec![0x12, 0x34, 0x00, 0x00], vec![0xab, 0xc0, 0x00, 0x00]];
    let bmp = build_bmp(3, 2, 4, 16, &rows);
    let record = DecodeRequest::new(&bmp)
        .with_depth(BitDepth::Four)
        .decode(Unstoppable);
    assert!(record.status().is_ok());
    record
}

#[test]
fn nibble_output_is_reversed_and_complemented() {
    let record = nibble_record();
    assert_eq!(record.header().row_stride, 4);
    let text = encode_array(&record, false, Unstoppable).unwrap();
    assert_eq!(
        text,
        "static const uint8_t imgArray[] = \n{\n84,\t63,\t\n237,\t203,\t\n};"
    );
}

#[test]
fn nibble_output_ignores_reverse_flag() {
    let record = nibble_record();
    let plain = encode_array(&record, false, Unstoppable).unwrap();
    let reversed = encode_array(&record, true, Unstoppable).unwrap();
    assert_eq!(plain, reversed);
}

#[test]
fn nibble_output_can_follow_reverse_flag() {
    let record = nibble_record();
    let text = ArrayRequest::new()
        .nibble_row_order(NibbleRowOrder::FollowReverseFlag)
        .encode(&record, Unstoppable)
        .unwrap();
    assert_eq!(body_lines(&text), ["237,\t203,\t", "84,\t63,\t"]);
}

#[test]
fn nibble_padded_stride_emits_padding() {
    let record = nibble_record();
    let text = ArrayRequest::new()
        .nibble_stride(NibbleStride::Padded)
        .encode(&record, Unstoppable)
        .unwrap();
    assert_eq!(
        body_lines(&text),
        ["84,\t63,\t255,\t255,\t", "237,\t203,\t255,\t255,\t"]
    );
}

#[test]
fn nibble_dump_lists_nibbles() {
    let record = nibble_record();
    let dump = dump_rows(&record).unwrap();
    assert_eq!(dump, "1 2 3 4 \n10 11 12 0 \n");
}

// ── Failures ─────────────────────────────────────────────────────────

#[test]
fn truncated_row_is_reported_and_not_encoded() {
    let mut bmp = build_bmp(2, 1, 1, 2, &[vec![0xff, 0xff, 0xff, 0xff]]);
    bmp.truncate(bmp.len() - 2);

    let record = decode_bmp(&bmp, Unstoppable);
    assert!(matches!(record.status(), Err(BitmapError::TruncatedStream)));
    assert!(record.decode_complete());
    assert!(!record.image_data_read());
    assert!(record.rows().is_empty());

    assert!(matches!(
        encode_array(&record, false, Unstoppable),
        Err(BitmapError::NotDecoded)
    ));
    assert!(matches!(dump_rows(&record), Err(BitmapError::NotDecoded)));
}

#[test]
fn truncation_keeps_rows_already_read() {
    let mut bmp = build_bmp(2, 2, 1, 2, &[vec![1, 2, 3, 4], vec![5, 6, 7, 8]]);
    bmp.truncate(bmp.len() - 1);

    let record = decode_bmp(&bmp, Unstoppable);
    assert!(matches!(record.status(), Err(BitmapError::TruncatedStream)));
    assert_eq!(record.rows(), &[vec![1u8, 2, 3, 4]]);
    assert_eq!(record.header().width, 2);
}

#[test]
fn truncated_header_keeps_fields_read_so_far() {
    let bmp = build_bmp(2, 2, 1, 2, &[vec![0; 4], vec![0; 4]]);
    let record = decode_bmp(&bmp[..20], Unstoppable);
    assert!(matches!(record.status(), Err(BitmapError::TruncatedStream)));
    assert!(record.decode_complete());
    assert_eq!(&record.header().signature, b"BM");
    assert_eq!(record.header().header_size, 54);
    assert_eq!(record.header().width, 0);
}

#[test]
fn unsupported_header_depth() {
    let bmp = build_bmp(1, 1, 24, 0, &[vec![0, 0, 255, 0]]);
    let record = decode_bmp(&bmp, Unstoppable);
    assert!(matches!(
        record.status(),
        Err(BitmapError::UnsupportedDepth { depth: 24 })
    ));
    assert!(record.decode_complete());
    assert!(record.rows().is_empty());
    assert_eq!(record.header().depth, BitDepth::TwentyFour);
    assert!(!record.header().has_palette);
}

#[test]
fn unsupported_requested_depth() {
    let bmp = build_bmp(2, 1, 1, 2, &[vec![0; 4]]);
    let record = DecodeRequest::new(&bmp)
        .with_depth(BitDepth::TwentyFour)
        .decode(Unstoppable);
    assert!(matches!(
        record.status(),
        Err(BitmapError::UnsupportedDepth { depth: 24 })
    ));
    assert!(record.rows().is_empty());
}

#[test]
fn compressed_data_is_rejected() {
    let mut bmp = build_bmp(3, 2, 4, 16, &[vec![0; 4], vec![0; 4]]);
    set_compression(&mut bmp, 2);
    let record = decode_bmp(&bmp, Unstoppable);
    assert!(matches!(
        record.status(),
        Err(BitmapError::UnsupportedCompression { code: 2 })
    ));
    assert_eq!(record.header().compression, Compression::Rle4);
    assert!(record.rows().is_empty());
}

#[test]
fn limits_reject_tall_image() {
    let bmp = build_bmp(2, 2, 1, 2, &[vec![0; 4], vec![0; 4]]);
    let limits = Limits {
        max_height: Some(1),
        ..Default::default()
    };
    let record = DecodeRequest::new(&bmp)
        .with_limits(&limits)
        .decode(Unstoppable);
    match record.into_result() {
        Err(BitmapError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn limits_reject_large_row_store() {
    let bmp = build_bmp(64, 2, 1, 2, &[vec![0; 8], vec![0; 8]]);
    let limits = Limits {
        max_memory_bytes: Some(15),
        ..Default::default()
    };
    let record = DecodeRequest::new(&bmp)
        .with_limits(&limits)
        .decode(Unstoppable);
    assert!(matches!(record.status(), Err(BitmapError::LimitExceeded(_))));
}

// ── Header variants ──────────────────────────────────────────────────

#[test]
fn extended_dib_header_is_skipped() {
    let rows = vec![vec![0x80, 0, 0, 0]];
    let plain = build_bmp(1, 1, 1, 2, &rows);

    // Grow the 40-byte header to a 124-byte BITMAPV5HEADER.
    let mut v5 = plain[..54].to_vec();
    v5.extend_from_slice(&[0u8; 84]);
    v5.extend_from_slice(&plain[54..]);
    v5[10..14].copy_from_slice(&(62u32 + 84).to_le_bytes());
    v5[14..18].copy_from_slice(&124u32.to_le_bytes());

    let record = decode_bmp(&v5, Unstoppable);
    assert!(record.status().is_ok());
    assert_eq!(record.header().header_size, 138);
    assert_eq!(record.rows(), &rows[..]);
}

#[test]
fn short_dib_header_is_rejected() {
    let mut bmp = build_bmp(1, 1, 1, 2, &[vec![0; 4]]);
    bmp[14..18].copy_from_slice(&12u32.to_le_bytes());
    let record = decode_bmp(&bmp, Unstoppable);
    assert!(matches!(record.status(), Err(BitmapError::InvalidHeader(_))));
}

#[test]
fn offset_inside_header_is_rejected() {
    let mut bmp = build_bmp(1, 1, 1, 0, &[vec![0; 4]]);
    bmp[10..14].copy_from_slice(&40u32.to_le_bytes());
    let record = decode_bmp(&bmp, Unstoppable);
    assert!(record.header().has_palette);
    assert!(matches!(record.status(), Err(BitmapError::InvalidHeader(_))));
}

#[test]
fn foreign_signature_still_decodes() {
    let mut bmp = build_bmp(1, 1, 1, 2, &[vec![0; 4]]);
    bmp[0..2].copy_from_slice(b"BA");
    let record = decode_bmp(&bmp, Unstoppable);
    assert!(record.status().is_ok());
    assert_eq!(&record.header().signature, b"BA");
}

#[test]
fn trace_reports_fields_in_order() {
    let bmp = build_bmp(2, 1, 1, 2, &[vec![0; 4]]);
    let mut events: Vec<TraceEvent> = Vec::new();
    let record = DecodeRequest::new(&bmp)
        .with_trace(&mut events)
        .decode(Unstoppable);
    assert!(record.status().is_ok());

    assert_eq!(events.first(), Some(&TraceEvent::Signature(*b"BM")));
    assert!(events.contains(&TraceEvent::Palette(Some(2))));
    assert!(events.contains(&TraceEvent::RowStride(4)));
    assert_eq!(
        events.last(),
        Some(&TraceEvent::Finished {
            image_data_read: true
        })
    );
}

// ── File output ──────────────────────────────────────────────────────

#[test]
fn write_file_writes_array() {
    let bmp = build_bmp(8, 1, 1, 2, &[vec![0x0f, 0, 0, 0]]);
    let record = decode_bmp(&bmp, Unstoppable);
    let path = std::env::temp_dir().join(format!("bmp2array-write-{}.c", std::process::id()));

    ArrayRequest::new()
        .write_file(&record, &path, Unstoppable)
        .unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(written, encode_array(&record, false, Unstoppable).unwrap());
}

#[test]
fn write_file_skips_failed_decode() {
    let bmp = build_bmp(8, 1, 1, 2, &[vec![0x0f, 0, 0, 0]]);
    let record = decode_bmp(&bmp[..bmp.len() - 1], Unstoppable);
    let path = std::env::temp_dir().join(format!("bmp2array-skip-{}.c", std::process::id()));

    let result = ArrayRequest::new().write_file(&record, &path, Unstoppable);
    assert!(matches!(result, Err(BitmapError::NotDecoded)));
    assert!(!path.exists());
}

#[test]
fn write_file_reports_unwritable_output() {
    let bmp = build_bmp(8, 1, 1, 2, &[vec![0x0f, 0, 0, 0]]);
    let record = decode_bmp(&bmp, Unstoppable);
    let path = std::env::temp_dir()
        .join(format!("bmp2array-missing-{}", std::process::id()))
        .join("out.c");

    let result = ArrayRequest::new().write_file(&record, &path, Unstoppable);
    assert!(matches!(result, Err(BitmapError::OutputUnwritable { .. })));
}
