#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32, depth: u16, palette: u32, stride: usize) -> Vec<u8> {
    let offset = 54 + palette * 4;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + (stride * height as usize) as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&offset.to_le_bytes()); // data offset
    out.extend_from_slice(&40u32.to_le_bytes()); // DIB header size
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&depth.to_le_bytes());
    out.extend_from_slice(&[0u8; 16]); // compression, image size, resolution
    out.extend_from_slice(&palette.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // colors important
    for i in 0..palette {
        let v = (i * 17) as u8;
        out.extend_from_slice(&[v, v, v, 0]);
    }
    for i in 0..stride * height as usize {
        out.push((i * 37) as u8);
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/mono_2x2.bmp"), bmp(2, 2, 1, 2, 4)).unwrap();
    fs::write(format!("{dir}/mono_33x3.bmp"), bmp(33, 3, 1, 2, 8)).unwrap();
    fs::write(format!("{dir}/nibble_3x2.bmp"), bmp(3, 2, 4, 16, 4)).unwrap();
    fs::write(format!("{dir}/nibble_9x4.bmp"), bmp(9, 4, 4, 16, 8)).unwrap();
    fs::write(format!("{dir}/rgb_1x1.bmp"), bmp(1, 1, 24, 0, 4)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut cut = bmp(2, 2, 1, 2, 4);
    cut.truncate(cut.len() - 3);
    fs::write(format!("{dir}/mono_cut_row.bmp"), cut).unwrap();

    println!("Generated seed corpus in {dir}/");
}
