#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic, and must always finish the attempt
    let record = bmp2array::decode_bmp(data, enough::Unstoppable);
    assert!(record.decode_complete());
    if record.image_data_read() {
        assert!(record.status().is_ok());
        assert_eq!(record.rows().len(), record.height() as usize);
    }
});
