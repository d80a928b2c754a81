#![no_main]
use bmp2array::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any record that decoded must encode, in every option combination
    let record = decode_bmp(data, enough::Unstoppable);
    if record.status().is_err() {
        assert!(encode_array(&record, false, enough::Unstoppable).is_err());
        return;
    }

    for reverse in [false, true] {
        for stride in [NibbleStride::Legacy, NibbleStride::Padded] {
            let text = ArrayRequest::new()
                .reverse_rows(reverse)
                .nibble_stride(stride)
                .encode(&record, enough::Unstoppable)
                .expect("decoded record failed to encode");
            assert!(text.ends_with("};"));
        }
    }
    dump_rows(&record).expect("decoded record failed to dump");
});
