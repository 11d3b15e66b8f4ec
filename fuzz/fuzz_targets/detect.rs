#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let detection = clrprobe::detect(data);
    assert_eq!(detection.is_assembly(), clrprobe::is_assembly_bytes(data));
});
