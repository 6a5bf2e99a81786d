#![no_main]
use hashseq::{Codec, Config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let codec = Codec::new(&Config::new().salt("fuzz salt")).expect("Config should be valid");
    let _ = codec.decode(&String::from_utf8_lossy(data));
});
