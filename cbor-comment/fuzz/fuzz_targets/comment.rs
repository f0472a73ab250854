#![no_main]

use hardy_cbor_comment::{Config, comment_with, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = Config::default();
    let commented = comment_with(data, &config);
    assert_eq!(commented.is_ok(), validate(data, &config).is_ok());
    if let Ok(output) = commented {
        assert!(output.ends_with(&format!("0x{}\n", hex::encode(data))));
    }
});
