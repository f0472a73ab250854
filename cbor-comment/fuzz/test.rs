#![cfg(test)]

use hardy_cbor_comment::{Config, comment_with, validate};
use std::io::Read;

#[test]
fn test_all() {
    let config = Config::default();
    match std::fs::read_dir("./corpus/comment") {
        Err(e) => {
            eprintln!(
                "Failed to open dir: {e}, curr dir: {}",
                std::env::current_dir().unwrap().to_string_lossy()
            );
        }
        Ok(dir) => {
            for entry in dir.flatten() {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if let Ok(mut file) = std::fs::File::open(&path) {
                    let mut buffer = Vec::new();
                    if file.read_to_end(&mut buffer).is_ok() {
                        assert_eq!(
                            comment_with(&buffer, &config).is_ok(),
                            validate(&buffer, &config).is_ok()
                        );
                    }
                }
            }
        }
    }
}
