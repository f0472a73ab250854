/*!
Commented CBOR

Renders a CBOR data item in the "commented" format of RFC 8949 §2.2.1: one line
per decoded item, indented by nesting depth, integers shown as the exact hex
bytes consumed with an inline `-- value` comment, every other item in
diagnostic notation, and a final line with the hex of the whole input.

```
use hardy_cbor_comment::{Config, comment_with};

let config = Config {
    max_indent_depth: 2,
    ..Default::default()
};
assert_eq!(
    comment_with(&[0x82, 0x01, 0x19, 0x03, 0xe8], &config).unwrap(),
    "[1, 1000]\n  01 -- 1\n  1903e8 -- 1000\n0x82011903e8\n"
);
```
*/

pub mod annotate;
pub mod config;
pub mod decode;
pub mod transcript;

mod comment;
mod float;

pub use comment::{Encoding, Error, Input, comment, comment_with, validate};
pub use config::Config;
