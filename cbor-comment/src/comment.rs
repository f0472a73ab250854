use super::annotate::{Commented, Silent};
use super::config::Config;
use super::decode;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

const PADDING_INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const BASE64: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PADDING_INDIFFERENT);

const BASE64_URL: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PADDING_INDIFFERENT);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] decode::Error),

    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid base64 input: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// How text input is turned into bytes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Hexadecimal digits, either case, ASCII whitespace ignored
    #[default]
    Hex,
    /// Standard base64, padding optional
    Base64,
    /// URL-safe base64, padding optional
    Base64Url,
}

/// The CBOR to render: raw bytes, or text encoding them
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Bytes(&'a [u8]),
    Text(&'a str, Encoding),
}

impl<'a> Input<'a> {
    fn to_bytes(self) -> Result<Cow<'a, [u8]>, Error> {
        match self {
            Input::Bytes(data) => Ok(Cow::Borrowed(data)),
            Input::Text(s, Encoding::Hex) => {
                let digits: String = s.chars().filter(|c| !c.is_ascii_whitespace()).collect();
                Ok(Cow::Owned(hex::decode(digits)?))
            }
            Input::Text(s, Encoding::Base64) => Ok(Cow::Owned(BASE64.decode(s.trim())?)),
            Input::Text(s, Encoding::Base64Url) => Ok(Cow::Owned(BASE64_URL.decode(s.trim())?)),
        }
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(data: &'a [u8]) -> Self {
        Input::Bytes(data)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        Input::Bytes(data)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(data: &'a Vec<u8>) -> Self {
        Input::Bytes(data)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Text(s, Encoding::Hex)
    }
}

impl<'a> From<(&'a str, Encoding)> for Input<'a> {
    fn from((s, encoding): (&'a str, Encoding)) -> Self {
        Input::Text(s, encoding)
    }
}

/// Render a single CBOR value in the commented format, using the default [`Config`]
///
/// With the default `max_indent_depth` of 10 the inline comment of a top-level
/// integer is padded by 16 spaces, so `01` renders as `01` followed by 16
/// spaces and `-- 1`.  Use [`comment_with`] and a smaller `max_indent_depth` to
/// tighten the alignment.
///
/// ```
/// let output = hardy_cbor_comment::comment("a201020304").unwrap();
/// assert!(output.starts_with("{1: 2, 3: 4}\n"));
/// assert!(output.ends_with("0xa201020304\n"));
///
/// let padding = " ".repeat(16);
/// assert_eq!(
///     hardy_cbor_comment::comment("01").unwrap(),
///     format!("01 {padding}-- 1\n0x01\n")
/// );
/// ```
pub fn comment<'a>(input: impl Into<Input<'a>>) -> Result<String, Error> {
    comment_with(input, &Config::default())
}

/// Render a single CBOR value in the commented format
///
/// The output is one line per decoded item, indented two spaces per level of
/// nesting, then a final line with the hex of the entire input.  Nothing is
/// returned unless the whole input decodes as exactly one CBOR value.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all))]
pub fn comment_with<'a>(input: impl Into<Input<'a>>, config: &Config) -> Result<String, Error> {
    let data = input.into().to_bytes()?;
    let mut commented = Commented::new(config);
    decode::parse(&data, &mut commented, config.max_recursion)
        .inspect_err(|e| debug!("Failed to decode CBOR: {e}"))?;

    debug!(
        bytes = data.len(),
        lines = commented.lines(),
        "Rendered commented CBOR"
    );
    Ok(commented.finish(&data))
}

/// Check that the input decodes as exactly one CBOR value, without rendering it
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all))]
pub fn validate<'a>(input: impl Into<Input<'a>>, config: &Config) -> Result<(), Error> {
    let data = input.into().to_bytes()?;
    decode::parse(&data, &mut Silent, config.max_recursion)
        .inspect_err(|e| debug!("Failed to decode CBOR: {e}"))
        .map_err(Into::into)
}
