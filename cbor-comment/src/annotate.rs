/*!
Per-item formatting hooks

The decoder invokes exactly one [`Annotate`] method per decoded CBOR item, in
stream order.  Compound items (arrays, maps, tags and indefinite-length
strings) are announced with [`Annotate::begin`] when their header is read, and
completed with their own hook once every child has been rendered.
*/

use super::config::Config;
use super::decode::Precision;
use super::float;
use super::transcript::{LineId, Transcript};

/// Formatting callbacks, one per CBOR value kind
///
/// `depth` is the nesting level of the item: 0 for the top-level value, and one
/// more than the parent's for each child.
pub trait Annotate {
    /// What each item renders to, and what a parent receives for its children
    type Output;

    /// Bookkeeping carried from [`Annotate::begin`] to the completing hook
    type Pending;

    fn unsigned(&mut self, depth: usize, value: u64, raw: &[u8]) -> Self::Output;

    /// `value` is the encoded argument `n`, the integer is `-1 - n`
    fn negative(&mut self, depth: usize, value: u64, raw: &[u8]) -> Self::Output;

    /// Only ever called with finite values
    fn float(&mut self, depth: usize, value: f64, precision: Precision) -> Self::Output;

    fn infinity(&mut self, depth: usize, negative: bool, precision: Precision) -> Self::Output;

    fn nan(&mut self, depth: usize, negative: bool, precision: Precision) -> Self::Output;

    fn boolean(&mut self, depth: usize, value: bool) -> Self::Output;

    fn null(&mut self, depth: usize) -> Self::Output;

    fn undefined(&mut self, depth: usize) -> Self::Output;

    fn simple(&mut self, depth: usize, value: u8) -> Self::Output;

    fn bytes(&mut self, depth: usize, data: &[u8]) -> Self::Output;

    fn text(&mut self, depth: usize, text: &str) -> Self::Output;

    fn begin(&mut self, depth: usize) -> Self::Pending;

    fn byte_stream(
        &mut self,
        pending: Self::Pending,
        depth: usize,
        chunks: Vec<Self::Output>,
    ) -> Self::Output;

    fn text_stream(
        &mut self,
        pending: Self::Pending,
        depth: usize,
        chunks: Vec<Self::Output>,
    ) -> Self::Output;

    /// `count` is `None` for an indefinite-length array
    fn array(
        &mut self,
        pending: Self::Pending,
        depth: usize,
        items: Vec<Self::Output>,
        count: Option<u64>,
    ) -> Self::Output;

    /// `count` is `None` for an indefinite-length map
    fn map(
        &mut self,
        pending: Self::Pending,
        depth: usize,
        entries: Vec<(Self::Output, Self::Output)>,
        count: Option<u64>,
    ) -> Self::Output;

    fn tag(
        &mut self,
        pending: Self::Pending,
        depth: usize,
        tag: u64,
        inner: Self::Output,
    ) -> Self::Output;
}

/// Renders the RFC 8949 §2.2.1 commented format
///
/// Every item writes one line into the [`Transcript`] and returns its
/// diagnostic notation to the parent.
pub struct Commented {
    transcript: Transcript,
}

impl Commented {
    pub fn new(config: &Config) -> Self {
        Self {
            transcript: Transcript::new(config.max_indent_depth),
        }
    }

    pub fn lines(&self) -> usize {
        self.transcript.len()
    }

    /// Consume the annotator, appending the hex dump of `input`
    pub fn finish(self, input: &[u8]) -> String {
        self.transcript.finish(input)
    }

    fn integer(&mut self, depth: usize, raw: &[u8], value: String) -> String {
        let line = format!(
            "{} {}",
            hex::encode(raw),
            self.transcript.comment(depth, &value)
        );
        self.transcript.push(depth, &line);
        value
    }

    fn scalar(&mut self, depth: usize, fragment: String) -> String {
        self.transcript.push(depth, &fragment);
        fragment
    }

    fn complete(&mut self, pending: LineId, depth: usize, fragment: String) -> String {
        self.transcript.fill(pending, depth, &fragment);
        fragment
    }
}

fn sign(negative: bool) -> &'static str {
    if negative { "-" } else { "" }
}

fn chunked(chunks: Vec<String>) -> String {
    format!("(_ {})", chunks.join(", "))
}

fn entries(entries: Vec<(String, String)>) -> String {
    entries
        .into_iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape special characters in strings for diagnostic output
fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}

impl Annotate for Commented {
    type Output = String;
    type Pending = LineId;

    fn unsigned(&mut self, depth: usize, value: u64, raw: &[u8]) -> String {
        self.integer(depth, raw, value.to_string())
    }

    fn negative(&mut self, depth: usize, value: u64, raw: &[u8]) -> String {
        self.integer(depth, raw, (-1i128 - value as i128).to_string())
    }

    fn float(&mut self, depth: usize, value: f64, precision: Precision) -> String {
        self.scalar(
            depth,
            format!("{}_{}", float::format(value), precision.indicator()),
        )
    }

    fn infinity(&mut self, depth: usize, negative: bool, precision: Precision) -> String {
        self.scalar(
            depth,
            format!("{}Infinity_{}", sign(negative), precision.indicator()),
        )
    }

    fn nan(&mut self, depth: usize, negative: bool, precision: Precision) -> String {
        self.scalar(
            depth,
            format!("{}NaN_{}", sign(negative), precision.indicator()),
        )
    }

    fn boolean(&mut self, depth: usize, value: bool) -> String {
        self.scalar(depth, value.to_string())
    }

    fn null(&mut self, depth: usize) -> String {
        self.scalar(depth, "null".to_string())
    }

    fn undefined(&mut self, depth: usize) -> String {
        self.scalar(depth, "undefined".to_string())
    }

    fn simple(&mut self, depth: usize, value: u8) -> String {
        self.scalar(depth, format!("simple({value})"))
    }

    fn bytes(&mut self, depth: usize, data: &[u8]) -> String {
        self.scalar(depth, format!("h'{}'", hex::encode(data)))
    }

    fn text(&mut self, depth: usize, text: &str) -> String {
        self.scalar(depth, format!("\"{}\"", escape_string(text)))
    }

    fn begin(&mut self, _depth: usize) -> LineId {
        self.transcript.reserve()
    }

    fn byte_stream(&mut self, pending: LineId, depth: usize, chunks: Vec<String>) -> String {
        self.complete(pending, depth, chunked(chunks))
    }

    fn text_stream(&mut self, pending: LineId, depth: usize, chunks: Vec<String>) -> String {
        self.complete(pending, depth, chunked(chunks))
    }

    fn array(
        &mut self,
        pending: LineId,
        depth: usize,
        items: Vec<String>,
        count: Option<u64>,
    ) -> String {
        let items = items.join(", ");
        let fragment = match count {
            Some(_) => format!("[{items}]"),
            None => format!("[_ {items}]"),
        };
        self.complete(pending, depth, fragment)
    }

    fn map(
        &mut self,
        pending: LineId,
        depth: usize,
        pairs: Vec<(String, String)>,
        count: Option<u64>,
    ) -> String {
        let pairs = entries(pairs);
        let fragment = match count {
            Some(_) => format!("{{{pairs}}}"),
            None => format!("{{_ {pairs}}}"),
        };
        self.complete(pending, depth, fragment)
    }

    fn tag(&mut self, pending: LineId, depth: usize, tag: u64, inner: String) -> String {
        self.complete(pending, depth, format!("{tag}({inner})"))
    }
}

/// Renders nothing: decoding through `Silent` only checks the structure
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Annotate for Silent {
    type Output = ();
    type Pending = ();

    fn unsigned(&mut self, _depth: usize, _value: u64, _raw: &[u8]) {}

    fn negative(&mut self, _depth: usize, _value: u64, _raw: &[u8]) {}

    fn float(&mut self, _depth: usize, _value: f64, _precision: Precision) {}

    fn infinity(&mut self, _depth: usize, _negative: bool, _precision: Precision) {}

    fn nan(&mut self, _depth: usize, _negative: bool, _precision: Precision) {}

    fn boolean(&mut self, _depth: usize, _value: bool) {}

    fn null(&mut self, _depth: usize) {}

    fn undefined(&mut self, _depth: usize) {}

    fn simple(&mut self, _depth: usize, _value: u8) {}

    fn bytes(&mut self, _depth: usize, _data: &[u8]) {}

    fn text(&mut self, _depth: usize, _text: &str) {}

    fn begin(&mut self, _depth: usize) {}

    fn byte_stream(&mut self, _pending: (), _depth: usize, _chunks: Vec<()>) {}

    fn text_stream(&mut self, _pending: (), _depth: usize, _chunks: Vec<()>) {}

    fn array(&mut self, _pending: (), _depth: usize, _items: Vec<()>, _count: Option<u64>) {}

    fn map(&mut self, _pending: (), _depth: usize, _entries: Vec<((), ())>, _count: Option<u64>) {}

    fn tag(&mut self, _pending: (), _depth: usize, _tag: u64, _inner: ()) {}
}
