use super::annotate::Annotate;
use core::str::Utf8Error;
use thiserror::Error;
use tracing::trace;

const BREAK: u8 = 0xFF;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Not enough data for encoded value")]
    NotEnoughData,

    #[error("Invalid minor-type value {0}")]
    InvalidMinorValue(u8),

    #[error("Break code outside an indefinite-length item")]
    UnexpectedBreak,

    #[error("Invalid simple type {0}")]
    InvalidSimpleType(u8),

    #[error("Chunked string contains an invalid chunk")]
    InvalidChunk,

    #[error("Invalid UTF-8 in text string: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("Map has key but no value")]
    PartialMap,

    #[error("Length {0} is too big for this platform")]
    LengthTooBig(u64),

    #[error("Maximum recursion depth reached")]
    MaxRecursion,

    #[error("Additional items after the top-level value")]
    AdditionalItems,
}

/// The encoded width of a floating-point value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Half,
    Single,
    Double,
}

impl Precision {
    /// The RFC 8949 encoding indicator, i.e. the `n` in `1.5_n`
    pub fn indicator(&self) -> u8 {
        match self {
            Precision::Half => 1,
            Precision::Single => 2,
            Precision::Double => 3,
        }
    }
}

/// Decode exactly one CBOR item spanning the whole of `data`
pub fn parse<A>(data: &[u8], annotator: &mut A, max_recursion: usize) -> Result<A::Output, Error>
where
    A: Annotate,
{
    let (output, len) = parse_value(data, annotator, max_recursion)?;
    if len != data.len() {
        return Err(Error::AdditionalItems);
    }
    Ok(output)
}

/// Decode the first CBOR item in `data`, returning the annotator output and the number of bytes consumed
pub fn parse_value<A>(
    data: &[u8],
    annotator: &mut A,
    max_recursion: usize,
) -> Result<(A::Output, usize), Error>
where
    A: Annotate,
{
    let mut walker = Walker {
        data,
        offset: 0,
        max_recursion,
        annotator,
    };
    let output = walker.parse_item(0)?;
    Ok((output, walker.offset))
}

fn take<const N: usize>(data: &[u8]) -> Result<[u8; N], Error> {
    data.get(..N)
        .and_then(|d| d.try_into().ok())
        .ok_or(Error::NotEnoughData)
}

fn parse_uint_minor(minor: u8, data: &[u8]) -> Result<(u64, usize), Error> {
    match minor {
        val if val < 24 => Ok((val as u64, 0)),
        24 => data
            .first()
            .map(|v| (*v as u64, 1))
            .ok_or(Error::NotEnoughData),
        25 => Ok((u16::from_be_bytes(take(data)?) as u64, 2)),
        26 => Ok((u32::from_be_bytes(take(data)?) as u64, 4)),
        27 => Ok((u64::from_be_bytes(take(data)?), 8)),
        _ => Err(Error::InvalidMinorValue(minor)),
    }
}

struct Walker<'a, 'b, A> {
    data: &'a [u8],
    offset: usize,
    max_recursion: usize,
    annotator: &'b mut A,
}

impl<'a, A> Walker<'a, '_, A>
where
    A: Annotate,
{
    fn peek(&self) -> Result<u8, Error> {
        self.data
            .get(self.offset)
            .copied()
            .ok_or(Error::NotEnoughData)
    }

    fn parse_argument(&mut self, minor: u8) -> Result<u64, Error> {
        let (v, len) = parse_uint_minor(minor, &self.data[self.offset..])?;
        self.offset += len;
        Ok(v)
    }

    fn parse_span(&mut self, minor: u8) -> Result<&'a [u8], Error> {
        let data = self.data;
        let len = self.parse_argument(minor)?;
        let len = usize::try_from(len).map_err(|_| Error::LengthTooBig(len))?;
        if len > data.len() - self.offset {
            return Err(Error::NotEnoughData);
        }
        let start = self.offset;
        self.offset += len;
        Ok(&data[start..self.offset])
    }

    fn nest(&self, depth: usize) -> Result<usize, Error> {
        if depth >= self.max_recursion {
            Err(Error::MaxRecursion)
        } else {
            Ok(depth + 1)
        }
    }

    // Definite containers end on count, indefinite ones consume the break code
    fn at_end(&mut self, count: Option<u64>, parsed: u64) -> Result<bool, Error> {
        match count {
            Some(count) => Ok(parsed >= count),
            None if self.peek()? == BREAK => {
                self.offset += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn parse_item(&mut self, depth: usize) -> Result<A::Output, Error> {
        let data = self.data;
        let start = self.offset;
        let initial = self.peek()?;
        let (major, minor) = (initial >> 5, initial & 0x1F);
        trace!(offset = start, major, minor, depth, "Decoding item");
        self.offset += 1;

        match (major, minor) {
            (0, minor) => {
                let v = self.parse_argument(minor)?;
                Ok(self
                    .annotator
                    .unsigned(depth, v, &data[start..self.offset]))
            }
            (1, minor) => {
                let v = self.parse_argument(minor)?;
                Ok(self
                    .annotator
                    .negative(depth, v, &data[start..self.offset]))
            }
            (2, 31) => {
                /* Indefinite length byte string */
                let pending = self.annotator.begin(depth);
                let chunks = self.parse_chunks(depth, major)?;
                Ok(self.annotator.byte_stream(pending, depth, chunks))
            }
            (2, minor) => {
                /* Known length byte string */
                let v = self.parse_span(minor)?;
                Ok(self.annotator.bytes(depth, v))
            }
            (3, 31) => {
                /* Indefinite length text string */
                let pending = self.annotator.begin(depth);
                let chunks = self.parse_chunks(depth, major)?;
                Ok(self.annotator.text_stream(pending, depth, chunks))
            }
            (3, minor) => {
                /* Known length text string */
                let v = core::str::from_utf8(self.parse_span(minor)?)?;
                Ok(self.annotator.text(depth, v))
            }
            (4, 31) => {
                /* Indefinite length array */
                self.parse_array(depth, None)
            }
            (4, minor) => {
                /* Known length array */
                let count = self.parse_argument(minor)?;
                self.parse_array(depth, Some(count))
            }
            (5, 31) => {
                /* Indefinite length map */
                self.parse_map(depth, None)
            }
            (5, minor) => {
                /* Known length map */
                let count = self.parse_argument(minor)?;
                self.parse_map(depth, Some(count))
            }
            (6, minor) => {
                let tag = self.parse_argument(minor)?;
                let inner_depth = self.nest(depth)?;
                let pending = self.annotator.begin(depth);
                let inner = self.parse_item(inner_depth)?;
                Ok(self.annotator.tag(pending, depth, tag, inner))
            }
            (7, 20) => Ok(self.annotator.boolean(depth, false)),
            (7, 21) => Ok(self.annotator.boolean(depth, true)),
            (7, 22) => Ok(self.annotator.null(depth)),
            (7, 23) => Ok(self.annotator.undefined(depth)),
            (7, 0..=19) => {
                /* Unassigned */
                Ok(self.annotator.simple(depth, minor))
            }
            (7, 24) => {
                let v = self.peek()?;
                if v < 32 {
                    return Err(Error::InvalidSimpleType(v));
                }
                self.offset += 1;
                Ok(self.annotator.simple(depth, v))
            }
            (7, 25) => {
                /* FP16 */
                let bytes = take::<2>(&data[self.offset..])?;
                self.offset += 2;
                let v = half::f16::from_be_bytes(bytes);
                Ok(self.float(depth, v.to_f64(), bytes[0], Precision::Half))
            }
            (7, 26) => {
                /* FP32 */
                let bytes = take::<4>(&data[self.offset..])?;
                self.offset += 4;
                let v = f32::from_be_bytes(bytes);
                Ok(self.float(depth, v.into(), bytes[0], Precision::Single))
            }
            (7, 27) => {
                /* FP64 */
                let bytes = take::<8>(&data[self.offset..])?;
                self.offset += 8;
                let v = f64::from_be_bytes(bytes);
                Ok(self.float(depth, v, bytes[0], Precision::Double))
            }
            (7, 31) => Err(Error::UnexpectedBreak),
            (7, minor) => Err(Error::InvalidMinorValue(minor)),
            (8.., _) => unreachable!(),
        }
    }

    // The sign is taken from the encoded bits so that NaN payloads keep it
    fn float(&mut self, depth: usize, v: f64, high_byte: u8, precision: Precision) -> A::Output {
        let negative = high_byte & 0x80 != 0;
        if v.is_nan() {
            self.annotator.nan(depth, negative, precision)
        } else if v.is_infinite() {
            self.annotator.infinity(depth, negative, precision)
        } else {
            self.annotator.float(depth, v, precision)
        }
    }

    fn parse_chunks(&mut self, depth: usize, major: u8) -> Result<Vec<A::Output>, Error> {
        let chunk_depth = self.nest(depth)?;
        let mut chunks = Vec::new();
        loop {
            let initial = self.peek()?;
            if initial == BREAK {
                self.offset += 1;
                break Ok(chunks);
            }
            if initial >> 5 != major || initial & 0x1F == 31 {
                return Err(Error::InvalidChunk);
            }
            chunks.push(self.parse_item(chunk_depth)?);
        }
    }

    fn parse_array(&mut self, depth: usize, count: Option<u64>) -> Result<A::Output, Error> {
        let item_depth = self.nest(depth)?;
        let pending = self.annotator.begin(depth);
        let mut items = Vec::with_capacity(self.capacity(count));
        let mut parsed = 0;
        while !self.at_end(count, parsed)? {
            items.push(self.parse_item(item_depth)?);
            parsed += 1;
        }
        Ok(self.annotator.array(pending, depth, items, count))
    }

    fn parse_map(&mut self, depth: usize, count: Option<u64>) -> Result<A::Output, Error> {
        let item_depth = self.nest(depth)?;
        let pending = self.annotator.begin(depth);
        let mut entries = Vec::with_capacity(self.capacity(count));
        let mut parsed = 0;
        while !self.at_end(count, parsed)? {
            let key = self.parse_item(item_depth)?;
            if count.is_none() && self.peek()? == BREAK {
                return Err(Error::PartialMap);
            }
            let value = self.parse_item(item_depth)?;
            entries.push((key, value));
            parsed += 1;
        }
        Ok(self.annotator.map(pending, depth, entries, count))
    }

    // Every item takes at least one byte, so never trust a declared count beyond what remains
    fn capacity(&self, count: Option<u64>) -> usize {
        let remaining = self.data.len() - self.offset;
        count.map_or(0, |c| usize::try_from(c).map_or(remaining, |c| c.min(remaining)))
    }
}
