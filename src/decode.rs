use byteorder::{BigEndian, ReadBytesExt};
use bytes::Bytes;
use num_traits::FromPrimitive;

use crate::cursor::{BytesCursor, BytesCursorExt};
use crate::define::Amf0Marker;
use crate::errors::Amf0ReadError;
use crate::value::{Amf0Date, Amf0EcmaArray, Amf0Value};

/// Containers nested deeper than this fail with
/// [`Amf0ReadError::NestingTooDeep`] unless the limit is overridden with
/// [`Amf0Decoder::with_max_depth`].
pub const DEFAULT_NESTING_LIMIT: usize = 128;

/// An AMF0 decoder.
///
/// Reads marker-tagged values from a byte buffer. Dispatch is driven purely
/// by the next marker byte; no lookahead beyond one byte. Every failure is
/// reported to the caller, the decoder never guesses or skips input.
pub struct Amf0Decoder {
    cursor: BytesCursor,
    max_depth: usize,
}

impl Amf0Decoder {
    /// Create a new AMF0 decoder over `data`.
    pub fn new(data: Bytes) -> Self {
        Self {
            cursor: BytesCursor::new(data),
            max_depth: DEFAULT_NESTING_LIMIT,
        }
    }

    /// Override the nesting limit applied while decoding containers.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether the decoder has consumed all of its input.
    pub fn is_empty(&self) -> bool {
        self.cursor.remaining() == 0
    }

    /// Read the next encoded value from the decoder.
    ///
    /// On failure the cursor is left wherever the error was detected; the
    /// partially decoded value is discarded.
    pub fn decode(&mut self) -> Result<Amf0Value, Amf0ReadError> {
        self.decode_at(0)
    }

    /// Read the next encoded value and require it to carry `expected`.
    ///
    /// The marker is only peeked: on mismatch the input is left unconsumed
    /// and [`Amf0ReadError::WrongType`] is returned.
    pub fn decode_with_type(&mut self, expected: Amf0Marker) -> Result<Amf0Value, Amf0ReadError> {
        let byte = self.peek_u8()?;
        let got = Amf0Marker::from_u8(byte).ok_or(Amf0ReadError::UnknownMarker(byte))?;

        if got != expected {
            return Err(Amf0ReadError::WrongType { expected, got });
        }

        self.decode()
    }

    /// Read all the encoded values from the decoder.
    /// Returns both successfully decoded values and any error that occurred.
    pub fn decode_all(&mut self) -> (Vec<Amf0Value>, Option<Amf0ReadError>) {
        let mut results = vec![];

        while !self.is_empty() {
            match self.decode() {
                Ok(value) => results.push(value),
                Err(err) => return (results, Some(err)),
            }
        }

        (results, None)
    }

    fn decode_at(&mut self, depth: usize) -> Result<Amf0Value, Amf0ReadError> {
        if depth > self.max_depth {
            return Err(Amf0ReadError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let byte = self.read_u8()?;
        let marker = Amf0Marker::from_u8(byte).ok_or(Amf0ReadError::UnknownMarker(byte))?;

        match marker {
            Amf0Marker::Number => Ok(Amf0Value::Number(self.read_f64()?)),
            Amf0Marker::Boolean => Ok(Amf0Value::Boolean(self.read_u8()? != 0)),
            Amf0Marker::String => Ok(Amf0Value::String(self.read_utf8_short()?)),
            Amf0Marker::Object => Ok(Amf0Value::Object(self.read_pairs(depth)?.into())),
            Amf0Marker::Null => Ok(Amf0Value::Null),
            Amf0Marker::Undefined => Ok(Amf0Value::Undefined),
            Amf0Marker::ObjectEnd => Ok(Amf0Value::ObjectEnd),
            Amf0Marker::EcmaArray => {
                // The declared count is wire metadata, kept verbatim; the
                // pair list itself is terminator-driven like an object.
                let declared_count = self.read_u32()?;
                let properties = self.read_pairs(depth)?;
                Ok(Amf0Value::EcmaArray(Amf0EcmaArray::from_parts(
                    declared_count,
                    properties,
                )))
            }
            Amf0Marker::StrictArray => {
                let len = self.read_u32()? as usize;
                // every element costs at least one byte, so the remaining
                // input bounds a sane preallocation for hostile counts
                let mut values = Vec::with_capacity(len.min(self.cursor.remaining()));
                for _ in 0..len {
                    values.push(self.decode_at(depth + 1)?);
                }
                Ok(Amf0Value::StrictArray(values))
            }
            Amf0Marker::Date => {
                let millis = self.read_f64()?;
                let timezone = self.read_i16()?;
                Ok(Amf0Value::Date(Amf0Date::new(millis, timezone)))
            }
            other => Err(Amf0ReadError::UnsupportedMarker(other)),
        }
    }

    /// Name/value pairs of an object or ECMA array, terminated by a
    /// zero-length name followed by the object-end marker. A zero-length
    /// name followed by anything else is an ordinary pair.
    fn read_pairs(&mut self, depth: usize) -> Result<Vec<(String, Amf0Value)>, Amf0ReadError> {
        let mut properties = Vec::new();

        loop {
            let name = self.read_utf8_short()?;

            if name.is_empty() && self.peek_u8()? == Amf0Marker::ObjectEnd as u8 {
                self.read_u8()?;
                break;
            }

            let value = self.decode_at(depth + 1)?;
            properties.push((name, value));
        }

        Ok(properties)
    }

    fn read_u8(&mut self) -> Result<u8, Amf0ReadError> {
        self.cursor.read_u8().map_err(|_| Amf0ReadError::UnexpectedEnd)
    }

    fn peek_u8(&mut self) -> Result<u8, Amf0ReadError> {
        let pos = self.cursor.position();
        let byte = self.read_u8()?;
        self.cursor.set_position(pos);
        Ok(byte)
    }

    fn read_u16(&mut self) -> Result<u16, Amf0ReadError> {
        self.cursor
            .read_u16::<BigEndian>()
            .map_err(|_| Amf0ReadError::UnexpectedEnd)
    }

    fn read_i16(&mut self) -> Result<i16, Amf0ReadError> {
        self.cursor
            .read_i16::<BigEndian>()
            .map_err(|_| Amf0ReadError::UnexpectedEnd)
    }

    fn read_u32(&mut self) -> Result<u32, Amf0ReadError> {
        self.cursor
            .read_u32::<BigEndian>()
            .map_err(|_| Amf0ReadError::UnexpectedEnd)
    }

    fn read_f64(&mut self) -> Result<f64, Amf0ReadError> {
        self.cursor
            .read_f64::<BigEndian>()
            .map_err(|_| Amf0ReadError::UnexpectedEnd)
    }

    /// A raw length-prefixed string, no leading marker byte. Used both for
    /// string payloads and for property names.
    fn read_utf8_short(&mut self) -> Result<String, Amf0ReadError> {
        let len = self.read_u16()? as usize;
        let bytes = self
            .cursor
            .extract_bytes(len)
            .map_err(|_| Amf0ReadError::UnexpectedEnd)?;

        Ok(std::str::from_utf8(&bytes)?.to_owned())
    }
}

impl Iterator for Amf0Decoder {
    type Item = Result<Amf0Value, Amf0ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }

        Some(self.decode())
    }
}
