use std::io;

use crate::define::Amf0Marker;

/// Errors that can occur when decoding AMF0 data.
#[derive(Debug, thiserror::Error)]
pub enum Amf0ReadError {
    /// The buffer ran out in the middle of a field, or a declared length
    /// overran what was left of it.
    #[error("unexpected end of buffer")]
    UnexpectedEnd,
    /// A marker byte outside the AMF0 marker table.
    #[error("unknown marker: {0}")]
    UnknownMarker(u8),
    /// A marker defined by AMF0 but not supported by this decoder.
    #[error("unsupported marker: {0:?}")]
    UnsupportedMarker(Amf0Marker),
    /// The next value did not carry the marker the caller asked for. Created
    /// by [`Amf0Decoder::decode_with_type`](crate::Amf0Decoder::decode_with_type).
    #[error("wrong type: expected {expected:?}, got {got:?}")]
    WrongType {
        /// The marker the caller asked for.
        expected: Amf0Marker,
        /// The marker actually found on the wire.
        got: Amf0Marker,
    },
    /// Containers were nested deeper than the decoder's configured limit.
    #[error("containers nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The limit that was exceeded.
        limit: usize,
    },
    /// A string field did not hold valid UTF-8.
    #[error("string parse error: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Errors that can occur when encoding AMF0 data.
#[derive(Debug, thiserror::Error)]
pub enum Amf0WriteError {
    /// A string or property name longer than a 16-bit length prefix can carry.
    #[error("string too long: {0} bytes (max {max})", max = u16::MAX)]
    StringTooLong(usize),
    /// A strict array with more elements than a 32-bit count can carry.
    #[error("array too long: {0} elements (max {max})", max = u32::MAX)]
    ArrayTooLong(usize),
    /// An IO error from the underlying writer.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A kind-specific accessor was invoked on a value of a different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("kind mismatch: expected {expected:?}, got {got:?}")]
pub struct KindMismatch {
    /// The kind the accessor is defined for.
    pub expected: Amf0Marker,
    /// The kind the value actually has.
    pub got: Amf0Marker,
}
