//! A pure-rust implementation of the AMF0 value model and binary codec.
//!
//! AMF0 is the self-describing, marker-tagged serialization format carried by
//! the signaling layer of RTMP-family streaming protocols (connect commands,
//! stream metadata, status events). This crate provides the owned value tree
//! ([`Amf0Value`]), the binary decoder/encoder pair ([`Amf0Decoder`],
//! [`Amf0Encoder`]), a conversion into the generic JSON interchange tree
//! ([`Amf0Value::to_json`]) and a deterministic diagnostic dump
//! ([`Amf0Value::human_print`]).
//!
//! Decoding is safe over untrusted input: every read is bounds-checked,
//! unknown markers are rejected rather than skipped, and container nesting
//! is depth-limited.
//!
//! # Examples
//!
//! ```rust
//! # fn test() -> Result<(), Box<dyn std::error::Error>> {
//! use amf0::{Amf0Decoder, Amf0Encoder};
//! use bytes::Bytes;
//!
//! let bytes = Bytes::from_static(&[0x01, 0x01]);
//!
//! // Decode a value from a buffer
//! let mut reader = Amf0Decoder::new(bytes.clone());
//! let value = reader.decode()?;
//!
//! // .. do something with the value
//!
//! // Encode it back into a writer
//! let mut writer = Vec::new();
//! Amf0Encoder::encode(&mut writer, &value)?;
//!
//! # assert_eq!(writer, &bytes[..]);
//! # Ok(())
//! # }
//! # test().expect("test failed");
//! ```
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod cursor;
mod decode;
mod define;
mod dump;
mod encode;
mod errors;
mod json;
mod value;

pub use crate::cursor::{BytesCursor, BytesCursorExt};
pub use crate::decode::{Amf0Decoder, DEFAULT_NESTING_LIMIT};
pub use crate::define::Amf0Marker;
pub use crate::encode::Amf0Encoder;
pub use crate::errors::{Amf0ReadError, Amf0WriteError, KindMismatch};
pub use crate::value::{Amf0Date, Amf0EcmaArray, Amf0Object, Amf0Value};
