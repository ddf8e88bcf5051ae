use std::io;

use byteorder::{BigEndian, WriteBytesExt};

use crate::define::Amf0Marker;
use crate::errors::Amf0WriteError;
use crate::value::{Amf0Date, Amf0EcmaArray, Amf0Object, Amf0Value};

/// An AMF0 encoder.
///
/// The structural inverse of [`Amf0Decoder`](crate::Amf0Decoder): each kind
/// writes its marker byte followed by its payload, in the same field order
/// and widths the decoder reads them.
pub struct Amf0Encoder;

impl Amf0Encoder {
    /// Encode a generic AMF0 value.
    pub fn encode(writer: &mut impl io::Write, value: &Amf0Value) -> Result<(), Amf0WriteError> {
        match value {
            Amf0Value::Number(val) => Self::encode_number(writer, *val),
            Amf0Value::Boolean(val) => Self::encode_bool(writer, *val),
            Amf0Value::String(val) => Self::encode_string(writer, val),
            Amf0Value::Object(val) => Self::encode_object(writer, val),
            Amf0Value::Null => Self::encode_null(writer),
            Amf0Value::Undefined => Self::encode_undefined(writer),
            Amf0Value::EcmaArray(val) => Self::encode_ecma_array(writer, val),
            Amf0Value::ObjectEnd => {
                // a bare sentinel value is its lone marker byte, the 3-byte
                // form only terminates a pair list
                writer.write_u8(Amf0Marker::ObjectEnd as u8)?;
                Ok(())
            }
            Amf0Value::StrictArray(val) => Self::encode_strict_array(writer, val),
            Amf0Value::Date(val) => Self::encode_date(writer, *val),
        }
    }

    /// Write the terminator ending an object's property list: a zero-length
    /// name followed by the object-end marker.
    pub fn object_eof(writer: &mut impl io::Write) -> Result<(), Amf0WriteError> {
        writer.write_u24::<BigEndian>(Amf0Marker::ObjectEnd as u32)?;
        Ok(())
    }

    /// Encode an AMF0 number.
    pub fn encode_number(writer: &mut impl io::Write, value: f64) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Number as u8)?;
        writer.write_f64::<BigEndian>(value)?;
        Ok(())
    }

    /// Encode an AMF0 boolean.
    pub fn encode_bool(writer: &mut impl io::Write, value: bool) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Boolean as u8)?;
        writer.write_u8(value as u8)?;
        Ok(())
    }

    /// Encode an AMF0 string.
    pub fn encode_string(writer: &mut impl io::Write, value: &str) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::String as u8)?;
        Self::write_utf8_short(writer, value)
    }

    /// Encode an AMF0 null.
    pub fn encode_null(writer: &mut impl io::Write) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Null as u8)?;
        Ok(())
    }

    /// Encode an AMF0 undefined.
    pub fn encode_undefined(writer: &mut impl io::Write) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Undefined as u8)?;
        Ok(())
    }

    /// Encode an AMF0 date.
    pub fn encode_date(writer: &mut impl io::Write, value: Amf0Date) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Date as u8)?;
        writer.write_f64::<BigEndian>(value.millis)?;
        writer.write_i16::<BigEndian>(value.timezone)?;
        Ok(())
    }

    /// Encode an AMF0 object.
    pub fn encode_object(
        writer: &mut impl io::Write,
        object: &Amf0Object,
    ) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::Object as u8)?;
        for (name, value) in object.iter() {
            Self::write_utf8_short(writer, name)?;
            Self::encode(writer, value)?;
        }

        Self::object_eof(writer)
    }

    /// Encode an AMF0 ECMA array, writing its stored declared count verbatim.
    pub fn encode_ecma_array(
        writer: &mut impl io::Write,
        array: &Amf0EcmaArray,
    ) -> Result<(), Amf0WriteError> {
        writer.write_u8(Amf0Marker::EcmaArray as u8)?;
        writer.write_u32::<BigEndian>(array.declared_count())?;
        for (name, value) in array.iter() {
            Self::write_utf8_short(writer, name)?;
            Self::encode(writer, value)?;
        }

        Self::object_eof(writer)
    }

    /// Encode an AMF0 strict array.
    pub fn encode_strict_array(
        writer: &mut impl io::Write,
        values: &[Amf0Value],
    ) -> Result<(), Amf0WriteError> {
        let count =
            u32::try_from(values.len()).map_err(|_| Amf0WriteError::ArrayTooLong(values.len()))?;

        writer.write_u8(Amf0Marker::StrictArray as u8)?;
        writer.write_u32::<BigEndian>(count)?;
        for value in values {
            Self::encode(writer, value)?;
        }
        Ok(())
    }

    /// A raw length-prefixed string, no leading marker byte. Used both for
    /// string payloads and for property names.
    fn write_utf8_short(writer: &mut impl io::Write, value: &str) -> Result<(), Amf0WriteError> {
        let len =
            u16::try_from(value.len()).map_err(|_| Amf0WriteError::StringTooLong(value.len()))?;

        writer.write_u16::<BigEndian>(len)?;
        writer.write_all(value.as_bytes())?;
        Ok(())
    }
}
