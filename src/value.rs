use crate::define::Amf0Marker;
use crate::errors::KindMismatch;

/// An AMF0 value.
///
/// Every value exclusively owns the values nested beneath it; the tree is
/// acyclic and dropping a container drops all of its children. Equality is
/// kind equality plus recursive payload equality, order-sensitive for pair
/// lists.
#[derive(Debug, Clone, PartialEq)]
pub enum Amf0Value {
    /// Number Type defined section 2.2
    Number(f64),
    /// Boolean Type defined section 2.3
    Boolean(bool),
    /// String Type defined section 2.4, at most [`u16::MAX`] bytes on the wire
    String(String),
    /// Object Type defined section 2.5
    Object(Amf0Object),
    /// Null Type defined section 2.7
    Null,
    /// Undefined Type defined section 2.8
    Undefined,
    /// EcmaArray Type defined section 2.10
    EcmaArray(Amf0EcmaArray),
    /// ObjectEnd Type defined section 2.11; the terminator sentinel of an
    /// object's property list, itself a valid value
    ObjectEnd,
    /// StrictArray Type defined section 2.12
    StrictArray(Vec<Amf0Value>),
    /// Date Type defined section 2.13
    Date(Amf0Date),
}

/// An AMF0 object: name/value pairs in insertion order.
///
/// Duplicate names are permitted and preserved; lookups return the first
/// match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Amf0Object {
    properties: Vec<(String, Amf0Value)>,
}

/// An AMF0 ECMA array: the same pair list as [`Amf0Object`] plus the element
/// count declared on the wire.
///
/// The declared count is wire metadata. Decoding stores it verbatim and
/// encoding writes it back verbatim; it is never reconciled with the actual
/// pair count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Amf0EcmaArray {
    declared_count: u32,
    properties: Vec<(String, Amf0Value)>,
}

/// An AMF0 date: milliseconds since the epoch plus a timezone offset in
/// minutes. The timezone is carried through the wire format but not applied.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Amf0Date {
    /// Milliseconds since the unix epoch.
    pub millis: f64,
    /// Timezone offset in minutes.
    pub timezone: i16,
}

impl Amf0Date {
    /// Create a date from epoch milliseconds and a timezone offset.
    pub const fn new(millis: f64, timezone: i16) -> Self {
        Self { millis, timezone }
    }
}

impl Amf0Object {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, transferring ownership of `value` into the object.
    /// Duplicate names are allowed.
    pub fn append(&mut self, name: impl Into<String>, value: Amf0Value) {
        self.properties.push((name.into(), value));
    }

    /// The first value appended under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Amf0Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Mutable access to the first value appended under `name`, if any.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Amf0Value> {
        self.properties
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Remove and return the first pair named `name`, if any.
    pub fn remove(&mut self, name: &str) -> Option<Amf0Value> {
        let index = self.properties.iter().position(|(n, _)| n == name)?;
        Some(self.properties.remove(index).1)
    }

    /// Current pair count.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the object holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Amf0Value)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl From<Vec<(String, Amf0Value)>> for Amf0Object {
    fn from(properties: Vec<(String, Amf0Value)>) -> Self {
        Self { properties }
    }
}

impl FromIterator<(String, Amf0Value)> for Amf0Object {
    fn from_iter<I: IntoIterator<Item = (String, Amf0Value)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

impl Amf0EcmaArray {
    /// Create an empty array with a declared count of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble an array from a wire-declared count and its decoded pairs.
    pub fn from_parts(declared_count: u32, properties: Vec<(String, Amf0Value)>) -> Self {
        Self {
            declared_count,
            properties,
        }
    }

    /// The element count declared on the wire, independent of [`len`](Self::len).
    pub fn declared_count(&self) -> u32 {
        self.declared_count
    }

    /// Overwrite the wire-declared count.
    pub fn set_declared_count(&mut self, count: u32) {
        self.declared_count = count;
    }

    /// Append a pair, transferring ownership of `value` into the array.
    /// Duplicate names are allowed. The declared count is not touched.
    pub fn append(&mut self, name: impl Into<String>, value: Amf0Value) {
        self.properties.push((name.into(), value));
    }

    /// The first value appended under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Amf0Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Mutable access to the first value appended under `name`, if any.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Amf0Value> {
        self.properties
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Remove and return the first pair named `name`, if any.
    pub fn remove(&mut self, name: &str) -> Option<Amf0Value> {
        let index = self.properties.iter().position(|(n, _)| n == name)?;
        Some(self.properties.remove(index).1)
    }

    /// Current pair count.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the array holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Amf0Value)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl Amf0Value {
    /// The marker byte this value encodes with.
    pub fn marker(&self) -> Amf0Marker {
        match self {
            Self::Number(_) => Amf0Marker::Number,
            Self::Boolean(_) => Amf0Marker::Boolean,
            Self::String(_) => Amf0Marker::String,
            Self::Object(_) => Amf0Marker::Object,
            Self::Null => Amf0Marker::Null,
            Self::Undefined => Amf0Marker::Undefined,
            Self::EcmaArray(_) => Amf0Marker::EcmaArray,
            Self::ObjectEnd => Amf0Marker::ObjectEnd,
            Self::StrictArray(_) => Amf0Marker::StrictArray,
            Self::Date(_) => Amf0Marker::Date,
        }
    }

    /// Whether this value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Whether this value is a boolean.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Whether this value is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value is undefined.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Whether this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Whether this value is the object-end sentinel.
    pub fn is_object_end(&self) -> bool {
        matches!(self, Self::ObjectEnd)
    }

    /// Whether this value is an ECMA array.
    pub fn is_ecma_array(&self) -> bool {
        matches!(self, Self::EcmaArray(_))
    }

    /// Whether this value is a strict array.
    pub fn is_strict_array(&self) -> bool {
        matches!(self, Self::StrictArray(_))
    }

    /// Whether this value is a date.
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Whether this value is one of the container-shaped kinds: object,
    /// object-end, ECMA array or strict array.
    pub fn is_complex_object(&self) -> bool {
        matches!(
            self,
            Self::Object(_) | Self::ObjectEnd | Self::EcmaArray(_) | Self::StrictArray(_)
        )
    }

    fn mismatch(&self, expected: Amf0Marker) -> KindMismatch {
        KindMismatch {
            expected,
            got: self.marker(),
        }
    }

    /// The text of a string value.
    pub fn as_str(&self) -> Result<&str, KindMismatch> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(other.mismatch(Amf0Marker::String)),
        }
    }

    /// The payload of a boolean value.
    pub fn as_boolean(&self) -> Result<bool, KindMismatch> {
        match self {
            Self::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(Amf0Marker::Boolean)),
        }
    }

    /// The payload of a number value.
    pub fn as_number(&self) -> Result<f64, KindMismatch> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(other.mismatch(Amf0Marker::Number)),
        }
    }

    /// The payload of a date value.
    pub fn as_date(&self) -> Result<Amf0Date, KindMismatch> {
        match self {
            Self::Date(d) => Ok(*d),
            other => Err(other.mismatch(Amf0Marker::Date)),
        }
    }

    /// The pair list of an object value.
    pub fn as_object(&self) -> Result<&Amf0Object, KindMismatch> {
        match self {
            Self::Object(o) => Ok(o),
            other => Err(other.mismatch(Amf0Marker::Object)),
        }
    }

    /// Mutable access to the pair list of an object value.
    pub fn as_object_mut(&mut self) -> Result<&mut Amf0Object, KindMismatch> {
        match self {
            Self::Object(o) => Ok(o),
            other => Err(other.mismatch(Amf0Marker::Object)),
        }
    }

    /// The pair list of an ECMA array value.
    pub fn as_ecma_array(&self) -> Result<&Amf0EcmaArray, KindMismatch> {
        match self {
            Self::EcmaArray(a) => Ok(a),
            other => Err(other.mismatch(Amf0Marker::EcmaArray)),
        }
    }

    /// Mutable access to the pair list of an ECMA array value.
    pub fn as_ecma_array_mut(&mut self) -> Result<&mut Amf0EcmaArray, KindMismatch> {
        match self {
            Self::EcmaArray(a) => Ok(a),
            other => Err(other.mismatch(Amf0Marker::EcmaArray)),
        }
    }

    /// The elements of a strict array value.
    pub fn as_strict_array(&self) -> Result<&[Amf0Value], KindMismatch> {
        match self {
            Self::StrictArray(v) => Ok(v),
            other => Err(other.mismatch(Amf0Marker::StrictArray)),
        }
    }

    /// Mutable access to the elements of a strict array value.
    pub fn as_strict_array_mut(&mut self) -> Result<&mut Vec<Amf0Value>, KindMismatch> {
        match self {
            Self::StrictArray(v) => Ok(v),
            other => Err(other.mismatch(Amf0Marker::StrictArray)),
        }
    }

    /// Overwrite the payload of a number value in place.
    pub fn set_number(&mut self, value: f64) -> Result<(), KindMismatch> {
        match self {
            Self::Number(n) => {
                *n = value;
                Ok(())
            }
            other => Err(other.mismatch(Amf0Marker::Number)),
        }
    }

    /// Overwrite the payload of a boolean value in place.
    pub fn set_boolean(&mut self, value: bool) -> Result<(), KindMismatch> {
        match self {
            Self::Boolean(b) => {
                *b = value;
                Ok(())
            }
            other => Err(other.mismatch(Amf0Marker::Boolean)),
        }
    }

    /// The exact number of bytes [`Amf0Encoder::encode`](crate::Amf0Encoder::encode)
    /// produces for this value.
    pub fn encoded_size(&self) -> usize {
        // marker + payload; pair lists cost a 2-byte length per name and end
        // with the 3-byte terminator
        match self {
            Self::Number(_) => 1 + 8,
            Self::Boolean(_) => 1 + 1,
            Self::String(s) => 1 + 2 + s.len(),
            Self::Null | Self::Undefined | Self::ObjectEnd => 1,
            Self::Object(o) => 1 + pairs_size(o.iter()) + 3,
            Self::EcmaArray(a) => 1 + 4 + pairs_size(a.iter()) + 3,
            Self::StrictArray(v) => 1 + 4 + v.iter().map(Amf0Value::encoded_size).sum::<usize>(),
            Self::Date(_) => 1 + 8 + 2,
        }
    }
}

fn pairs_size<'a>(pairs: impl Iterator<Item = (&'a str, &'a Amf0Value)>) -> usize {
    pairs
        .map(|(name, value)| 2 + name.len() + value.encoded_size())
        .sum()
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    fn one_of_each() -> Vec<Amf0Value> {
        vec![
            Amf0Value::Number(0.0),
            Amf0Value::Boolean(false),
            Amf0Value::String(String::new()),
            Amf0Value::Object(Amf0Object::new()),
            Amf0Value::Null,
            Amf0Value::Undefined,
            Amf0Value::EcmaArray(Amf0EcmaArray::new()),
            Amf0Value::ObjectEnd,
            Amf0Value::StrictArray(Vec::new()),
            Amf0Value::Date(Amf0Date::default()),
        ]
    }

    #[test]
    fn test_predicates_mutually_exclusive() {
        for value in one_of_each() {
            let flags = [
                value.is_number(),
                value.is_boolean(),
                value.is_string(),
                value.is_object(),
                value.is_null(),
                value.is_undefined(),
                value.is_ecma_array(),
                value.is_object_end(),
                value.is_strict_array(),
                value.is_date(),
            ];
            assert_eq!(
                flags.iter().filter(|f| **f).count(),
                1,
                "exactly one predicate must hold for {value:?}"
            );
        }
    }

    #[test]
    fn test_complex_object_grouping() {
        for value in one_of_each() {
            let expected = value.is_object()
                || value.is_object_end()
                || value.is_ecma_array()
                || value.is_strict_array();
            assert_eq!(value.is_complex_object(), expected, "{value:?}");
        }
    }

    #[test]
    fn test_scalar_defaults_and_setters() {
        let value = Amf0Value::String("hello".to_string());
        assert_eq!(value.as_str().unwrap(), "hello");

        let mut value = Amf0Value::Boolean(false);
        assert!(!value.as_boolean().unwrap());
        value.set_boolean(true).unwrap();
        assert!(value.as_boolean().unwrap());

        let mut value = Amf0Value::Number(0.0);
        assert_eq!(value.as_number().unwrap(), 0.0);
        value.set_number(100.1).unwrap();
        assert_eq!(value.as_number().unwrap(), 100.1);

        let value = Amf0Value::Date(Amf0Date::default());
        let date = value.as_date().unwrap();
        assert_eq!(date.millis, 0.0);
        assert_eq!(date.timezone, 0);
    }

    #[test]
    fn test_accessor_kind_mismatch() {
        let value = Amf0Value::String("hello".to_string());

        let err = value.as_number().unwrap_err();
        assert_eq!(err.expected, Amf0Marker::Number);
        assert_eq!(err.got, Amf0Marker::String);

        assert!(value.as_boolean().is_err());
        assert!(value.as_object().is_err());
        assert!(value.as_ecma_array().is_err());
        assert!(value.as_strict_array().is_err());
        assert!(value.as_date().is_err());

        let mut value = Amf0Value::Null;
        assert!(value.set_number(1.0).is_err());
        assert!(value.set_boolean(true).is_err());
        assert!(value.as_str().is_err());
    }

    #[test]
    fn test_object_duplicate_names() {
        let mut object = Amf0Object::new();
        assert_eq!(object.len(), 0);
        assert!(object.is_empty());

        object.append("a", Amf0Value::Number(1.0));
        object.append("a", Amf0Value::Number(2.0));
        object.append("b", Amf0Value::Null);

        assert_eq!(object.len(), 3);
        // lookup returns the first match in insertion order
        assert_eq!(object.get("a"), Some(&Amf0Value::Number(1.0)));
        assert_eq!(object.get("missing"), None);

        assert_eq!(object.remove("a"), Some(Amf0Value::Number(1.0)));
        assert_eq!(object.get("a"), Some(&Amf0Value::Number(2.0)));
        assert_eq!(object.remove("missing"), None);
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_object_get_mut() {
        let mut object = Amf0Object::new();
        object.append("n", Amf0Value::Number(1.0));

        object.get_mut("n").unwrap().set_number(5.0).unwrap();
        assert_eq!(object.get("n"), Some(&Amf0Value::Number(5.0)));
    }

    #[test]
    fn test_ecma_array_declared_count_independent() {
        let mut array = Amf0EcmaArray::new();
        assert_eq!(array.declared_count(), 0);
        assert_eq!(array.len(), 0);

        array.append("k", Amf0Value::Boolean(true));
        assert_eq!(array.len(), 1);
        // appending never touches the wire-declared count
        assert_eq!(array.declared_count(), 0);

        array.set_declared_count(7);
        assert_eq!(array.declared_count(), 7);
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_order_sensitive_equality() {
        let ab: Amf0Object = vec![
            ("a".to_string(), Amf0Value::Null),
            ("b".to_string(), Amf0Value::Null),
        ]
        .into();
        let ba: Amf0Object = vec![
            ("b".to_string(), Amf0Value::Null),
            ("a".to_string(), Amf0Value::Null),
        ]
        .into();

        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_encoded_size() {
        assert_eq!(Amf0Value::Number(1.5).encoded_size(), 9);
        assert_eq!(Amf0Value::Boolean(true).encoded_size(), 2);
        assert_eq!(Amf0Value::String("hello".to_string()).encoded_size(), 8);
        assert_eq!(Amf0Value::Null.encoded_size(), 1);
        assert_eq!(Amf0Value::Undefined.encoded_size(), 1);
        assert_eq!(Amf0Value::ObjectEnd.encoded_size(), 1);
        assert_eq!(Amf0Value::Date(Amf0Date::new(1.0, 60)).encoded_size(), 11);

        // marker + ("ab" pair: 2 + 2 name bytes + null) + terminator
        let mut object = Amf0Object::new();
        object.append("ab", Amf0Value::Null);
        assert_eq!(Amf0Value::Object(object).encoded_size(), 1 + (2 + 2 + 1) + 3);

        let mut array = Amf0EcmaArray::new();
        array.append("ab", Amf0Value::Null);
        assert_eq!(
            Amf0Value::EcmaArray(array).encoded_size(),
            1 + 4 + (2 + 2 + 1) + 3
        );

        let strict = Amf0Value::StrictArray(vec![Amf0Value::Number(0.0), Amf0Value::Null]);
        assert_eq!(strict.encoded_size(), 1 + 4 + 9 + 1);
    }
}
