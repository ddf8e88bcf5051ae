use serde_json::{Map, Value};

use crate::value::Amf0Value;

impl Amf0Value {
    /// Convert into the generic JSON interchange tree.
    ///
    /// The mapping is total and lossy where JSON has no counterpart:
    /// undefined and the object-end sentinel become null, an ECMA array's
    /// declared count is dropped, a date becomes its epoch milliseconds, and
    /// duplicate property names collapse to the last occurrence. Pair order
    /// is preserved. The returned tree is independently owned and shares
    /// nothing with `self`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Number(n) => number_to_json(*n),
            Self::Boolean(b) => Value::Bool(*b),
            Self::String(s) => Value::String(s.clone()),
            Self::Object(o) => pairs_to_json(o.iter()),
            Self::Null | Self::Undefined | Self::ObjectEnd => Value::Null,
            Self::EcmaArray(a) => pairs_to_json(a.iter()),
            Self::StrictArray(v) => Value::Array(v.iter().map(Amf0Value::to_json).collect()),
            Self::Date(d) => number_to_json(d.millis),
        }
    }
}

fn pairs_to_json<'a>(pairs: impl Iterator<Item = (&'a str, &'a Amf0Value)>) -> Value {
    let mut map = Map::new();
    for (name, value) in pairs {
        map.insert(name.to_owned(), value.to_json());
    }
    Value::Object(map)
}

/// Integral doubles surface as JSON integers, everything else as floats.
/// Non-finite values have no JSON representation and become null.
fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
