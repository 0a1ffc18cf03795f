use std::{collections::HashMap, fmt};

use serde::{
    de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor},
    ser::{Serialize, SerializeMap, SerializeSeq, Serializer},
};

use crate::path;

/// Largest integer an `f64` holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A parsed JSON value.
///
/// Object members keep the order in which their keys first appeared in the
/// source text. Keys are unique: when the source repeats a key, the last value
/// wins but the member stays at the position of the first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }

    /// Number of direct children, `None` for scalars.
    pub fn child_count(&self) -> Option<usize> {
        match self {
            JsonValue::Array(items) => Some(items.len()),
            JsonValue::Object(members) => Some(members.len()),
            _ => None,
        }
    }

    /// Counts this node and every node below it. Empty containers count as one.
    pub fn node_count(&self) -> usize {
        match self {
            JsonValue::Array(items) => 1 + items.iter().map(JsonValue::node_count).sum::<usize>(),
            JsonValue::Object(members) => {
                1 + members.iter().map(|(_, v)| v.node_count()).sum::<usize>()
            }
            _ => 1,
        }
    }

    /// Resolves a `$`-rooted path against this value.
    ///
    /// Member names are not escaped in paths, so an object step tries every
    /// member whose name prefixes the rest of the path and backtracks when the
    /// remainder does not resolve below it.
    pub fn at_path(&self, path: &str) -> Option<&JsonValue> {
        let rest = path.strip_prefix(path::ROOT)?;
        self.walk(rest)
    }

    fn walk(&self, rest: &str) -> Option<&JsonValue> {
        if rest.is_empty() {
            return Some(self);
        }
        match self {
            JsonValue::Array(items) => {
                let inner = rest.strip_prefix('[')?;
                let close = inner.find(']')?;
                let digits = &inner[..close];
                let index: usize = digits.parse().ok()?;
                // "[01]" is not a canonical index
                if index.to_string() != digits {
                    return None;
                }
                items.get(index)?.walk(&inner[close + 1..])
            }
            JsonValue::Object(members) => {
                let tail = rest.strip_prefix('.')?;
                members
                    .iter()
                    .filter(|(k, _)| tail.starts_with(k.as_str()))
                    .find_map(|(k, v)| v.walk(&tail[k.len()..]))
            }
            _ => None,
        }
    }
}

/// Renders a number the way JavaScript's `String(n)` does: integral values
/// without a fraction, exponent notation outside `[1e-6, 1e21)`.
pub fn number_text(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        }
    } else {
        format!("{}", n)
    }
}

fn exact_integer(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => match exact_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (k, v) in members {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(JsonValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(JsonValue::Number(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(JsonValue::Number(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(JsonValue::Number(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(JsonValue::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(JsonValue::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(JsonValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut members: Vec<(String, JsonValue)> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
            match slots.get(&key) {
                Some(&slot) => members[slot].1 = value,
                None => {
                    slots.insert(key.clone(), members.len());
                    members.push((key, value));
                }
            }
        }
        Ok(JsonValue::Object(members))
    }
}
