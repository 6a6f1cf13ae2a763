use std::collections::BTreeMap;
use std::fmt;

use crate::Expected;
use crate::SchemaError;

/// String-keyed mapping of free-form values.
///
/// Keys iterate in sorted order, not in the order the document wrote them.
pub type Map = BTreeMap<String, Value>;

/// One node of a site's free-form `data`.
///
/// YAML tags are not kept: a tagged node is stored as the value it wraps.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(i64),
    /// Any number that is not an `i64`, including integers too large for one.
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Map),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Nil => Kind::Nil,
            Self::Bool(_) => Kind::Bool,
            Self::Integer(_) => Kind::Integer,
            Self::Float(_) => Kind::Float,
            Self::String(_) => Kind::String,
            Self::Sequence(_) => Kind::Sequence,
            Self::Mapping(_) => Kind::Mapping,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats and integers both read as `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` when this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Like [`Value::as_bool`], failing with an error naming `field`.
    pub fn expect_bool(&self, field: &str) -> Result<bool, SchemaError> {
        self.as_bool()
            .ok_or_else(|| self.mismatch(field, Expected::Bool))
    }

    pub fn expect_integer(&self, field: &str) -> Result<i64, SchemaError> {
        self.as_integer()
            .ok_or_else(|| self.mismatch(field, Expected::Integer))
    }

    pub fn expect_float(&self, field: &str) -> Result<f64, SchemaError> {
        self.as_float()
            .ok_or_else(|| self.mismatch(field, Expected::Float))
    }

    pub fn expect_str(&self, field: &str) -> Result<&str, SchemaError> {
        self.as_str()
            .ok_or_else(|| self.mismatch(field, Expected::String))
    }

    pub fn expect_sequence(&self, field: &str) -> Result<&[Value], SchemaError> {
        self.as_sequence()
            .ok_or_else(|| self.mismatch(field, Expected::Sequence))
    }

    pub fn expect_mapping(&self, field: &str) -> Result<&Map, SchemaError> {
        self.as_mapping()
            .ok_or_else(|| self.mismatch(field, Expected::Mapping))
    }

    fn mismatch(&self, field: &str, expected: Expected) -> SchemaError {
        SchemaError::wrong_type(field, expected, self.kind())
    }

    /// Convert a YAML node found at `field`, which is used to name nested
    /// fields in errors (`data.menu[2].title`).
    pub(crate) fn from_yaml(value: &serde_yaml::Value, field: &str) -> Result<Self, SchemaError> {
        let value = match value {
            serde_yaml::Value::Null => Self::Nil,
            serde_yaml::Value::Bool(b) => Self::Bool(*b),
            serde_yaml::Value::Number(n) => from_number(n),
            serde_yaml::Value::String(s) => Self::String(s.clone()),
            serde_yaml::Value::Sequence(items) => Self::Sequence(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| Self::from_yaml(item, &format!("{field}[{i}]")))
                    .collect::<Result<_, _>>()?,
            ),
            serde_yaml::Value::Mapping(mapping) => Self::Mapping(map_from_yaml(mapping, field)?),
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(&tagged.value, field)?,
        };
        Ok(value)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Mapping(map)
    }
}

/// The type of a YAML node or [`Value`], as reported in errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
}

impl Kind {
    pub(crate) fn of_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Self::Nil,
            serde_yaml::Value::Bool(_) => Self::Bool,
            serde_yaml::Value::Number(n) if n.is_i64() => Self::Integer,
            serde_yaml::Value::Number(_) => Self::Float,
            serde_yaml::Value::String(_) => Self::String,
            serde_yaml::Value::Sequence(_) => Self::Sequence,
            serde_yaml::Value::Mapping(_) => Self::Mapping,
            serde_yaml::Value::Tagged(tagged) => Self::of_yaml(&tagged.value),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Nil => "null",
            Self::Bool => "a boolean",
            Self::Integer => "an integer",
            Self::Float => "a float",
            Self::String => "a string",
            Self::Sequence => "a sequence",
            Self::Mapping => "a mapping",
        };
        f.write_str(s)
    }
}

pub(crate) fn untag(mut value: &serde_yaml::Value) -> &serde_yaml::Value {
    while let serde_yaml::Value::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

/// Read a mapping key as a string. Booleans and numbers use their YAML text.
pub(crate) fn map_key(key: &serde_yaml::Value, field: &str) -> Result<String, SchemaError> {
    match untag(key) {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(SchemaError::wrong_type(
            field,
            Expected::String,
            Kind::of_yaml(other),
        )),
    }
}

pub(crate) fn map_from_yaml(mapping: &serde_yaml::Mapping, field: &str) -> Result<Map, SchemaError> {
    let mut map = Map::new();
    for (key, value) in mapping {
        let key = map_key(key, field)?;
        if map.contains_key(&key) {
            return Err(SchemaError::DuplicateKey {
                field: field.to_owned(),
                key,
            });
        }
        let value = Value::from_yaml(value, &format!("{field}.{key}"))?;
        map.insert(key, value);
    }
    Ok(map)
}

fn from_number(n: &serde_yaml::Number) -> Value {
    match (n.as_i64(), n.as_f64()) {
        (Some(i), _) => Value::Integer(i),
        (None, Some(f)) => Value::Float(f),
        (None, None) => Value::Float(f64::NAN),
    }
}
