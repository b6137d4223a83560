use crate::errors::ParserError;
use crate::scanner::TokenStream;
use enum_as_inner::EnumAsInner;
use hashbrown::HashMap;
use log::debug;
use serde::Serialize;
use std::str::FromStr;

/// Marker that announces the number of elements of an array record.
const ARRAY_MARKER: &str = "N=";

/// Element type of a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Int,
    Float,
}

/// Declaration of a record: the key phrase, the element type and whether the value is
/// expected to be an array. The report decides the actual shape. Records that are not
/// `required` may be absent from the report.
#[derive(Debug, Copy, Clone)]
pub struct RecordSpec {
    pub key: &'static str,
    pub kind: RecordKind,
    pub is_array: bool,
    pub required: bool,
}

impl RecordSpec {
    pub const fn int(key: &'static str) -> Self {
        Self::new(key, RecordKind::Int, false)
    }

    pub const fn float(key: &'static str) -> Self {
        Self::new(key, RecordKind::Float, false)
    }

    pub const fn int_array(key: &'static str) -> Self {
        Self::new(key, RecordKind::Int, true)
    }

    pub const fn float_array(key: &'static str) -> Self {
        Self::new(key, RecordKind::Float, true)
    }

    const fn new(key: &'static str, kind: RecordKind, is_array: bool) -> Self {
        Self {
            key,
            kind,
            is_array,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The value of a record. Scalars and arrays are distinguished by the presence of
/// the `N=` marker in the report and not by the declaration.
/// The `EnumAsInner` macro generates the accessors `as_int()`, `into_float_array()`, ...
#[derive(Debug, Clone, PartialEq, Serialize, EnumAsInner)]
#[serde(untagged)]
pub enum RecordValue {
    Int(i64),
    Float(f64),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
}

impl RecordValue {
    pub fn is_array(&self) -> bool {
        matches!(self, RecordValue::IntArray(_) | RecordValue::FloatArray(_))
    }

    /// Number of elements. A scalar counts as one element.
    pub fn n_elements(&self) -> usize {
        match self {
            RecordValue::IntArray(v) => v.len(),
            RecordValue::FloatArray(v) => v.len(),
            _ => 1,
        }
    }
}

fn parse_token<T: FromStr>(key: &str, token: &str, kind: RecordKind) -> Result<T, ParserError> {
    token.parse::<T>().map_err(|_| {
        ParserError::malformed(
            key,
            format!("expected a value of type {:?}, found: {}", kind, token),
        )
    })
}

fn convert(
    key: &str,
    kind: RecordKind,
    tokens: &[&str],
    is_array: bool,
) -> Result<RecordValue, ParserError> {
    let value: RecordValue = match (kind, is_array) {
        (RecordKind::Int, false) => RecordValue::Int(parse_token(key, tokens[0], kind)?),
        (RecordKind::Float, false) => RecordValue::Float(parse_token(key, tokens[0], kind)?),
        (RecordKind::Int, true) => RecordValue::IntArray(
            tokens
                .iter()
                .map(|t| parse_token(key, t, kind))
                .collect::<Result<Vec<i64>, ParserError>>()?,
        ),
        (RecordKind::Float, true) => RecordValue::FloatArray(
            tokens
                .iter()
                .map(|t| parse_token(key, t, kind))
                .collect::<Result<Vec<f64>, ParserError>>()?,
        ),
    };
    Ok(value)
}

/// Read the value of the record whose key phrase ends right before the token `start`.
/// The token at `start` is the type tag of the report.
pub fn read_record_at(
    stream: &TokenStream,
    start: usize,
    spec: &RecordSpec,
) -> Result<RecordValue, ParserError> {
    let truncated = || ParserError::malformed(spec.key, "the record is truncated");
    // The type tag is skipped, the declared type is used for the conversion.
    stream.get(start).ok_or_else(truncated)?;
    let first: &str = stream.get(start + 1).ok_or_else(truncated)?;

    let value: RecordValue = if first == ARRAY_MARKER {
        let count: &str = stream.get(start + 2).ok_or_else(truncated)?;
        let n: usize = count.parse::<usize>().map_err(|_| {
            ParserError::malformed(spec.key, format!("invalid number of elements: {}", count))
        })?;
        let elements: &[&str] = stream.take(start + 3, n);
        if elements.len() != n {
            return Err(ParserError::malformed(
                spec.key,
                format!("expected {} elements, found {}", n, elements.len()),
            ));
        }
        convert(spec.key, spec.kind, elements, true)?
    } else {
        convert(spec.key, spec.kind, &[first], false)?
    };
    Ok(value)
}

/// Read the first occurrence of a record. Returns `None` if the key phrase is absent.
pub fn read_record(
    stream: &TokenStream,
    spec: &RecordSpec,
) -> Result<Option<RecordValue>, ParserError> {
    match stream.find(spec.key) {
        Some(start) => read_record_at(stream, start, spec).map(Some),
        None => Ok(None),
    }
}

/// Read every occurrence of a record in order of appearance.
pub fn read_all_records(
    stream: &TokenStream,
    spec: &RecordSpec,
) -> Result<Vec<RecordValue>, ParserError> {
    stream
        .find_all(spec.key)
        .into_iter()
        .map(|start| read_record_at(stream, start, spec))
        .collect()
}

/// The records found in a report, addressed by their key phrase.
#[derive(Debug, Clone, Default)]
pub struct Records {
    map: HashMap<&'static str, RecordValue>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the first occurrence of every record of the vocabulary. The scans are
    /// independent of each other. Absent records that are `required` raise a
    /// `MissingRecord` error, all other absent records are skipped.
    pub fn extract(stream: &TokenStream, vocabulary: &[RecordSpec]) -> Result<Self, ParserError> {
        let mut records: Records = Records::new();
        for spec in vocabulary.iter() {
            match read_record(stream, spec)? {
                Some(value) => {
                    debug!("{: <45} {: >8} element(s)", spec.key, value.n_elements());
                    records.set(spec.key, value);
                }
                None if spec.required => return Err(ParserError::missing(spec.key)),
                None => debug!("{: <45} {: >8}", spec.key, "absent"),
            }
        }
        Ok(records)
    }

    pub fn set(&mut self, key: &'static str, value: RecordValue) {
        self.map.insert(key, value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn require(&self, key: &str) -> Result<&RecordValue, ParserError> {
        self.map.get(key).ok_or_else(|| ParserError::missing(key))
    }

    /// An integer scalar. A one-element array is accepted as well.
    pub fn int(&self, key: &str) -> Result<i64, ParserError> {
        match self.require(key)? {
            RecordValue::Int(value) => Ok(*value),
            RecordValue::IntArray(values) if values.len() == 1 => Ok(values[0]),
            _ => Err(ParserError::malformed(key, "expected an integer scalar")),
        }
    }

    /// A real scalar. A one-element array is accepted as well.
    pub fn float(&self, key: &str) -> Result<f64, ParserError> {
        match self.require(key)? {
            RecordValue::Float(value) => Ok(*value),
            RecordValue::FloatArray(values) if values.len() == 1 => Ok(values[0]),
            _ => Err(ParserError::malformed(key, "expected a real scalar")),
        }
    }

    /// An integer array. A scalar is returned as an array of one element.
    pub fn int_array(&self, key: &str) -> Result<&[i64], ParserError> {
        match self.require(key)? {
            RecordValue::IntArray(values) => Ok(values.as_slice()),
            RecordValue::Int(value) => Ok(std::slice::from_ref(value)),
            _ => Err(ParserError::malformed(key, "expected an integer array")),
        }
    }

    /// A real array. A scalar is returned as an array of one element.
    pub fn float_array(&self, key: &str) -> Result<&[f64], ParserError> {
        match self.require(key)? {
            RecordValue::FloatArray(values) => Ok(values.as_slice()),
            RecordValue::Float(value) => Ok(std::slice::from_ref(value)),
            _ => Err(ParserError::malformed(key, "expected a real array")),
        }
    }
}
