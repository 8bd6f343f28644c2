//! Typed decode/encode between [`RawRecord`] and caller-defined record types.
//!
//! The contract maps header names to the caller type's fields by name,
//! coercing from text. The bridge is a `serde_json` object of string values,
//! so any `Deserialize`/`Serialize` type with string-compatible fields works
//! without the engine knowing its shape.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use recset_common::{Result, error::Error};

use crate::record::RawRecord;

/// Decodes a raw record into a caller-defined record type.
pub fn decode<T: DeserializeOwned>(record: &RawRecord) -> Result<T> {
    let mut map = serde_json::Map::with_capacity(record.len());
    for (name, value) in record.iter() {
        map.insert(name.to_string(), Value::String(value.to_string()));
    }
    serde_json::from_value(Value::Object(map)).map_err(|e| Error::decode("record", e))
}

/// Encodes a caller-defined record back into a raw record.
///
/// Scalar field values render as their text form; `null` renders as an empty
/// string; nested values render as their JSON text.
pub fn encode<T: Serialize>(value: &T) -> Result<RawRecord> {
    let encoded = serde_json::to_value(value).map_err(|e| Error::decode("record", e))?;
    let Value::Object(map) = encoded else {
        return Err(Error::invalid_arg(
            "value",
            "record types must encode to a field map",
        ));
    };
    let mut record = RawRecord::with_capacity(map.len());
    for (name, value) in map {
        let text = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        record.insert(name, text);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Cpt {
        #[serde(rename = "Code")]
        code: String,
        #[serde(rename = "Name")]
        name: String,
    }

    #[test]
    fn test_decode_by_name() {
        let mut record = RawRecord::new();
        record.insert("Code", "100");
        record.insert("Name", "Alice");

        let cpt: Cpt = decode(&record).unwrap();
        assert_eq!(
            cpt,
            Cpt {
                code: "100".to_string(),
                name: "Alice".to_string()
            }
        );
    }

    #[test]
    fn test_decode_missing_field_fails() {
        let mut record = RawRecord::new();
        record.insert("Code", "100");
        assert!(decode::<Cpt>(&record).is_err());
    }

    #[test]
    fn test_decode_into_map() {
        let mut record = RawRecord::new();
        record.insert("Code", "100");
        record.insert("Name", "Alice");

        let map: std::collections::BTreeMap<String, String> = decode(&record).unwrap();
        assert_eq!(map["Code"], "100");
        assert_eq!(map["Name"], "Alice");
    }

    #[test]
    fn test_encode_round_trip() {
        let cpt = Cpt {
            code: "200".to_string(),
            name: "Bob".to_string(),
        };
        let record = encode(&cpt).unwrap();
        assert_eq!(record.get("Code"), Some("200"));
        assert_eq!(record.get("Name"), Some("Bob"));

        let back: Cpt = decode(&record).unwrap();
        assert_eq!(back, cpt);
    }

    #[test]
    fn test_encode_scalars_and_null() {
        #[derive(Serialize)]
        struct Row {
            n: u32,
            flag: bool,
            missing: Option<String>,
        }

        let record = encode(&Row {
            n: 7,
            flag: true,
            missing: None,
        })
        .unwrap();
        assert_eq!(record.get("n"), Some("7"));
        assert_eq!(record.get("flag"), Some("true"));
        assert_eq!(record.get("missing"), Some(""));
    }

    #[test]
    fn test_encode_non_map_fails() {
        assert!(encode(&42u32).is_err());
    }
}
