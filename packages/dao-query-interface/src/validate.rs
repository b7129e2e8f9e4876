use std::fmt;

use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::Value;

use crate::{error::QueryError, msg::QueryMsg};

/// Decodes a raw query, reporting which part of the message shape was
/// violated when it does not match one of the query variants.
///
/// Repeated keys are rejected at every level, so anything accepted here
/// decodes to the same message through `QueryMsg`'s own deserializer.
pub fn parse_query(raw: &[u8]) -> Result<QueryMsg, QueryError> {
    let value: Value = serde_json::from_slice(raw).map_err(|err| QueryError::InvalidJson {
        msg: err.to_string(),
    })?;
    let tag = check_shape(&value)?;

    // Decoding into a `Value` keeps only the last of any repeated key.
    let TopLevelKeys(mut tags) =
        serde_json::from_slice(raw).map_err(|err| QueryError::InvalidJson {
            msg: err.to_string(),
        })?;
    if tags.len() > 1 {
        tags.sort();
        return Err(QueryError::MultipleVariants { tags });
    }

    serde_json::from_slice(raw).map_err(|err| QueryError::InvalidPayload {
        tag,
        msg: err.to_string(),
    })
}

/// Same as `parse_query` but for an already decoded JSON value.
pub fn parse_query_value(value: Value) -> Result<QueryMsg, QueryError> {
    let tag = check_shape(&value)?;
    serde_json::from_value(value).map_err(|err| QueryError::InvalidPayload {
        tag,
        msg: err.to_string(),
    })
}

/// Checks that `value` is an object with a single known variant key
/// mapping to an object, and returns that key.
fn check_shape(value: &Value) -> Result<String, QueryError> {
    let object = value.as_object().ok_or(QueryError::NotAnObject {})?;
    let mut tags = object.keys();
    let tag = match (tags.next(), tags.next()) {
        (None, _) => return Err(QueryError::NoVariant {}),
        (Some(tag), None) => tag.clone(),
        (Some(_), Some(_)) => {
            // serde_json's map is ordered by key unless preserve_order is on
            let mut tags: Vec<String> = object.keys().cloned().collect();
            tags.sort();
            return Err(QueryError::MultipleVariants { tags });
        }
    };
    if !QueryMsg::TAGS.contains(&tag.as_str()) {
        return Err(QueryError::UnknownVariant { tag });
    }
    if !object[&tag].is_object() {
        return Err(QueryError::PayloadNotObject { tag });
    }
    Ok(tag)
}

/// Every key of a JSON object in document order, repeats included.
struct TopLevelKeys(Vec<String>);

impl<'de> Deserialize<'de> for TopLevelKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = TopLevelKeys;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TopLevelKeys, A::Error> {
                let mut keys = vec![];
                while let Some(key) = map.next_key::<String>()? {
                    map.next_value::<IgnoredAny>()?;
                    keys.push(key);
                }
                Ok(TopLevelKeys(keys))
            }
        }

        deserializer.deserialize_map(KeysVisitor)
    }
}
