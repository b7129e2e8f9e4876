use dao_query_interface::{parse_query, QueryError, QueryMsg};
use serde_json::{value::RawValue, Value};
use thiserror::Error;

use crate::config::LintConfig;

#[derive(Error, Debug, PartialEq)]
pub enum LintError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("({tag}) queries are not served by this deployment")]
    DeniedTag { tag: String },

    #[error("input holds no query messages")]
    EmptyInput {},
}

/// A message that matched the query interface, with anything worth
/// pointing out about it.
#[derive(Debug, PartialEq)]
pub struct Accepted {
    pub tag: &'static str,
    pub warnings: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub struct Outcome {
    /// Where the message came from, e.g. `queries.json[2]`.
    pub source: String,
    pub result: Result<Accepted, LintError>,
}

/// Lints every message in an input. An input is either a single query
/// message or a non-empty JSON array of them.
pub fn lint_input(source: &str, raw: &[u8], config: &LintConfig) -> Vec<Outcome> {
    let value: Value = match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(err) => {
            return vec![Outcome {
                source: source.to_string(),
                result: Err(QueryError::InvalidJson {
                    msg: err.to_string(),
                }
                .into()),
            }]
        }
    };

    match value {
        Value::Array(messages) if messages.is_empty() => vec![Outcome {
            source: source.to_string(),
            result: Err(LintError::EmptyInput {}),
        }],
        // Messages are linted from their raw text so repeated keys are
        // still visible to the parser.
        Value::Array(_) => match serde_json::from_slice::<Vec<&RawValue>>(raw) {
            Ok(messages) => messages
                .into_iter()
                .enumerate()
                .map(|(i, message)| Outcome {
                    source: format!("{source}[{i}]"),
                    result: lint_message(message.get().as_bytes(), config),
                })
                .collect(),
            Err(err) => vec![Outcome {
                source: source.to_string(),
                result: Err(QueryError::InvalidJson {
                    msg: err.to_string(),
                }
                .into()),
            }],
        },
        _ => vec![Outcome {
            source: source.to_string(),
            result: lint_message(raw, config),
        }],
    }
}

pub fn lint_message(raw: &[u8], config: &LintConfig) -> Result<Accepted, LintError> {
    let query = parse_query(raw)?;
    let tag = query.tag();
    if config.denies(tag) {
        return Err(LintError::DeniedTag {
            tag: tag.to_string(),
        });
    }

    let mut warnings = vec![];
    if let Err(err) = config.limits.check(query.limit()) {
        if config.strict_limits {
            return Err(err.into());
        }
        warnings.push(err.to_string());
    }
    if config.warn_on_extension {
        if let Some(keys) = extension_keys(&query) {
            warnings.push(format!("unrecognized keys in ({tag}) payload: {keys}"));
        }
    }

    Ok(Accepted { tag, warnings })
}

fn extension_keys(query: &QueryMsg) -> Option<String> {
    let extension = query.extension();
    if extension.is_empty() {
        None
    } else {
        Some(
            extension
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
