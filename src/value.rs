//! Mapping of stored parameters onto configuration values.

use serde::Serialize;

use crate::store::{Parameter, ParameterType};

/// Separator SSM uses for `StringList` parameters.
pub const LIST_DELIMITER: char = ',';

/// The value handed back to the configuration host.
///
/// Serializes untagged: a scalar becomes a JSON string, a list a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    Scalar(String),
    List(Vec<String>),
}

impl ResolvedValue {
    /// Shapes a fetched parameter by its declared type.
    ///
    /// `StringList` values are split on [`LIST_DELIMITER`] with no trimming
    /// and no filtering of empty segments, so `"a,b,"` yields
    /// `["a", "b", ""]`. `String` and `SecureString` values are returned
    /// unchanged.
    pub fn from_parameter(parameter: Parameter) -> Self {
        match parameter.kind {
            ParameterType::StringList => ResolvedValue::List(
                parameter
                    .value
                    .split(LIST_DELIMITER)
                    .map(str::to_string)
                    .collect(),
            ),
            ParameterType::String | ParameterType::SecureString => {
                ResolvedValue::Scalar(parameter.value)
            }
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ResolvedValue::Scalar(s) => Some(s),
            ResolvedValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ResolvedValue::List(items) => Some(items),
            ResolvedValue::Scalar(_) => None,
        }
    }

    /// Converts into a JSON value for hosts that assemble a `serde_json` tree.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            ResolvedValue::Scalar(s) => serde_json::Value::String(s),
            ResolvedValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::String).collect())
            }
        }
    }
}
