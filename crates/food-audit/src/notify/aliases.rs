use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Reasons a stored alias list cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasParseError {
    #[error("alias list is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("alias list must be a JSON array, found {0}")]
    NotAList(&'static str),
    #[error("alias at position {index} is not a string")]
    NonStringAlias { index: usize },
}

/// Store aliases assigned to a manager, or the reason the stored value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignedStores {
    Parsed(Vec<String>),
    Malformed { raw: String, reason: AliasParseError },
}

impl AssignedStores {
    /// Parse the JSON text stored alongside the account. Never fails; bad input
    /// becomes [`AssignedStores::Malformed`].
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Parsed(Vec::new());
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value_with_raw(value, raw),
            Err(err) => Self::Malformed {
                raw: raw.to_string(),
                reason: AliasParseError::InvalidJson(err.to_string()),
            },
        }
    }

    pub fn from_aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Parsed(aliases.into_iter().map(Into::into).collect())
    }

    fn from_value(value: Value) -> Self {
        let raw = value.to_string();
        Self::from_value_with_raw(value, &raw)
    }

    fn from_value_with_raw(value: Value, raw: &str) -> Self {
        match parse_alias_value(value) {
            Ok(aliases) => Self::Parsed(aliases),
            Err(reason) => Self::Malformed {
                raw: raw.to_string(),
                reason,
            },
        }
    }

    pub fn aliases(&self) -> Result<&[String], &AliasParseError> {
        match self {
            Self::Parsed(aliases) => Ok(aliases),
            Self::Malformed { reason, .. } => Err(reason),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl Default for AssignedStores {
    fn default() -> Self {
        Self::Parsed(Vec::new())
    }
}

fn parse_alias_value(value: Value) -> Result<Vec<String>, AliasParseError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::String(text) => {
            // Directory exports sometimes double-encode the list.
            let inner: Value = serde_json::from_str(&text)
                .map_err(|err| AliasParseError::InvalidJson(err.to_string()))?;
            return match inner {
                Value::Array(_) => parse_alias_value(inner),
                other => Err(AliasParseError::NotAList(json_kind(&other))),
            };
        }
        other => return Err(AliasParseError::NotAList(json_kind(&other))),
    };

    let mut aliases = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            // Blank aliases are kept verbatim; an empty one is contained in
            // every identifier and therefore matches any store.
            Value::String(alias) => aliases.push(alias),
            _ => return Err(AliasParseError::NonStringAlias { index }),
        }
    }
    Ok(aliases)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for AssignedStores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Parsed(aliases) => aliases.serialize(serializer),
            Self::Malformed { raw, .. } => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AssignedStores {
    /// Accepts a JSON array or the stored JSON text of one.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(raw) => Self::from_json(&raw),
            other => Self::from_value(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json_string_lists() {
        let stores = AssignedStores::from_json(r#"["GMRL-SIG", "Signature Store"]"#);
        assert_eq!(
            stores.aliases().expect("parsed"),
            &["GMRL-SIG".to_string(), "Signature Store".to_string()]
        );
    }

    #[test]
    fn invalid_json_is_marked_malformed() {
        let stores = AssignedStores::from_json("[\"GMRL-SIG\"");
        assert!(stores.is_malformed());
        assert!(matches!(
            stores.aliases(),
            Err(AliasParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn objects_and_scalars_are_not_lists() {
        assert!(matches!(
            AssignedStores::from_json(r#"{"store": "GMRL-SIG"}"#).aliases(),
            Err(AliasParseError::NotAList("an object"))
        ));
        assert!(matches!(
            AssignedStores::from_json("42").aliases(),
            Err(AliasParseError::NotAList("a number"))
        ));
    }

    #[test]
    fn non_string_entries_reject_the_whole_list() {
        assert!(matches!(
            AssignedStores::from_json(r#"["GMRL-SIG", 7]"#).aliases(),
            Err(AliasParseError::NonStringAlias { index: 1 })
        ));
    }

    #[test]
    fn blank_entries_are_kept_verbatim() {
        let stores = AssignedStores::from_json(r#"["", "  ", "Downtown"]"#);
        assert_eq!(
            stores.aliases().expect("parsed"),
            &["".to_string(), "  ".to_string(), "Downtown".to_string()]
        );
    }

    #[test]
    fn blank_and_null_values_mean_no_stores() {
        assert_eq!(AssignedStores::from_json(""), AssignedStores::Parsed(Vec::new()));
        assert_eq!(
            AssignedStores::from_json("null"),
            AssignedStores::Parsed(Vec::new())
        );
    }

    #[test]
    fn double_encoded_lists_are_unwrapped() {
        let stores = AssignedStores::from_json(r#""[\"Downtown\"]""#);
        assert_eq!(stores.aliases().expect("parsed"), &["Downtown".to_string()]);
    }

    #[test]
    fn deserializes_arrays_and_stored_text() {
        let from_array: AssignedStores =
            serde_json::from_value(json!(["Downtown"])).expect("array form");
        let from_text: AssignedStores =
            serde_json::from_value(json!("[\"Downtown\"]")).expect("text form");
        let broken: AssignedStores =
            serde_json::from_value(json!("Downtown")).expect("never fails");

        assert_eq!(from_array, from_text);
        assert!(broken.is_malformed());
    }
}
