use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

use crate::json::OptionalStrings;

/// Key the email address lives under in JSON payloads.
pub const EMAIL_ADDRESS_KEY: &str = "email_address";

/// Someone being paid, identified only by their email address.
///
/// The address is never validated and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payee {
    #[serde(default, deserialize_with = "deserialize_non_string_as_empty")]
    pub email_address: String,
}

/// Same rule as [`Payee::from_json`]: `null` and non-string values become an empty address.
fn deserialize_non_string_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default())
}

impl Payee {
    pub fn new(email_address: impl Into<String>) -> Self {
        Payee {
            email_address: email_address.into(),
        }
    }

    /// Build a payee from a JSON object, using an empty address if `email_address` is missing or not a string.
    pub fn from_json<J: OptionalStrings + ?Sized>(json: &J) -> Self {
        let email_address = json
            .get_optional_string(EMAIL_ADDRESS_KEY)
            .unwrap_or_else(|| {
                log::debug!("Payee JSON has no {}, using an empty address", EMAIL_ADDRESS_KEY);
                String::new()
            });

        Payee { email_address }
    }

    /// Parse raw JSON text. Only malformed JSON is an error.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Ok(Self::from_json(&value))
    }
}

impl From<String> for Payee {
    fn from(email_address: String) -> Self {
        Payee::new(email_address)
    }
}

impl From<&str> for Payee {
    fn from(email_address: &str) -> Self {
        Payee::new(email_address)
    }
}

#[test]
fn test_new_keeps_string_verbatim() {
    for s in ["a@b.com", "", "  spaces  ", "not an email", "ünïcödé@例え.jp"] {
        assert_eq!(Payee::new(s).email_address, s);
    }
}

#[test]
fn test_from_json() {
    let p = Payee::from_json(&serde_json::json!({"email_address": "a@b.com"}));
    assert_eq!(p.email_address, "a@b.com");
}

#[test]
fn test_from_json_missing_key_is_empty() {
    use serde_json::json;

    assert_eq!(Payee::from_json(&json!({})).email_address, "");
    assert_eq!(Payee::from_json(&json!({"email": "a@b.com"})).email_address, "");
}

#[test]
fn test_from_json_null_or_wrong_type_is_empty() {
    use serde_json::json;

    assert_eq!(Payee::from_json(&json!({"email_address": null})), Payee::default());
    assert_eq!(Payee::from_json(&json!({"email_address": 42})), Payee::default());
}

#[test]
fn test_from_string_map() {
    let mut m = std::collections::HashMap::new();
    m.insert(EMAIL_ADDRESS_KEY.to_string(), "x@y.org".to_string());
    assert_eq!(Payee::from_json(&m), Payee::new("x@y.org"));
}

#[test]
fn test_from_json_str() {
    let p = Payee::from_json_str(r#"{"email_address":"a@b.com","extra":1}"#)
        .expect("Should parse");
    assert_eq!(p, Payee::from("a@b.com"));

    assert!(Payee::from_json_str("{not json").is_err());
    assert_eq!(Payee::from_json_str("[]").unwrap(), Payee::default());
}

#[test]
fn test_serde_matches_from_json() {
    use serde_json::json;

    let inputs = [
        json!({"email_address": "a@b.com"}),
        json!({}),
        json!({"email_address": null}),
        json!({"email_address": 42}),
        json!({"email_address": true}),
        json!({"email_address": ["a@b.com"]}),
        json!({"email_address": {"nested": "a@b.com"}}),
    ];

    for input in inputs {
        let via_serde: Payee = serde_json::from_value(input.clone())
            .unwrap_or_else(|e| panic!("Should deserialize {}: {:?}", input, e));
        assert_eq!(via_serde, Payee::from_json(&input), "input: {}", input);
    }

    assert_eq!(
        serde_json::to_value(Payee::new("a@b.com")).unwrap(),
        json!({"email_address": "a@b.com"})
    );
}

#[test]
fn test_serde_from_text_with_non_string_address() {
    let p: Payee = serde_json::from_str(r#"{"email_address": 42}"#).expect("Should deserialize");
    assert_eq!(p, Payee::default());
}
