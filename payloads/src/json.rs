//! Read optional string fields out of loosely-typed JSON.
//!
//! A field counts as present only when it exists and holds a string. Missing keys, `null`, numbers, and so on all
//! come back as `None`; callers decide what the default is.
use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

pub trait OptionalStrings {
    fn get_optional_string(&self, key: &str) -> Option<String>;
}

impl OptionalStrings for Map<String, Value> {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_string)
    }
}

impl OptionalStrings for Value {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        // Only objects have keys.
        self.as_object()?.get_optional_string(key)
    }
}

impl OptionalStrings for HashMap<String, String> {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl OptionalStrings for BTreeMap<String, String> {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: OptionalStrings + ?Sized> OptionalStrings for &T {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        (**self).get_optional_string(key)
    }
}

#[test]
fn test_value_lookup() {
    let v = serde_json::json!({"a": "x", "b": null, "c": 5, "d": {"e": "f"}});

    assert_eq!(v.get_optional_string("a").as_deref(), Some("x"));
    assert_eq!(v.get_optional_string("b"), None);
    assert_eq!(v.get_optional_string("c"), None);
    assert_eq!(v.get_optional_string("d"), None);
    assert_eq!(v.get_optional_string("missing"), None);
}

#[test]
fn test_non_object_has_no_keys() {
    assert_eq!(serde_json::json!("a").get_optional_string("a"), None);
    assert_eq!(serde_json::json!(["a"]).get_optional_string("a"), None);
    assert_eq!(Value::Null.get_optional_string("a"), None);
}

#[test]
fn test_string_maps() {
    let mut hm = HashMap::new();
    hm.insert("k".to_string(), "v".to_string());
    let bm: BTreeMap<String, String> = hm.clone().into_iter().collect();

    assert_eq!(hm.get_optional_string("k").as_deref(), Some("v"));
    assert_eq!(bm.get_optional_string("k").as_deref(), Some("v"));
    assert_eq!((&bm).get_optional_string("nope"), None);
}
