use serde::{Deserialize, Serialize};

/// What the merchant's app is and where it's running, attached to analytics events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceData {
    pub app_name: String,
    pub app_id: String,
    pub is_simulator: bool,
    pub merchant_app_version: String,
}

impl DeviceData {
    pub fn new(
        app_name: impl Into<String>,
        app_id: impl Into<String>,
        is_simulator: bool,
        merchant_app_version: impl Into<String>,
    ) -> Self {
        DeviceData {
            app_name: app_name.into(),
            app_id: app_id.into(),
            is_simulator,
            merchant_app_version: merchant_app_version.into(),
        }
    }
}

#[test]
fn test_fields_preserved() {
    let cases = [
        ("Shop", "com.example.shop", false, "1.2.3"),
        ("", "", true, ""),
        ("Ünï", "id with spaces", true, "2024.10-beta+7"),
    ];

    for (name, id, sim, version) in cases {
        let d = DeviceData::new(name, id, sim, version);
        assert_eq!(d.app_name, name);
        assert_eq!(d.app_id, id);
        assert_eq!(d.is_simulator, sim);
        assert_eq!(d.merchant_app_version, version);
    }
}

#[test]
fn test_structural_equality() {
    let a = DeviceData::new("Shop", "com.example.shop", false, "1.0");
    let b = DeviceData::new("Shop".to_string(), "com.example.shop".to_string(), false, "1.0".to_string());
    assert_eq!(a, b);
    assert_eq!(a.clone(), b);
    assert_ne!(a, DeviceData::new("Shop", "com.example.shop", true, "1.0"));
}

#[test]
fn test_json_keys() {
    let d = DeviceData::new("Shop", "com.example.shop", true, "1.0");
    assert_eq!(
        serde_json::to_value(&d).unwrap(),
        serde_json::json!({
            "app_name": "Shop",
            "app_id": "com.example.shop",
            "is_simulator": true,
            "merchant_app_version": "1.0",
        })
    );
}

#[test]
fn test_all_keys_required() {
    let r: Result<DeviceData, _> =
        serde_json::from_value(serde_json::json!({"app_name": "Shop", "app_id": "x", "is_simulator": false}));
    assert!(r.is_err());
}
