//! # Payload Types
//!
//! Opaque records that originate outside the shell. The backend owns their
//! shape; the shell stores and hands them back without interpreting fields.
//!
//! ```text
//! ┌─────────────────────────────┐   ┌─────────────────────────────┐
//! │      CustomerProfile        │   │       ProductSummary        │
//! │  ─────────────────────────  │   │  ─────────────────────────  │
//! │  `customer` entry of the    │   │  product card selected in   │
//! │  stored userInformation     │   │  a listing, replaced        │
//! │  record (any JSON value)    │   │  wholesale on selection     │
//! └─────────────────────────────┘   └─────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Customer profile cached from session storage. Serializes as the bare
/// JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, type = "unknown")]
pub struct CustomerProfile(Value);

impl CustomerProfile {
    pub fn new(value: Value) -> Self {
        CustomerProfile(value)
    }

    /// Returns the raw JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Looks up a top-level field, e.g. `profile.get("id")`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// Product currently shown in the detail view.
///
/// An empty map means no product has been selected yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, type = "Record<string, unknown>")]
pub struct ProductSummary(Map<String, Value>);

impl ProductSummary {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_summary_is_transparent() {
        let product: ProductSummary = serde_json::from_value(json!({"id": 7, "title": "Bike"})).unwrap();
        assert_eq!(product.get("id"), Some(&json!(7)));
        assert_eq!(serde_json::to_value(&product).unwrap(), json!({"id": 7, "title": "Bike"}));
    }

    #[test]
    fn test_default_product_is_empty() {
        assert!(ProductSummary::default().is_empty());
    }

    #[test]
    fn test_ts_declarations_are_opaque() {
        assert_eq!(CustomerProfile::inline(), "unknown");
        assert_eq!(ProductSummary::inline(), "Record<string, unknown>");
    }

    #[test]
    fn test_customer_profile_wire_format_is_bare_value() {
        let profile: CustomerProfile = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(profile.as_value(), &json!({"id": 1}));
        assert_eq!(serde_json::to_string(&profile).unwrap(), r#"{"id":1}"#);
    }

    #[test]
    fn test_customer_profile_field_lookup() {
        let profile = CustomerProfile::new(json!({"id": 1, "nickname": "kim"}));
        assert_eq!(profile.get("nickname"), Some(&json!("kim")));
        assert_eq!(profile.get("email"), None);
    }
}
