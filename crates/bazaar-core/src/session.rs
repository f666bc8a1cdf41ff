//! # Session Records
//!
//! After login the webview stores the backend's login response as JSON under
//! [`USER_INFORMATION_KEY`]. Only its `customer` entry matters to the shell:
//!
//! ```json
//! { "accessToken": "...", "customer": { "id": 1, "nickname": "kim" } }
//! ```

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::types::CustomerProfile;
use crate::USER_INFORMATION_KEY;

/// Extracts the customer profile from the raw stored record.
///
/// `None` and an empty string both count as "nothing stored". A `customer`
/// entry that is JSON `null` counts as missing.
pub fn parse_user_information(raw: Option<&str>) -> CoreResult<CustomerProfile> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => {
            return Err(CoreError::SessionDataMissing {
                key: USER_INFORMATION_KEY.to_string(),
            })
        }
    };

    let record: Value = serde_json::from_str(raw).map_err(|source| CoreError::SessionDataCorrupt {
        key: USER_INFORMATION_KEY.to_string(),
        source,
    })?;

    match record.get("customer") {
        Some(customer) if !customer.is_null() => Ok(CustomerProfile::new(customer.clone())),
        _ => Err(CoreError::CustomerFieldMissing {
            key: USER_INFORMATION_KEY.to_string(),
        }),
    }
}
