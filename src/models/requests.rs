//! Request DTOs for the parameter cache API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for the PUT operation (PUT /params)
///
/// # Fields
/// - `key`: Parameter name
/// - `value`: The value to store
/// - `encrypt`: Store as an encrypted parameter (default: false)
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// Parameter name
    pub key: String,
    /// The value to store
    pub value: String,
    /// Store encrypted
    #[serde(default)]
    pub encrypt: bool,
}

/// Query string for the GET operation (GET /params/*key)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    /// Ask the store to decrypt the value
    #[serde(default)]
    pub decrypt: bool,
}

/// Request body for changing the default expiry (PUT /expiry)
#[derive(Debug, Clone, Deserialize)]
pub struct ExpiryRequest {
    /// New TTL in seconds
    pub seconds: u64,
}

impl ExpiryRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.seconds == 0 {
            return Some("Expiry must be at least one second".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_request_deserialize() {
        let json = r#"{"key": "app/db", "value": "hello"}"#;
        let req: PutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "app/db");
        assert_eq!(req.value, "hello");
        assert!(!req.encrypt);
    }

    #[test]
    fn test_put_request_with_encrypt() {
        let json = r#"{"key": "app/db", "value": "hello", "encrypt": true}"#;
        let req: PutRequest = serde_json::from_str(json).unwrap();
        assert!(req.encrypt);
    }

    #[test]
    fn test_expiry_request_validate() {
        assert!(ExpiryRequest { seconds: 0 }.validate().is_some());
        assert!(ExpiryRequest { seconds: 60 }.validate().is_none());
    }
}
