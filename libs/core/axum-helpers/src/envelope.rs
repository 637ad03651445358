//! Success envelopes: `{success:true, data?, count?, message?}`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Successful response carrying a payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            count: None,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> Envelope<Vec<T>> {
    /// List payload; `count` is the number of items returned.
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len() as u64),
            message: None,
            data: Some(items),
        }
    }
}

/// `{success:true, message}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `{success:true, count}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub success: bool,
    pub count: u64,
}

impl CountResponse {
    pub fn new(count: u64) -> Self {
        Self {
            success: true,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_envelope() {
        let json = serde_json::to_value(Envelope::data(json!({"id": 1}))).unwrap();
        assert_eq!(json, json!({"success": true, "data": {"id": 1}}));
    }

    #[test]
    fn test_list_envelope_counts_items() {
        let json = serde_json::to_value(Envelope::list(vec![1, 2, 3])).unwrap();
        assert_eq!(json, json!({"success": true, "count": 3, "data": [1, 2, 3]}));
    }

    #[test]
    fn test_empty_list_envelope() {
        let json = serde_json::to_value(Envelope::<Vec<u8>>::list(vec![])).unwrap();
        assert_eq!(json, json!({"success": true, "count": 0, "data": []}));
    }

    #[test]
    fn test_message_envelope() {
        let json = serde_json::to_value(Envelope::data(7).with_message("créé")).unwrap();
        assert_eq!(json, json!({"success": true, "message": "créé", "data": 7}));

        let json = serde_json::to_value(MessageResponse::new("supprimé")).unwrap();
        assert_eq!(json, json!({"success": true, "message": "supprimé"}));
    }

    #[test]
    fn test_count_response() {
        let json = serde_json::to_value(CountResponse::new(0)).unwrap();
        assert_eq!(json, json!({"success": true, "count": 0}));
    }
}
