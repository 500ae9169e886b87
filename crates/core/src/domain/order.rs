use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Order state marking a completed (finalized) sale. Orders in any other
/// state are ignored by the analysis pipeline.
pub const LOCKED_STATE: &str = "locked";

/// A sales order as returned by the order API.
///
/// Only the fields the pipeline inspects are modeled; everything else is
/// kept in `extra` so the record serializes back exactly as received. All
/// currency amounts are integer minor units (cents).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId", default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Creation timestamp as the API sends it: an ISO-8601 string without a
    /// timezone offset, treated as naive local time.
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(rename = "lineItems", default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Whether this order is in the terminal completed state.
    pub fn is_completed(&self) -> bool {
        self.state.as_deref() == Some(LOCKED_STATE)
    }

    /// Identifier for log messages; orders without one are still processed.
    pub fn display_id(&self) -> &str {
        self.order_id.as_deref().unwrap_or("<no orderId>")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Order;

    #[test]
    fn deserializes_known_fields_and_keeps_unknown_ones() {
        let raw = json!({
            "orderId": "ORD-1",
            "state": "locked",
            "createdTime": "2025-11-01T10:00:00",
            "total": 906,
            "lineItems": [{"price": 906, "name": "espresso"}],
            "storeId": "S-9",
        });

        let order: Order = serde_json::from_value(raw.clone()).expect("order");
        assert_eq!(order.order_id.as_deref(), Some("ORD-1"));
        assert_eq!(order.total, Some(906));
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].price, Some(906));
        assert_eq!(order.extra.get("storeId"), Some(&json!("S-9")));

        let round_tripped = serde_json::to_value(&order).expect("serialize");
        assert_eq!(round_tripped, raw);
    }

    #[test]
    fn tolerates_missing_fields() {
        let order: Order = serde_json::from_value(serde_json::json!({})).expect("empty order");
        assert!(order.order_id.is_none());
        assert!(!order.is_completed());
        assert_eq!(order.display_id(), "<no orderId>");
    }

    #[test]
    fn only_locked_state_counts_as_completed() {
        let locked: Order =
            serde_json::from_value(json!({"state": "locked"})).expect("locked order");
        let pending: Order =
            serde_json::from_value(json!({"state": "pending"})).expect("pending order");
        assert!(locked.is_completed());
        assert!(!pending.is_completed());
    }
}
