//! Wire types for the rates listing and cart endpoints. Both services live outside this
//! repository; the server only exposes placeholders that speak these shapes.
use serde::{Deserialize, Serialize};

pub type RateId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub id: RateId,
    pub origin: String,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// 20ft container price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate20: Option<f64>,
    /// 40ft container price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate40: Option<f64>,
    /// 40ft high-cube price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate40hc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesPage {
    pub total: u64,
    pub page: u32,
    pub results: Vec<RateRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatesQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "rateType", default, skip_serializing_if = "Option::is_none")]
    pub rate_type: Option<String>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// e.g. `relevance`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    pub rate_id: RateId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rate_record_optional_fields() {
        let r: RateRecord = serde_json::from_value(json!({
            "id": 7, "origin": "Shanghai", "destination": "Rotterdam", "rate40": 2150.0
        }))
        .unwrap();
        assert_eq!(r.rate40, Some(2150.0));
        assert_eq!(r.carrier, None);
        let back = serde_json::to_value(&r).unwrap();
        assert!(back.get("carrier").is_none());
    }

    #[test]
    fn cart_request_uses_camel_case() {
        let req: CartRequest = serde_json::from_str(r#"{"rateId": 12}"#).unwrap();
        assert_eq!(req.rate_id, 12);
        assert!(serde_json::from_str::<CartRequest>(r#"{"rate_id": 12}"#).is_err());
    }

    #[test]
    fn rates_query_field_names() {
        let q: RatesQuery = serde_json::from_value(json!({
            "origin": "Mumbai", "rateType": "FCL", "limit": 10, "page": 2, "sort": "relevance"
        }))
        .unwrap();
        assert_eq!(q.rate_type.as_deref(), Some("FCL"));
        assert_eq!(q.limit, Some(10));
        assert_eq!(q.page, Some(2));
        assert_eq!(q.sort.as_deref(), Some("relevance"));
        let back = serde_json::to_value(&q).unwrap();
        assert_eq!(back["rateType"], "FCL");
        assert!(back.get("type").is_none());
    }
}
