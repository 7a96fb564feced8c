//! Client for the managed retail search service.
//!
//! Speaks the `v2` proto-JSON surface: one POST per search against a
//! configured placement, results decoded into the small slice of the product
//! record this service forwards.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Client holding the shared HTTP connection pool and endpoint configuration.
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl SearchClient {
    /// Creates a client for the given base endpoint. The bearer token, when
    /// present, is forwarded on every call; acquiring or refreshing it is the
    /// caller's problem.
    pub fn new(endpoint: impl Into<String>, auth_token: Option<String>) -> Self {
        SearchClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    /// Issues a single search against the placement and returns the result
    /// list in service order.
    pub async fn search(
        &self,
        placement: &str,
        query: &str,
        visitor_id: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = format!("{}/v2/{}:search", self.endpoint, placement);
        let body = SearchRequestBody { query, visitor_id };

        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| SearchError::Unexpected {
            message: err.to_string(),
        })?;

        if !response.status().is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let message = extract_api_message(&body).unwrap_or(body);
            return Err(SearchError::Api { message });
        }

        let payload: SearchResponseBody =
            response.json().await.map_err(|err| SearchError::Unexpected {
                message: err.to_string(),
            })?;

        Ok(payload.results)
    }
}

/// Failure modes of a search call. `Api` means the service answered with an
/// error payload; `Unexpected` covers everything before a usable response.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("API error: {message}")]
    Api { message: String },
    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequestBody<'a> {
    query: &'a str,
    visitor_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// One entry of the service's result list.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product: Product,
}

/// The slice of the product record this service cares about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price_info: Option<PriceInfo>,
    #[serde(default)]
    pub availability: Availability,
}

/// Price block of a product. Both fields are optional on the wire; a product
/// without prices serializes back out as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

/// Stock status of a product. The service emits either the enum name or the
/// numeric proto code; unknown values collapse to `Unspecified`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Unspecified,
    InStock,
    OutOfStock,
    Preorder,
    Backorder,
}

impl Availability {
    pub fn name(&self) -> &'static str {
        match self {
            Availability::Unspecified => "AVAILABILITY_UNSPECIFIED",
            Availability::InStock => "IN_STOCK",
            Availability::OutOfStock => "OUT_OF_STOCK",
            Availability::Preorder => "PREORDER",
            Availability::Backorder => "BACKORDER",
        }
    }

    fn from_name(name: &str) -> Availability {
        match name {
            "IN_STOCK" => Availability::InStock,
            "OUT_OF_STOCK" => Availability::OutOfStock,
            "PREORDER" => Availability::Preorder,
            "BACKORDER" => Availability::Backorder,
            _ => Availability::Unspecified,
        }
    }

    fn from_code(code: u64) -> Availability {
        match code {
            1 => Availability::InStock,
            2 => Availability::OutOfStock,
            3 => Availability::Preorder,
            4 => Availability::Backorder,
            _ => Availability::Unspecified,
        }
    }
}

impl Serialize for Availability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AvailabilityVisitor;

        impl<'de> serde::de::Visitor<'de> for AvailabilityVisitor {
            type Value = Availability;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an availability name or numeric code")
            }

            fn visit_str<E>(self, value: &str) -> Result<Availability, E>
            where
                E: serde::de::Error,
            {
                Ok(Availability::from_name(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Availability, E>
            where
                E: serde::de::Error,
            {
                Ok(Availability::from_code(value))
            }
        }

        deserializer.deserialize_any(AvailabilityVisitor)
    }
}

/// Pulls the message out of the Google error envelope
/// `{"error": {"message": ...}}`, if the body is shaped that way.
fn extract_api_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn availability_decodes_from_name() {
        let a: Availability = serde_json::from_value(json!("IN_STOCK")).unwrap();
        assert_eq!(a, Availability::InStock);
        let a: Availability = serde_json::from_value(json!("BACKORDER")).unwrap();
        assert_eq!(a, Availability::Backorder);
    }

    #[test]
    fn availability_decodes_from_numeric_code() {
        let a: Availability = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(a, Availability::OutOfStock);
    }

    #[test]
    fn unknown_availability_collapses_to_unspecified() {
        let a: Availability = serde_json::from_value(json!("DISCONTINUED")).unwrap();
        assert_eq!(a, Availability::Unspecified);
        let a: Availability = serde_json::from_value(json!(99)).unwrap();
        assert_eq!(a, Availability::Unspecified);
    }

    #[test]
    fn availability_serializes_as_name() {
        assert_eq!(
            serde_json::to_value(Availability::InStock).unwrap(),
            json!("IN_STOCK")
        );
    }

    #[test]
    fn empty_price_info_serializes_as_empty_object() {
        assert_eq!(
            serde_json::to_value(PriceInfo::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn search_result_decodes_proto_json() {
        let result: SearchResult = serde_json::from_value(json!({
            "id": "p1",
            "product": {
                "title": "Queen Mattress",
                "priceInfo": {"price": 199.99, "currencyCode": "USD"},
                "availability": "IN_STOCK"
            }
        }))
        .unwrap();

        assert_eq!(result.id, "p1");
        assert_eq!(result.product.title, "Queen Mattress");
        assert_eq!(
            result.product.price_info,
            Some(PriceInfo {
                price: Some(199.99),
                currency_code: Some("USD".to_string()),
            })
        );
        assert_eq!(result.product.availability, Availability::InStock);
    }

    #[test]
    fn search_result_decodes_without_price_info() {
        let result: SearchResult = serde_json::from_value(json!({
            "id": "p2",
            "product": {"title": "Foam Pillow", "availability": "OUT_OF_STOCK"}
        }))
        .unwrap();

        assert!(result.product.price_info.is_none());
    }

    #[test]
    fn missing_results_key_decodes_as_empty() {
        let body: SearchResponseBody = serde_json::from_value(json!({})).unwrap();
        assert!(body.results.is_empty());
    }

    #[test]
    fn api_message_extracted_from_error_envelope() {
        let body = json!({
            "error": {"code": 400, "message": "Invalid placement", "status": "INVALID_ARGUMENT"}
        })
        .to_string();
        assert_eq!(
            extract_api_message(&body),
            Some("Invalid placement".to_string())
        );
    }

    #[test]
    fn api_message_absent_for_unshaped_body() {
        assert_eq!(extract_api_message("upstream exploded"), None);
        assert_eq!(extract_api_message("{\"detail\": \"nope\"}"), None);
    }
}
