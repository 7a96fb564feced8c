use serde::{Deserialize, Serialize};

use crate::retail::{Availability, PriceInfo, SearchResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub visitor_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    /// Always present; an empty object when the product carries no price.
    pub price_info: PriceInfo,
    pub availability: Availability,
}

impl From<SearchResult> for SearchResultItem {
    fn from(result: SearchResult) -> Self {
        let product = result.product;
        SearchResultItem {
            id: result.id,
            title: product.title,
            price_info: product.price_info.unwrap_or_default(),
            availability: product.availability,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
        }
    }
}
