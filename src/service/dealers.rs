use futures::future::join_all;
use serde_json::Value;
use tracing::{error, warn};

use crate::api::RestApi;
use crate::error::PortalError;
use crate::types::dealers::{DealerResponse, NEUTRAL_SENTIMENT};

/// Listing of every dealership.
pub const ALL_STATES: &str = "All";

/// Dealer and review operations proxied to the backend service.
#[derive(Clone)]
pub struct DealerService {
    api: RestApi,
}

impl DealerService {
    pub fn new(api: RestApi) -> Self {
        Self { api }
    }

    pub async fn list_dealerships(&self, state: &str) -> DealerResponse {
        if !is_path_safe(state) {
            return DealerResponse::bad_request();
        }
        let endpoint = dealers_endpoint(state);
        let dealers = self.api.get_request::<&str, &str>(&endpoint, &[]).await;
        DealerResponse::Dealers {
            status: 200,
            dealers,
        }
    }

    pub async fn dealer_details(&self, dealer_id: Option<&str>) -> DealerResponse {
        let Some(id) = dealer_id.and_then(parse_dealer_id) else {
            return DealerResponse::bad_request();
        };
        let endpoint = format!("/fetchDealer/{id}");
        let dealer = self.api.get_request::<&str, &str>(&endpoint, &[]).await;
        DealerResponse::Dealer {
            status: 200,
            dealer,
        }
    }

    /// Reviews for one dealer, each tagged with a `sentiment` label.
    pub async fn dealer_reviews(&self, dealer_id: Option<&str>) -> DealerResponse {
        let Some(id) = dealer_id.and_then(parse_dealer_id) else {
            return DealerResponse::bad_request();
        };
        let endpoint = format!("/fetchReviews/dealer/{id}");

        let reviews = match self.api.get_request::<&str, &str>(&endpoint, &[]).await {
            Some(Value::Array(reviews)) => reviews,
            Some(other) => {
                warn!(dealer_id = id, body = %other, "review fetch returned a non-list body");
                Vec::new()
            }
            None => {
                warn!(dealer_id = id, "review fetch failed; returning no reviews");
                Vec::new()
            }
        };

        let reviews = join_all(reviews.into_iter().map(|review| self.annotate(review))).await;
        DealerResponse::Reviews {
            status: 200,
            reviews,
        }
    }

    /// Forward a review for an authenticated caller.
    ///
    /// The caller is checked before the body is parsed, so anonymous
    /// requests get the 403 body whatever they send.
    pub async fn add_review(
        &self,
        authenticated: bool,
        body: &[u8],
    ) -> Result<DealerResponse, PortalError> {
        if !authenticated {
            return Ok(DealerResponse::unauthorized());
        }
        let review: Value = serde_json::from_slice(body)?;
        match self.api.post_review(&review).await {
            Ok(_) => Ok(DealerResponse::Posted { status: 200 }),
            Err(e) => {
                error!(error = %e, "Error posting review");
                Ok(DealerResponse::posting_failed())
            }
        }
    }

    async fn annotate(&self, mut review: Value) -> Value {
        let Some(fields) = review.as_object() else {
            return review;
        };
        let text = fields
            .get("review")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let sentiment = self
            .api
            .analyze_review_sentiments(&text)
            .await
            .and_then(|resp| resp.get("sentiment").cloned())
            .unwrap_or_else(|| Value::String(NEUTRAL_SENTIMENT.to_string()));

        if let Some(fields) = review.as_object_mut() {
            fields.insert("sentiment".to_string(), sentiment);
        }
        review
    }
}

pub fn dealers_endpoint(state: &str) -> String {
    if state == ALL_STATES {
        "/fetchDealers".to_string()
    } else {
        format!("/fetchDealers/{state}")
    }
}

/// Dealer ids are positive integers upstream; anything else, `0` included,
/// counts as missing.
pub fn parse_dealer_id(id: &str) -> Option<u64> {
    id.trim().parse::<u64>().ok().filter(|&n| n != 0)
}

/// A state name must stay a single path segment of the backend URL.
pub fn is_path_safe(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '?', '#', '%'])
}
