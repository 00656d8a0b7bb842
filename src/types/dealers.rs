use serde::Serialize;
use serde_json::Value;

pub const NEUTRAL_SENTIMENT: &str = "neutral";

/// Logical outcome carried in the `status` field of every dealer response.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DealerResponse {
    Dealers { status: u16, dealers: Option<Value> },
    Dealer { status: u16, dealer: Option<Value> },
    Reviews { status: u16, reviews: Vec<Value> },
    Posted { status: u16 },
    Failure { status: u16, message: &'static str },
}

impl DealerResponse {
    pub fn bad_request() -> Self {
        Self::Failure {
            status: 400,
            message: "Bad Request",
        }
    }

    pub fn unauthorized() -> Self {
        Self::Failure {
            status: 403,
            message: "Unauthorized",
        }
    }

    pub fn posting_failed() -> Self {
        Self::Failure {
            status: 401,
            message: "Error in posting review",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_dealer_fetch_serializes_null() {
        let body = serde_json::to_value(DealerResponse::Dealers {
            status: 200,
            dealers: None,
        })
        .unwrap();
        assert_eq!(body, json!({"status": 200, "dealers": null}));
    }

    #[test]
    fn failures_carry_message() {
        let body = serde_json::to_value(DealerResponse::unauthorized()).unwrap();
        assert_eq!(body, json!({"status": 403, "message": "Unauthorized"}));
    }
}
