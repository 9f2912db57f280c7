/*!
Glue between an HTTP route and the [`Client`].
*/
use crate::{error::Error, provider::Provider, AddressError, Client, ValidateAddressesParams};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

pub const BAD_DATA: &str = "Bad data.";

/// Status and JSON body for the route to answer with.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(errors: &[AddressError]) -> Self {
        Self {
            status: 200,
            body: json!({ "result": { "errors": errors } }),
        }
    }

    fn message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Handles a `POST /api/validate-addresses` request body.
///
/// A body that is not valid JSON, or addresses that fail the input rules, answer 400 without
/// calling the service. Service failures answer with [`Error::status_code`].
pub async fn handle_validate_addresses<P: Provider>(client: &Client<P>, body: &[u8]) -> ApiResponse {
    let params: ValidateAddressesParams = match serde_json::from_slice(body) {
        Ok(params) => params,
        Err(err) => {
            debug!(%err, "rejected request body");
            return ApiResponse::message(400, BAD_DATA);
        }
    };

    match client.validate_addresses(&params).await {
        Ok(errors) => ApiResponse::ok(&errors),
        Err(Error::InputInvalid(err)) => {
            debug!(%err, "rejected addresses");
            ApiResponse::message(400, BAD_DATA)
        }
        Err(err) => {
            error!(%err, status = err.status_code(), "address validation failed");
            ApiResponse::message(err.status_code(), err.to_string())
        }
    }
}

/// Errors to walk the registrant through. A failed validation becomes a single
/// `ValidationFailed` so the registrant can still review and continue.
pub fn errors_or_validation_failed(result: Result<Vec<AddressError>, Error>) -> Vec<AddressError> {
    result.unwrap_or_else(|_| vec![AddressError::ValidationFailed])
}
