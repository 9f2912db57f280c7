/*!
Service errors.

Failures to carry out a validation at all. Problems with the address itself are
[`AddressError`](crate::AddressError) values, not errors.
*/
use crate::{config::ConfigError, normalizer::Violation};

pub use reqwest::Error as Http;
pub use serde_json::Error as Json;
pub use url::ParseError as Url;
pub use validator::ValidationErrors as Input;

/// Status reported for replies that could not be interpreted.
pub const BAD_GATEWAY: u16 = 502;
/// Status reported when the service did not answer in time.
pub const GATEWAY_TIMEOUT: u16 = 504;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered with a non-success status.
    #[error("Failed to validate address: upstream responded with status {status}")]
    UpstreamRejected { status: u16 },
    /// The service answered 2xx with a body of unexpected shape.
    #[error("Unprocessable response: {}", summarize(.0))]
    UpstreamMalformed(Vec<Violation>),
    #[error("Address validation timed out")]
    Timeout,
    /// The caller's addresses were rejected before any request was made.
    #[error("Invalid addresses: {0}")]
    InputInvalid(#[from] Input),
    #[error("{0}")]
    Http(#[source] Http),
    #[error("{0}")]
    Url(#[from] Url),
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl From<Http> for Error {
    fn from(err: Http) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(err)
        }
    }
}

impl From<Json> for Error {
    fn from(err: Json) -> Self {
        Error::UpstreamMalformed(vec![Violation {
            path: String::new(),
            kind: crate::normalizer::ViolationKind::Undecodable(err.to_string()),
        }])
    }
}

impl Error {
    /// HTTP status a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match *self {
            Error::UpstreamRejected { status } => status,
            Error::UpstreamMalformed(_) | Error::Http(_) => BAD_GATEWAY,
            Error::Timeout => GATEWAY_TIMEOUT,
            Error::InputInvalid(_) => 400,
            Error::Url(_) | Error::Config(_) => 500,
        }
    }

    /// Whether the validation service, rather than the caller, is at fault.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            *self,
            Error::UpstreamRejected { .. }
                | Error::UpstreamMalformed(_)
                | Error::Timeout
                | Error::Http(_)
        )
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
