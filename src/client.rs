use crate::{
    error::Error,
    provider::{google, Provider},
    response::ProcessableResponse,
    synthesizer, Address, AddressError, AddressFormName, Config, ValidateAddressesParams,
};
use reqwest::header::ACCEPT;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;
use validator::Validate;

/// Address validation client.
#[derive(Debug, Clone)]
pub struct Client<P = google::AddressValidation> {
    /// Address validation provider.
    pub provider: P,

    pub http_client: reqwest::Client,

    config: Config,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateAddressRequest<'a> {
    address: PostalAddressInput<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostalAddressInput<'a> {
    region_code: &'a str,
    address_lines: Vec<&'a str>,
}

impl Client<google::AddressValidation> {
    /// Constructs a client for the Google Address Validation API.
    pub fn google(config: Config) -> Result<Self, Error> {
        Self::new(google::AddressValidation, config)
    }

    /// Constructs a Google client from `GOOGLE_MAPS_API_KEY` and friends.
    pub fn from_env() -> Result<Self, Error> {
        Self::google(Config::from_env()?)
    }
}

impl<P: Provider> Client<P> {
    /// Creates a client with its own HTTP client, bounded by `config.timeout`.
    ///
    /// # Examples
    ///
    /// ```
    /// use address_validation::{provider::Endpoint, Client, Config};
    ///
    /// let provider = Endpoint::parse("http://127.0.0.1:8080/v1:validateAddress").unwrap();
    /// let client = Client::new(provider, Config::new("API_KEY")).unwrap();
    /// ```
    pub fn new(provider: P, config: Config) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Http)?;
        Ok(Self::with_http_client(provider, config, http_client))
    }

    /// Creates a client sharing an existing HTTP client.
    ///
    /// `config.timeout` is not applied; configure it on `http_client`.
    pub fn with_http_client(provider: P, config: Config, http_client: reqwest::Client) -> Self {
        Client {
            provider,
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn validation_url(&self) -> Url {
        let mut url = self.provider.validation_uri().clone();
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        url
    }

    /// Posts one address to the service and checks the shape of the reply.
    ///
    /// Errors are:
    ///
    /// - Error::UpstreamRejected if the service answers with a non-success status
    /// - Error::UpstreamMalformed if the body is not JSON or not a processable response
    /// - Error::Timeout if the service does not answer within the configured timeout
    /// - Error::Http for any other transport failure
    pub async fn request_validation(&self, address: &Address) -> Result<ProcessableResponse, Error> {
        let request = ValidateAddressRequest {
            address: PostalAddressInput {
                region_code: self.provider.region_code(),
                address_lines: address.address_lines(),
            },
        };

        let response = self
            .http_client
            .post(self.validation_url())
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "address validation rejected");
            return Err(Error::UpstreamRejected {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;

        ProcessableResponse::from_value(value).map_err(|violations| {
            warn!(
                violations = violations.len(),
                first = ?violations.first(),
                "unprocessable address validation response"
            );
            Error::UpstreamMalformed(violations)
        })
    }

    /// Validates a single address, returning the errors for its form.
    pub async fn validate_address(
        &self,
        address: &Address,
        form: AddressFormName,
    ) -> Result<Vec<AddressError>, Error> {
        debug!(%form, "validating address");
        let response = self.request_validation(address).await?;
        let errors = synthesizer::synthesize(address, &response, form);
        debug!(%form, errors = errors.len(), "address validated");
        Ok(errors)
    }

    async fn validate_optional_address(
        &self,
        address: Option<&Address>,
        form: AddressFormName,
    ) -> Result<Vec<AddressError>, Error> {
        match address {
            Some(address) => self.validate_address(address, form).await,
            None => Ok(Vec::new()),
        }
    }

    /// Validates home, mailing and previous address concurrently.
    ///
    /// Errors come back ordered home, mailing, previous whatever order the replies arrive in.
    /// An empty list means every address was confirmed as entered. Any failure of any request
    /// fails the whole batch, and invalid input fails before a request is made.
    pub async fn validate_addresses(
        &self,
        params: &ValidateAddressesParams,
    ) -> Result<Vec<AddressError>, Error> {
        params.validate()?;

        let (home, mailing, previous) = tokio::try_join!(
            self.validate_address(&params.home_address, AddressFormName::HomeAddress),
            self.validate_optional_address(
                params.mailing_address.as_ref(),
                AddressFormName::MailingAddress
            ),
            self.validate_optional_address(
                params.previous_address.as_ref(),
                AddressFormName::PreviousAddress
            ),
        )?;

        Ok(home.into_iter().chain(mailing).chain(previous).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Endpoint;
    use std::time::Duration;

    fn client() -> Client<Endpoint> {
        Client::new(
            Endpoint::parse("http://example.com/v1:validateAddress").unwrap(),
            Config::new("foo"),
        )
        .unwrap()
    }

    #[test]
    fn validation_url_carries_key() {
        assert_eq!(
            "http://example.com/v1:validateAddress?key=foo",
            client().validation_url().as_str()
        );
    }

    #[test]
    fn google_validation_url() {
        let client = Client::google(Config::new("a key")).unwrap();
        assert_eq!(
            "https://addressvalidation.googleapis.com/v1:validateAddress?key=a+key",
            client.validation_url().as_str()
        );
    }

    #[test]
    fn keeps_config() {
        let config = Config::new("foo").with_timeout(Duration::from_secs(1));
        let client = Client::new(
            Endpoint::parse("http://example.com/v1:validateAddress").unwrap(),
            config.clone(),
        )
        .unwrap();
        assert_eq!(&config, client.config());
    }

    #[test]
    fn request_body_shape() {
        let address = Address::new(
            "1600 Amphitheatre Pkwy",
            Some("Suite 100".into()),
            "Mountain View",
            "CA",
            "94043",
        );
        let request = ValidateAddressRequest {
            address: PostalAddressInput {
                region_code: "US",
                address_lines: address.address_lines(),
            },
        };
        assert_eq!(
            serde_json::json!({
                "address": {
                    "regionCode": "US",
                    "addressLines": [
                        "1600 Amphitheatre Pkwy",
                        "Suite 100",
                        "Mountain View",
                        "CA",
                        "94043"
                    ]
                }
            }),
            serde_json::to_value(&request).unwrap()
        );
    }
}
