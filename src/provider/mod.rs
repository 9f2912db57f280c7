/*!
Address validation providers.
*/
use url::Url;

/// An upstream address validation service.
pub trait Provider {
    /// The endpoint addresses are posted to.
    fn validation_uri(&self) -> &Url;

    /// CLDR region code sent with every address.
    ///
    /// Registrants only ever enter US addresses.
    fn region_code(&self) -> &str {
        "US"
    }
}

/// Google Maps Platform providers.
///
/// See [Address Validation API](https://developers.google.com/maps/documentation/address-validation).
pub mod google {
    use super::Provider;
    use url::Url;

    lazy_static! {
        static ref VALIDATE_ADDRESS_URI: Url =
            Url::parse("https://addressvalidation.googleapis.com/v1:validateAddress").unwrap();
    }

    /// Google Address Validation API, `v1:validateAddress`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AddressValidation;
    impl Provider for AddressValidation {
        fn validation_uri(&self) -> &Url {
            &VALIDATE_ADDRESS_URI
        }
    }
}

/// A service speaking the Google Address Validation protocol at an arbitrary url,
/// e.g. a proxy or a local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    uri: Url,
}

impl Endpoint {
    pub fn new(uri: Url) -> Self {
        Self { uri }
    }

    pub fn parse(uri: &str) -> Result<Self, url::ParseError> {
        Url::parse(uri).map(Self::new)
    }
}

impl Provider for Endpoint {
    fn validation_uri(&self) -> &Url {
        &self.uri
    }
}

#[test]
fn google_urls() {
    let prov = google::AddressValidation;
    assert_eq!("/v1:validateAddress", prov.validation_uri().path());
    assert_eq!("US", prov.region_code());
}

#[test]
fn endpoint_urls() {
    let prov = Endpoint::parse("http://127.0.0.1:8080/v1:validateAddress").unwrap();
    assert_eq!("127.0.0.1", prov.validation_uri().host_str().unwrap());
    assert!(Endpoint::parse("not a url").is_err());
}
