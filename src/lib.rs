/*!
# Address validation & correction for voter registration using async / await

## Legal

Dual-licensed under `MIT` or the [UNLICENSE](http://unlicense.org/).

## Features

Sends the home, mailing and previous address a registrant entered to the
[Google Address Validation API](https://developers.google.com/maps/documentation/address-validation)
concurrently, and turns the replies into a flat, ordered list of [`AddressError`]s:

- `UnconfirmedComponents`: some part of the address could not be confirmed to exist.
- `ReviewRecommendedAddress`: the service suggests a corrected spelling.
- `MissingSubpremise`: an apartment, suite or unit number seems to be missing.
- `ValidationFailed`: the service could not be reached; the registrant reviews and continues.

An empty list means every address was confirmed as entered.

The [`confirmation`] module walks the registrant through the errors one at a time and
folds each choice back into the [`form::AddressesForm`] model.

Using [reqwest](https://crates.io/crates/reqwest) for the HTTP client and
[tracing](https://crates.io/crates/tracing) for diagnostics. No subscriber is installed.

## Usage

Add dependency to Cargo.toml:

```toml
[dependencies]
address-validation = "0.1"
```

### Use case: validate addresses from an API route

```rust,no_run
use address_validation::{
    confirmation::ConfirmationFlow, form::AddressesForm, handler, Address, Client,
    ValidateAddressesParams,
};

# async fn run() -> Result<(), address_validation::error::Error> {
// Reads GOOGLE_MAPS_API_KEY and ADDRESS_VALIDATION_TIMEOUT_SECS.
let client = Client::from_env()?;

let mut params = ValidateAddressesParams::new(Address::new(
    "1600 Amphitheatre Pkwy",
    None,
    "Mountain View",
    "CA",
    "94043",
));
params.mailing_address = Some(Address::new(
    "PO Box 1234",
    None,
    "Mountain View",
    "CA",
    "94042",
));

let errors = handler::errors_or_validation_failed(client.validate_addresses(&params).await);

match ConfirmationFlow::new(errors, AddressesForm::from_params(&params)) {
    None => println!("all addresses confirmed"),
    Some(flow) => println!("{} of {}: {:?}", flow.error_number(), flow.error_count(), flow.view()),
}
# Ok(())
# }
```

### Use case: a different endpoint

Any service speaking the same protocol can be used through [`provider::Endpoint`]:

```rust
use address_validation::{provider::Endpoint, Client, Config};
use std::time::Duration;

let provider = Endpoint::parse("http://localhost:8080/v1:validateAddress").unwrap();
let config = Config::new("API_KEY").with_timeout(Duration::from_secs(3));
let client = Client::new(provider, config).unwrap();
```
*/
#[macro_use]
extern crate lazy_static;

mod address;
mod address_error;
pub mod classifier;
mod client;
mod config;
pub mod confirmation;
pub mod error;
pub mod form;
pub mod handler;
pub mod normalizer;
pub mod provider;
mod response;
pub mod synthesizer;

pub use address::{Address, AddressField, AddressFormName, ValidateAddressesParams};
pub use address_error::{
    AddressError, AddressErrorType, ReviewedAddress, ReviewedField,
};
pub use client::Client;
pub use config::{Config, ConfigError, API_KEY_VAR, TIMEOUT_VAR};
pub use error::Error;
pub use provider::Provider;
pub use response::{
    AddressComponent, ComponentName, PostalAddress, ProcessableResponse, ValidatedAddress,
    ValidationResult, Verdict, CONFIRMED,
};

/// Client for the Google Address Validation API.
pub type GoogleClient = Client<provider::google::AddressValidation>;
