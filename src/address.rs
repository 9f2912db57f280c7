use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

lazy_static! {
    static ref STATE: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();
    static ref ZIP: Regex = Regex::new(r"^\d{5}$").unwrap();
}

/// A US mailing address as entered by a registrant.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// House number and street, or a PO box.
    pub street_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Apartment, suite or unit. Empty strings are treated as absent.
    pub street_line2: Option<String>,
    pub city: String,
    #[validate(regex(
        path = "STATE",
        message = "state must be a 2-letter state abbreviation."
    ))]
    /// Two letter state abbreviation.
    pub state: String,
    #[validate(regex(path = "ZIP", message = "zip must be a 5-digit zip code."))]
    /// Five digit zip code.
    pub zip: String,
}

impl Address {
    pub fn new(
        street_line1: impl Into<String>,
        street_line2: Option<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            street_line1: street_line1.into(),
            street_line2,
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    /// The second street line, if one was actually entered.
    pub fn street_line2(&self) -> Option<&str> {
        self.street_line2.as_deref().filter(|line| !line.is_empty())
    }

    /// Free-text lines sent to the validation service: street lines, city, state, zip.
    pub fn address_lines(&self) -> Vec<&str> {
        let mut lines = vec![self.street_line1.as_str()];
        if let Some(line) = self.street_line2() {
            lines.push(line);
        }
        lines.extend([self.city.as_str(), self.state.as_str(), self.zip.as_str()]);
        lines
    }
}

/// The three address forms of the registration wizard.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum AddressFormName {
    HomeAddress,
    MailingAddress,
    PreviousAddress,
}

impl AddressFormName {
    /// Forms in processing order.
    pub const ALL: [AddressFormName; 3] = [
        AddressFormName::HomeAddress,
        AddressFormName::MailingAddress,
        AddressFormName::PreviousAddress,
    ];

    pub fn as_str(&self) -> &'static str {
        use AddressFormName::*;
        match *self {
            HomeAddress => "homeAddress",
            MailingAddress => "mailingAddress",
            PreviousAddress => "previousAddress",
        }
    }
}

impl fmt::Display for AddressFormName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical fields of an address form.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AddressField {
    StreetLine1,
    StreetLine2,
    City,
    State,
    Zip,
}

impl AddressField {
    pub fn as_str(&self) -> &'static str {
        use AddressField::*;
        match *self {
            StreetLine1 => "streetLine1",
            StreetLine2 => "streetLine2",
            City => "city",
            State => "state",
            Zip => "zip",
        }
    }
}

/// Addresses submitted together from the registration wizard.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateAddressesParams {
    #[validate]
    pub home_address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub mailing_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate]
    pub previous_address: Option<Address>,
}

impl ValidateAddressesParams {
    pub fn new(home_address: Address) -> Self {
        Self {
            home_address,
            mailing_address: None,
            previous_address: None,
        }
    }

    pub fn address(&self, form: AddressFormName) -> Option<&Address> {
        match form {
            AddressFormName::HomeAddress => Some(&self.home_address),
            AddressFormName::MailingAddress => self.mailing_address.as_ref(),
            AddressFormName::PreviousAddress => self.previous_address.as_ref(),
        }
    }

    /// Present addresses, in processing order.
    pub fn forms(&self) -> impl Iterator<Item = (AddressFormName, &Address)> {
        AddressFormName::ALL
            .into_iter()
            .filter_map(move |form| self.address(form).map(|address| (form, address)))
    }
}
