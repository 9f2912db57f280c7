use crate::{
    normalizer::{self, Violation, ViolationKind},
    Address,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Confirmation level of a component the service could verify.
pub const CONFIRMED: &str = "CONFIRMED";

/// The part of an address validation reply the engine works with.
///
/// See [validateAddress response](https://developers.google.com/maps/documentation/address-validation/reference/rest/v1/TopLevel/validateAddress#response-body).
/// Untrusted JSON goes through [`ProcessableResponse::from_value`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProcessableResponse {
    pub result: ValidationResult,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub verdict: Verdict,
    pub address: ValidatedAddress,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_unconfirmed_components: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAddress {
    pub postal_address: PostalAddress,
    pub address_components: Vec<AddressComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_component_types: Option<Vec<String>>,
}

/// The corrected address as the service would write it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    /// Zip code, possibly in ZIP+4 form.
    pub postal_code: String,
    /// State.
    pub administrative_area: String,
    /// City.
    pub locality: String,
    pub address_lines: Vec<String>,
}

/// One parsed piece of the address, e.g. the street number.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponent {
    pub component_name: ComponentName,
    /// `street_number`, `route`, `subpremise`, `locality`, ...
    pub component_type: String,
    /// `CONFIRMED`, `UNCONFIRMED_BUT_PLAUSIBLE`, `UNCONFIRMED_AND_SUSPICIOUS`, ...
    pub confirmation_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ComponentName {
    pub text: String,
}

impl AddressComponent {
    pub fn new(text: impl Into<String>, component_type: &str, confirmation_level: &str) -> Self {
        Self {
            component_name: ComponentName { text: text.into() },
            component_type: component_type.to_string(),
            confirmation_level: confirmation_level.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.component_name.text
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmation_level == CONFIRMED
    }
}

impl ProcessableResponse {
    /// Checks the shape of an untrusted reply and decodes it.
    pub fn from_value(value: Value) -> Result<Self, Vec<Violation>> {
        normalizer::check(&value)?;
        serde_json::from_value(value).map_err(|err| {
            vec![Violation {
                path: String::new(),
                kind: ViolationKind::Undecodable(err.to_string()),
            }]
        })
    }

    /// A reply confirming every component of `address` exactly as entered.
    ///
    /// The first word of `street_line1` is taken as the street number, the rest as the route.
    pub fn confirmed(address: &Address) -> Self {
        let line = address.street_line1.as_str();
        let (number, route) = line.split_once(' ').unwrap_or(("", line));

        let mut address_lines = vec![address.street_line1.clone()];
        let mut address_components = vec![
            AddressComponent::new(number, "street_number", CONFIRMED),
            AddressComponent::new(route, "route", CONFIRMED),
            AddressComponent::new(address.city.clone(), "locality", CONFIRMED),
            AddressComponent::new(
                address.state.clone(),
                "administrative_area_level_1",
                CONFIRMED,
            ),
            AddressComponent::new(address.zip.clone(), "postal_code", CONFIRMED),
        ];

        if let Some(line) = address.street_line2() {
            address_lines.push(line.to_string());
            address_components.push(AddressComponent::new(line, "subpremise", CONFIRMED));
        }

        Self {
            result: ValidationResult {
                verdict: Verdict {
                    has_unconfirmed_components: Some(false),
                },
                address: ValidatedAddress {
                    postal_address: PostalAddress {
                        postal_code: address.zip.clone(),
                        administrative_area: address.state.clone(),
                        locality: address.city.clone(),
                        address_lines,
                    },
                    address_components,
                    missing_component_types: None,
                },
            },
        }
    }

    pub fn has_unconfirmed_components(&self) -> bool {
        self.result.verdict.has_unconfirmed_components == Some(true)
    }

    pub fn postal_address(&self) -> &PostalAddress {
        &self.result.address.postal_address
    }

    pub fn components(&self) -> &[AddressComponent] {
        &self.result.address.address_components
    }

    /// First component of the given type.
    pub fn component(&self, component_type: &str) -> Option<&AddressComponent> {
        self.components()
            .iter()
            .find(|component| component.component_type == component_type)
    }

    /// Whether the service reported a component of this type as missing.
    pub fn is_missing(&self, component_type: &str) -> bool {
        self.result
            .address
            .missing_component_types
            .as_ref()
            .map_or(false, |types| types.iter().any(|t| t == component_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_checked_value() {
        let value = json!({
            "result": {
                "verdict": {
                    "inputGranularity": "SUB_PREMISE",
                    "hasUnconfirmedComponents": true
                },
                "address": {
                    "formattedAddress": "1600 Amphitheatre Pkwy, Mountain View, CA 94043-1351, USA",
                    "postalAddress": {
                        "regionCode": "US",
                        "postalCode": "94043-1351",
                        "administrativeArea": "CA",
                        "locality": "Mountain View",
                        "addressLines": ["1600 Amphitheatre Pkwy"]
                    },
                    "addressComponents": [
                        {
                            "componentName": { "text": "1600" },
                            "componentType": "street_number",
                            "confirmationLevel": "UNCONFIRMED_BUT_PLAUSIBLE"
                        }
                    ],
                    "missingComponentTypes": ["subpremise"]
                }
            }
        });

        let response = ProcessableResponse::from_value(value).unwrap();
        assert!(response.has_unconfirmed_components());
        assert!(response.is_missing("subpremise"));
        assert!(!response.is_missing("route"));
        assert_eq!("94043-1351", response.postal_address().postal_code);
        let number = response.component("street_number").unwrap();
        assert_eq!("1600", number.text());
        assert!(!number.is_confirmed());
        assert!(response.component("route").is_none());
    }

    #[test]
    fn rejects_unchecked_value() {
        let violations = ProcessableResponse::from_value(json!({})).unwrap_err();
        assert_eq!(
            vec![Violation {
                path: "result".into(),
                kind: ViolationKind::Missing,
            }],
            violations
        );
    }

    #[test]
    fn confirmed_response_is_processable() {
        let address = Address::new(
            "1600 Amphitheatre Pkwy",
            Some("Suite 100".into()),
            "Mountain View",
            "CA",
            "94043",
        );
        let response = ProcessableResponse::confirmed(&address);
        let value = serde_json::to_value(&response).unwrap();
        assert!(normalizer::is_processable_response(&value));
        assert_eq!(
            "Amphitheatre Pkwy",
            response.component("route").unwrap().text()
        );
        assert_eq!(
            "Suite 100",
            response.component("subpremise").unwrap().text()
        );
        assert!(!response.has_unconfirmed_components());
    }
}
