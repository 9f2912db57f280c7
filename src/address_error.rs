/*!
Problems found with an address that need the registrant's attention.

These are ordinary values returned from a successful validation, never `Err`s.
*/
use crate::{AddressField, AddressFormName};
use serde::{Deserialize, Serialize};

/// A field value and whether it needs a second look.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedField {
    pub value: String,
    pub has_issue: bool,
}

impl ReviewedField {
    pub fn new(value: impl Into<String>, has_issue: bool) -> Self {
        Self {
            value: value.into(),
            has_issue,
        }
    }
}

/// Field by field review of one address.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedAddress {
    pub street_line1: ReviewedField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_line2: Option<ReviewedField>,
    pub city: ReviewedField,
    pub state: ReviewedField,
    pub zip: ReviewedField,
}

impl ReviewedAddress {
    pub fn field(&self, field: AddressField) -> Option<&ReviewedField> {
        match field {
            AddressField::StreetLine1 => Some(&self.street_line1),
            AddressField::StreetLine2 => self.street_line2.as_ref(),
            AddressField::City => Some(&self.city),
            AddressField::State => Some(&self.state),
            AddressField::Zip => Some(&self.zip),
        }
    }

    /// Present fields in display order: street lines, city, state, zip.
    pub fn fields(&self) -> impl Iterator<Item = (AddressField, &ReviewedField)> {
        [
            AddressField::StreetLine1,
            AddressField::StreetLine2,
            AddressField::City,
            AddressField::State,
            AddressField::Zip,
        ]
        .into_iter()
        .filter_map(move |field| self.field(field).map(|reviewed| (field, reviewed)))
    }

    /// Fields flagged with an issue.
    pub fn fields_with_issue(&self) -> impl Iterator<Item = AddressField> + '_ {
        self.fields()
            .filter(|(_, reviewed)| reviewed.has_issue)
            .map(|(field, _)| field)
    }

    pub fn has_issue(&self) -> bool {
        self.fields_with_issue().next().is_some()
    }
}

/// Discriminant of [`AddressError`].
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressErrorType {
    UnconfirmedComponents,
    ReviewRecommendedAddress,
    MissingSubpremise,
    ValidationFailed,
}

/// Address errors, tagged with `type` on the wire.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum AddressError {
    /// Some components could not be confirmed to exist.
    #[serde(rename_all = "camelCase")]
    UnconfirmedComponents {
        form: AddressFormName,
        unconfirmed_address_components: ReviewedAddress,
    },
    /// The service recommends a corrected spelling of the address.
    #[serde(rename_all = "camelCase")]
    ReviewRecommendedAddress {
        form: AddressFormName,
        entered_address: ReviewedAddress,
        recommended_address: ReviewedAddress,
    },
    /// An apartment, suite or unit number appears to be missing.
    MissingSubpremise { form: AddressFormName },
    /// Validation itself could not be carried out.
    ValidationFailed,
}

impl AddressError {
    pub fn error_type(&self) -> AddressErrorType {
        match self {
            AddressError::UnconfirmedComponents { .. } => AddressErrorType::UnconfirmedComponents,
            AddressError::ReviewRecommendedAddress { .. } => {
                AddressErrorType::ReviewRecommendedAddress
            }
            AddressError::MissingSubpremise { .. } => AddressErrorType::MissingSubpremise,
            AddressError::ValidationFailed => AddressErrorType::ValidationFailed,
        }
    }

    /// The form the error belongs to. `ValidationFailed` concerns all of them.
    pub fn form(&self) -> Option<AddressFormName> {
        match *self {
            AddressError::UnconfirmedComponents { form, .. }
            | AddressError::ReviewRecommendedAddress { form, .. }
            | AddressError::MissingSubpremise { form } => Some(form),
            AddressError::ValidationFailed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reviewed(city_has_issue: bool) -> ReviewedAddress {
        ReviewedAddress {
            street_line1: ReviewedField::new("1600 Amphitheatre Pkwy", false),
            street_line2: None,
            city: ReviewedField::new("Montan View", city_has_issue),
            state: ReviewedField::new("CA", false),
            zip: ReviewedField::new("94043", false),
        }
    }

    #[test]
    fn serializes_with_type_tag() {
        let error = AddressError::MissingSubpremise {
            form: AddressFormName::MailingAddress,
        };
        assert_eq!(
            json!({ "type": "MissingSubpremise", "form": "mailingAddress" }),
            serde_json::to_value(&error).unwrap()
        );
        assert_eq!(
            json!({ "type": "ValidationFailed" }),
            serde_json::to_value(AddressError::ValidationFailed).unwrap()
        );
    }

    #[test]
    fn serializes_reviewed_fields_in_camel_case() {
        let error = AddressError::UnconfirmedComponents {
            form: AddressFormName::HomeAddress,
            unconfirmed_address_components: reviewed(true),
        };
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!("UnconfirmedComponents", value["type"]);
        assert_eq!("homeAddress", value["form"]);
        assert_eq!(
            json!({ "value": "Montan View", "hasIssue": true }),
            value["unconfirmedAddressComponents"]["city"]
        );
        assert!(value["unconfirmedAddressComponents"]
            .get("streetLine2")
            .is_none());

        let decoded: AddressError = serde_json::from_value(value).unwrap();
        assert_eq!(error, decoded);
    }

    #[test]
    fn lists_fields_with_issue() {
        assert_eq!(
            vec![AddressField::City],
            reviewed(true).fields_with_issue().collect::<Vec<_>>()
        );
        assert!(!reviewed(false).has_issue());
        assert_eq!(4, reviewed(false).fields().count());
    }
}
