/*!
The registration wizard's address forms, as plain values.
*/
use crate::{Address, AddressField, AddressFormName, ValidateAddressesParams};
use serde::{Deserialize, Serialize};

/// Validity of a form field.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Validity {
    #[default]
    Valid,
    /// Submittable, but shown with a warning.
    Caution,
    Invalid,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub validity: Validity,
}

impl FieldState {
    pub fn valid(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            validity: Validity::Valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }
}

/// One address form.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressFormState {
    pub street_line1: FieldState,
    pub street_line2: FieldState,
    pub city: FieldState,
    pub state: FieldState,
    pub zip: FieldState,
}

impl AddressFormState {
    /// Fields in the order the form shows them.
    pub const FIELD_ORDER: [AddressField; 5] = [
        AddressField::StreetLine1,
        AddressField::StreetLine2,
        AddressField::City,
        AddressField::Zip,
        AddressField::State,
    ];

    pub fn from_address(address: &Address) -> Self {
        Self {
            street_line1: FieldState::valid(address.street_line1.clone()),
            street_line2: FieldState::valid(address.street_line2().unwrap_or_default()),
            city: FieldState::valid(address.city.clone()),
            state: FieldState::valid(address.state.clone()),
            zip: FieldState::valid(address.zip.clone()),
        }
    }

    /// Current values, trimmed the way the form submits them.
    pub fn to_address(&self) -> Address {
        let street_line2 = self.street_line2.value.trim();
        Address {
            street_line1: self.street_line1.value.trim().to_string(),
            street_line2: (!street_line2.is_empty()).then(|| street_line2.to_string()),
            city: self.city.value.trim().to_string(),
            state: self.state.value.trim().to_string(),
            zip: self.zip.value.trim().to_string(),
        }
    }

    pub fn field(&self, field: AddressField) -> &FieldState {
        match field {
            AddressField::StreetLine1 => &self.street_line1,
            AddressField::StreetLine2 => &self.street_line2,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Zip => &self.zip,
        }
    }

    pub fn field_mut(&mut self, field: AddressField) -> &mut FieldState {
        match field {
            AddressField::StreetLine1 => &mut self.street_line1,
            AddressField::StreetLine2 => &mut self.street_line2,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Zip => &mut self.zip,
        }
    }

    pub fn first_non_valid_field(&self) -> Option<AddressField> {
        Self::FIELD_ORDER
            .into_iter()
            .find(|field| !self.field(*field).is_valid())
    }
}

/// All address forms of the wizard. Mailing and previous address are optional.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressesForm {
    pub home_address: AddressFormState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<AddressFormState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_address: Option<AddressFormState>,
}

impl AddressesForm {
    pub fn from_params(params: &ValidateAddressesParams) -> Self {
        Self {
            home_address: AddressFormState::from_address(&params.home_address),
            mailing_address: params
                .mailing_address
                .as_ref()
                .map(AddressFormState::from_address),
            previous_address: params
                .previous_address
                .as_ref()
                .map(AddressFormState::from_address),
        }
    }

    /// The addresses to (re)submit for validation.
    pub fn to_params(&self) -> ValidateAddressesParams {
        ValidateAddressesParams {
            home_address: self.home_address.to_address(),
            mailing_address: self.mailing_address.as_ref().map(AddressFormState::to_address),
            previous_address: self
                .previous_address
                .as_ref()
                .map(AddressFormState::to_address),
        }
    }

    pub fn form(&self, name: AddressFormName) -> Option<&AddressFormState> {
        match name {
            AddressFormName::HomeAddress => Some(&self.home_address),
            AddressFormName::MailingAddress => self.mailing_address.as_ref(),
            AddressFormName::PreviousAddress => self.previous_address.as_ref(),
        }
    }

    pub fn form_mut(&mut self, name: AddressFormName) -> Option<&mut AddressFormState> {
        match name {
            AddressFormName::HomeAddress => Some(&mut self.home_address),
            AddressFormName::MailingAddress => self.mailing_address.as_mut(),
            AddressFormName::PreviousAddress => self.previous_address.as_mut(),
        }
    }

    /// The field to focus: first non-valid field of home, then mailing, then previous address.
    pub fn first_non_valid_field(&self) -> Option<(AddressFormName, AddressField)> {
        AddressFormName::ALL.into_iter().find_map(|name| {
            self.form(name)
                .and_then(AddressFormState::first_non_valid_field)
                .map(|field| (name, field))
        })
    }
}
