/*!
Turns a checked validation reply into the address errors shown to the registrant.
*/
use crate::{
    address_error::{AddressError, ReviewedAddress, ReviewedField},
    classifier::{self, SUBPREMISE},
    response::ProcessableResponse,
    Address, AddressFormName,
};

/// Errors for one address form.
///
/// Unconfirmed components take precedence over everything else. Otherwise a recommended
/// correction and a missing subpremise are reported independently, in that order.
pub fn synthesize(
    address: &Address,
    response: &ProcessableResponse,
    form: AddressFormName,
) -> Vec<AddressError> {
    if should_create_unconfirmed_components_error(response) {
        return vec![unconfirmed_components_error(address, response, form)];
    }

    let mut errors = Vec::new();

    if should_create_review_recommended_address_error(address, response) {
        errors.push(review_recommended_address_error(address, response, form));
    }

    if should_create_missing_subpremise_error(response) {
        errors.push(AddressError::MissingSubpremise { form });
    }

    errors
}

pub fn should_create_unconfirmed_components_error(response: &ProcessableResponse) -> bool {
    response.has_unconfirmed_components()
}

pub fn should_create_missing_subpremise_error(response: &ProcessableResponse) -> bool {
    response.is_missing(SUBPREMISE)
}

/// `true` when any field of the recommended address differs from what was entered.
pub fn should_create_review_recommended_address_error(
    address: &Address,
    response: &ProcessableResponse,
) -> bool {
    let recommended = recommended_address(response);
    address.street_line1 != recommended.street_line1
        || address.street_line2().unwrap_or_default()
            != recommended.street_line2().unwrap_or_default()
        || address.city != recommended.city
        || address.state != recommended.state
        || address.zip != recommended.zip
}

pub fn unconfirmed_components_error(
    address: &Address,
    response: &ProcessableResponse,
    form: AddressFormName,
) -> AddressError {
    AddressError::UnconfirmedComponents {
        form,
        unconfirmed_address_components: classifier::classify(address, response),
    }
}

pub fn review_recommended_address_error(
    address: &Address,
    response: &ProcessableResponse,
    form: AddressFormName,
) -> AddressError {
    let recommended = recommended_address(response);
    AddressError::ReviewRecommendedAddress {
        form,
        entered_address: compare(address, &recommended),
        recommended_address: compare(&recommended, address),
    }
}

/// The address as the service would write it, in the registrant's field layout.
///
/// ZIP+4 postal codes are cut to five digits.
pub fn recommended_address(response: &ProcessableResponse) -> Address {
    let postal = response.postal_address();
    let mut lines = postal.address_lines.iter();

    Address {
        street_line1: lines.next().cloned().unwrap_or_default(),
        street_line2: lines.next().filter(|line| !line.is_empty()).cloned(),
        city: postal.locality.clone(),
        state: postal.administrative_area.clone(),
        zip: postal.postal_code.chars().take(5).collect(),
    }
}

// Reviews `a` field by field, flagging what differs from `b`.
fn compare(a: &Address, b: &Address) -> ReviewedAddress {
    ReviewedAddress {
        street_line1: ReviewedField::new(
            a.street_line1.clone(),
            a.street_line1 != b.street_line1,
        ),
        street_line2: a
            .street_line2()
            .map(|line| ReviewedField::new(line, Some(line) != b.street_line2())),
        city: ReviewedField::new(a.city.clone(), a.city != b.city),
        state: ReviewedField::new(a.state.clone(), a.state != b.state),
        zip: ReviewedField::new(a.zip.clone(), a.zip != b.zip),
    }
}
