/*!
Decides which fields of an entered address the validation service could not confirm.
*/
use crate::{
    address_error::{ReviewedAddress, ReviewedField},
    response::{AddressComponent, ProcessableResponse},
    Address,
};

pub const STREET_NUMBER: &str = "street_number";
pub const ROUTE: &str = "route";
pub const POST_BOX: &str = "post_box";
pub const SUBPREMISE: &str = "subpremise";
pub const LOCALITY: &str = "locality";
pub const ADMINISTRATIVE_AREA_LEVEL_1: &str = "administrative_area_level_1";
pub const POSTAL_CODE: &str = "postal_code";

// Never matched against a street line by text. Street numbers and routes are judged as a
// pair, subpremises and PO boxes by type alone, the rest map to their own fields.
const IGNORED_FOR_LINE_MATCH: [&str; 10] = [
    STREET_NUMBER,
    ROUTE,
    SUBPREMISE,
    POST_BOX,
    LOCALITY,
    ADMINISTRATIVE_AREA_LEVEL_1,
    POSTAL_CODE,
    "postal_code_prefix",
    "postal_code_suffix",
    "country",
];

/// Reviews every field of the entered `address` against the components of `response`.
///
/// A field without a corresponding component is not flagged.
pub fn classify(address: &Address, response: &ProcessableResponse) -> ReviewedAddress {
    ReviewedAddress {
        street_line1: ReviewedField::new(
            address.street_line1.clone(),
            is_street_line1_unconfirmed(&address.street_line1, response),
        ),
        street_line2: address.street_line2().map(|line| {
            ReviewedField::new(line, is_street_line2_unconfirmed(line, response))
        }),
        city: ReviewedField::new(
            address.city.clone(),
            is_component_unconfirmed(LOCALITY, response),
        ),
        state: ReviewedField::new(
            address.state.clone(),
            is_component_unconfirmed(ADMINISTRATIVE_AREA_LEVEL_1, response),
        ),
        zip: ReviewedField::new(
            address.zip.clone(),
            is_component_unconfirmed(POSTAL_CODE, response),
        ),
    }
}

pub fn is_street_line1_unconfirmed(line: &str, response: &ProcessableResponse) -> bool {
    lone_street_part_is_unconfirmed(response)
        || is_component_unconfirmed(POST_BOX, response)
        || line_matches_unconfirmed_street_address(line, response)
        || line_matches_unconfirmed_component(line, response)
}

pub fn is_street_line2_unconfirmed(line: &str, response: &ProcessableResponse) -> bool {
    is_component_unconfirmed(SUBPREMISE, response)
        || line_matches_unconfirmed_street_address(line, response)
        || line_matches_unconfirmed_component(line, response)
}

/// `true` when a component of this type exists and is not confirmed.
pub fn is_component_unconfirmed(component_type: &str, response: &ProcessableResponse) -> bool {
    response
        .component(component_type)
        .map_or(false, |component| !component.is_confirmed())
}

// A street number without a route, or a route without a street number.
fn lone_street_part_is_unconfirmed(response: &ProcessableResponse) -> bool {
    let (number, route) = street_parts(response);
    match (number, route) {
        (Some(number), None) => !number.is_confirmed(),
        (None, Some(route)) => !route.is_confirmed(),
        _ => false,
    }
}

fn line_matches_unconfirmed_street_address(line: &str, response: &ProcessableResponse) -> bool {
    let (number, route) = street_parts(response);
    match (number, route) {
        (Some(number), Some(route)) => {
            (!number.is_confirmed() || !route.is_confirmed())
                && collapse_whitespace(line)
                    == collapse_whitespace(&format!("{} {}", number.text(), route.text()))
        }
        _ => false,
    }
}

fn line_matches_unconfirmed_component(line: &str, response: &ProcessableResponse) -> bool {
    response.components().iter().any(|component| {
        !component.is_confirmed()
            && !IGNORED_FOR_LINE_MATCH.contains(&component.component_type.as_str())
            && component.text() == line
    })
}

fn street_parts(
    response: &ProcessableResponse,
) -> (Option<&AddressComponent>, Option<&AddressComponent>) {
    (response.component(STREET_NUMBER), response.component(ROUTE))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{AddressComponent, CONFIRMED};

    const PLAUSIBLE: &str = "UNCONFIRMED_BUT_PLAUSIBLE";

    fn address(street_line1: &str) -> Address {
        Address::new(street_line1, None, "Mountain View", "CA", "94043")
    }

    // A reply with confirmed city, state and zip plus the given street components.
    fn response_with(address: &Address, mut street: Vec<AddressComponent>) -> ProcessableResponse {
        let mut response = ProcessableResponse::confirmed(address);
        response.result.verdict.has_unconfirmed_components = Some(true);
        street.extend(
            response
                .result
                .address
                .address_components
                .drain(..)
                .filter(|c| c.component_type != STREET_NUMBER && c.component_type != ROUTE),
        );
        response.result.address.address_components = street;
        response
    }

    #[test]
    fn flags_all_unconfirmed_components() {
        let address = Address::new(
            "123 Fake St",
            Some("Apartment 10000".into()),
            "Nowhereville",
            "AL",
            "12345",
        );
        let mut response = ProcessableResponse::confirmed(&address);
        response.result.verdict.has_unconfirmed_components = Some(true);
        for component in response.result.address.address_components.iter_mut() {
            component.confirmation_level = PLAUSIBLE.into();
        }

        let reviewed = classify(&address, &response);
        assert_eq!(5, reviewed.fields().count());
        for (field, component) in reviewed.fields() {
            assert!(component.has_issue, "{:?}", field);
        }
    }

    #[test]
    fn flags_unconfirmed_street_number_without_route() {
        let address = address("1600");
        let response = response_with(
            &address,
            vec![AddressComponent::new("1600", STREET_NUMBER, PLAUSIBLE)],
        );
        assert!(classify(&address, &response).street_line1.has_issue);
    }

    #[test]
    fn flags_unconfirmed_route_without_street_number() {
        let address = address("Amphitheatre Pkwy");
        let response = response_with(
            &address,
            vec![AddressComponent::new("Amphitheatre Pkwy", ROUTE, PLAUSIBLE)],
        );
        assert!(classify(&address, &response).street_line1.has_issue);
    }

    #[test]
    fn confirmed_lone_street_part_is_not_flagged() {
        let address = address("1600");
        let response = response_with(
            &address,
            vec![AddressComponent::new("1600", STREET_NUMBER, CONFIRMED)],
        );
        assert!(!classify(&address, &response).street_line1.has_issue);
    }

    #[test]
    fn confirmed_street_number_and_route_are_not_flagged() {
        let address = address("1600 Amphitheatre Pkwy");
        let response = response_with(
            &address,
            vec![
                AddressComponent::new("1600", STREET_NUMBER, CONFIRMED),
                AddressComponent::new("Amphitheatre Pkwy", ROUTE, CONFIRMED),
            ],
        );
        assert!(!classify(&address, &response).street_line1.has_issue);
    }

    #[test]
    fn flags_street_line_matching_partially_confirmed_street_address() {
        let address = address("1600   Amphitheatre Pkwy ");
        let response = response_with(
            &address,
            vec![
                AddressComponent::new("1600", STREET_NUMBER, PLAUSIBLE),
                AddressComponent::new("Amphitheatre Pkwy", ROUTE, CONFIRMED),
            ],
        );
        assert!(classify(&address, &response).street_line1.has_issue);

        let elsewhere = self::address("1 Infinite Loop");
        assert!(!classify(&elsewhere, &response).street_line1.has_issue);
    }

    #[test]
    fn flags_unconfirmed_po_box() {
        let address = address("PO Box 9999");
        let response = response_with(
            &address,
            vec![AddressComponent::new("PO Box 9999", POST_BOX, PLAUSIBLE)],
        );
        let reviewed = classify(&address, &response);
        assert!(reviewed.street_line1.has_issue);
        assert!(!reviewed.city.has_issue);
    }

    #[test]
    fn flags_unconfirmed_subpremise_on_street_line2() {
        let address = Address::new(
            "1600 Amphitheatre Pkwy",
            Some("Suite 100".into()),
            "Mountain View",
            "CA",
            "94043",
        );
        let mut response = ProcessableResponse::confirmed(&address);
        response.result.verdict.has_unconfirmed_components = Some(true);
        for component in response.result.address.address_components.iter_mut() {
            if component.component_type == SUBPREMISE {
                component.confirmation_level = PLAUSIBLE.into();
            }
        }

        let reviewed = classify(&address, &response);
        assert!(!reviewed.street_line1.has_issue);
        assert!(reviewed.street_line2.unwrap().has_issue);
    }

    #[test]
    fn flags_line_matching_other_unconfirmed_component() {
        let address = Address::new(
            "1600 Amphitheatre Pkwy",
            Some("Googleplex".into()),
            "Mountain View",
            "CA",
            "94043",
        );
        let mut response = ProcessableResponse::confirmed(&address);
        response
            .result
            .address
            .address_components
            .push(AddressComponent::new("Googleplex", "point_of_interest", PLAUSIBLE));

        let reviewed = classify(&address, &response);
        assert!(!reviewed.street_line1.has_issue);
        assert!(reviewed.street_line2.unwrap().has_issue);
    }

    #[test]
    fn flags_city_state_and_zip_by_their_own_components() {
        let address = address("1600 Amphitheatre Pkwy");
        let mut response = ProcessableResponse::confirmed(&address);
        for component in response.result.address.address_components.iter_mut() {
            if component.component_type == LOCALITY || component.component_type == POSTAL_CODE {
                component.confirmation_level = PLAUSIBLE.into();
            }
        }

        let reviewed = classify(&address, &response);
        assert!(reviewed.city.has_issue);
        assert!(!reviewed.state.has_issue);
        assert!(reviewed.zip.has_issue);
    }

    #[test]
    fn missing_components_are_not_flagged() {
        let address = address("1600 Amphitheatre Pkwy");
        let mut response = ProcessableResponse::confirmed(&address);
        response.result.address.address_components.clear();
        response.result.address.missing_component_types = Some(vec![SUBPREMISE.into()]);

        let reviewed = classify(&address, &response);
        assert!(!reviewed.has_issue());
    }
}
