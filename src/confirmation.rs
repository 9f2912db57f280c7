/*!
Walks the registrant through address errors one at a time.

The flow owns the form model while it is open. Every choice produces a new form value through
[`apply_recommendation`]; nothing else touches the form.

```
use address_validation::{
    confirmation::{Choice, ConfirmationFlow, FlowStep},
    form::AddressesForm,
    AddressError, AddressFormName,
};

let errors = vec![AddressError::MissingSubpremise { form: AddressFormName::HomeAddress }];
let mut flow = ConfirmationFlow::new(errors, AddressesForm::default()).unwrap();
assert_eq!("Continue", flow.button_label());

match flow.confirm(Choice::EnterSubpremise("Apt 4".into())) {
    FlowStep::Finished(form) => assert_eq!("Apt 4", form.home_address.street_line2.value),
    FlowStep::Advanced => unreachable!(),
}
```
*/
use crate::{
    address_error::{AddressError, ReviewedAddress},
    form::{AddressFormState, AddressesForm, FieldState, Validity},
    AddressField, AddressFormName,
};

/// What the registrant decided about the current error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Take the service's recommended address.
    UseRecommended,
    /// Keep the address as entered.
    KeepEntered,
    /// Add an apartment, suite or unit as the second street line.
    EnterSubpremise(String),
}

/// What to show for the current error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorView<'a> {
    UnconfirmedComponents {
        form: AddressFormName,
        components: &'a ReviewedAddress,
    },
    ReviewRecommendedAddress {
        form: AddressFormName,
        entered: &'a ReviewedAddress,
        recommended: &'a ReviewedAddress,
    },
    MissingSubpremise {
        form: AddressFormName,
        entered: Option<&'a AddressFormState>,
    },
    /// Validation could not run; show every address for a final look.
    ReviewAddresses { addresses: &'a AddressesForm },
}

/// Outcome of confirming the current error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// The next error is now current.
    Advanced,
    /// No errors left. Carries the form to submit.
    Finished(AddressesForm),
}

#[derive(Debug, Clone)]
pub struct ConfirmationFlow {
    errors: Vec<AddressError>,
    index: usize,
    form: AddressesForm,
}

impl ConfirmationFlow {
    /// Opens a flow over `errors`, or `None` when there is nothing to confirm.
    pub fn new(errors: Vec<AddressError>, form: AddressesForm) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self {
            errors,
            index: 0,
            form,
        })
    }

    pub fn current(&self) -> &AddressError {
        &self.errors[self.index]
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Position of the current error, counting from one.
    pub fn error_number(&self) -> usize {
        self.index + 1
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_last(&self) -> bool {
        self.error_number() == self.error_count()
    }

    pub fn form(&self) -> &AddressesForm {
        &self.form
    }

    pub fn button_label(&self) -> &'static str {
        match self.current() {
            _ if !self.is_last() => "Next",
            AddressError::UnconfirmedComponents { .. } => "Continue Anyway",
            _ => "Continue",
        }
    }

    pub fn view(&self) -> ErrorView<'_> {
        match self.current() {
            AddressError::UnconfirmedComponents {
                form,
                unconfirmed_address_components,
            } => ErrorView::UnconfirmedComponents {
                form: *form,
                components: unconfirmed_address_components,
            },
            AddressError::ReviewRecommendedAddress {
                form,
                entered_address,
                recommended_address,
            } => ErrorView::ReviewRecommendedAddress {
                form: *form,
                entered: entered_address,
                recommended: recommended_address,
            },
            AddressError::MissingSubpremise { form } => ErrorView::MissingSubpremise {
                form: *form,
                entered: self.form.form(*form),
            },
            AddressError::ValidationFailed => ErrorView::ReviewAddresses {
                addresses: &self.form,
            },
        }
    }

    /// Applies `choice` to the current error and moves on.
    pub fn confirm(&mut self, choice: Choice) -> FlowStep {
        let current = &self.errors[self.index];
        self.form = apply_recommendation(&self.form, current, &choice);

        if self.is_last() || *current == AddressError::ValidationFailed {
            FlowStep::Finished(self.form.clone())
        } else {
            self.index += 1;
            FlowStep::Advanced
        }
    }

    /// Closes the flow without confirming the remaining errors.
    pub fn return_to_editing(self) -> AddressesForm {
        self.form
    }
}

/// The form after `choice` was made for `error`. `form` itself is left untouched.
///
/// Errors for a form that is not part of `form` change nothing.
pub fn apply_recommendation(
    form: &AddressesForm,
    error: &AddressError,
    choice: &Choice,
) -> AddressesForm {
    let mut next = form.clone();

    match (error, choice) {
        (
            AddressError::ReviewRecommendedAddress {
                form: name,
                recommended_address,
                ..
            },
            Choice::UseRecommended,
        ) => {
            if let Some(state) = next.form_mut(*name) {
                use_recommended(state, recommended_address);
            }
        }
        (AddressError::MissingSubpremise { form: name }, Choice::EnterSubpremise(line)) => {
            if let Some(state) = next.form_mut(*name) {
                state.street_line2 = FieldState::valid(line.trim());
            }
        }
        (error, _) => mark_caution(&mut next, error),
    }

    next
}

/// Marks every field an error flagged as `Caution`, leaving values alone.
pub fn apply_caution_validity(form: &AddressesForm, errors: &[AddressError]) -> AddressesForm {
    let mut next = form.clone();
    for error in errors {
        mark_caution(&mut next, error);
    }
    next
}

fn use_recommended(state: &mut AddressFormState, recommended: &ReviewedAddress) {
    state.street_line1 = FieldState::valid(recommended.street_line1.value.clone());
    state.street_line2 = FieldState::valid(
        recommended
            .street_line2
            .as_ref()
            .map(|field| field.value.clone())
            .unwrap_or_default(),
    );
    state.city = FieldState::valid(recommended.city.value.clone());
    state.state = FieldState::valid(recommended.state.value.clone());
    state.zip = FieldState::valid(recommended.zip.value.clone());
}

fn mark_caution(form: &mut AddressesForm, error: &AddressError) {
    let (name, flagged): (AddressFormName, Vec<AddressField>) = match error {
        AddressError::UnconfirmedComponents {
            form,
            unconfirmed_address_components,
        } => (
            *form,
            unconfirmed_address_components.fields_with_issue().collect(),
        ),
        AddressError::ReviewRecommendedAddress {
            form,
            entered_address,
            ..
        } => (*form, entered_address.fields_with_issue().collect()),
        AddressError::MissingSubpremise { form } => (*form, vec![AddressField::StreetLine2]),
        AddressError::ValidationFailed => return,
    };

    if let Some(state) = form.form_mut(name) {
        for field in flagged {
            state.field_mut(field).validity = Validity::Caution;
        }
    }
}
