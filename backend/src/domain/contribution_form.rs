//! Contribution form domain logic.
//!
//! Input format validation, amount parsing and form state transitions live
//! here; the submission service only accepts commands built by this module.

use shared::{
    ContributionFormState, ContributionFormValidation, ContributionValidationError,
    SubmitContributionRequest,
};

use super::commands::SubmitContributionCommand;
use super::export_service::CURRENCY;

pub const PHONE_NUMBER_LENGTH: usize = 10;

/// Largest accepted contribution, in TZS
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

#[derive(Clone, Debug, Default)]
pub struct ContributionFormService;

impl ContributionFormService {
    pub fn new() -> Self {
        Self
    }

    /// Create an empty form, with M-Pesa preselected
    pub fn create_form_state() -> ContributionFormState {
        ContributionFormState::default()
    }

    /// Validate raw form input.
    ///
    /// Every failing rule is collected; `error_message` holds the message of
    /// the first one in name, amount, phone order.
    pub fn validate_form(&self, name: &str, amount_input: &str, phone_number: &str) -> ContributionFormValidation {
        let mut errors = Vec::new();

        let name_trimmed = name.trim();
        let cleaned_name = if name_trimmed.is_empty() {
            errors.push(ContributionValidationError::EmptyName);
            None
        } else {
            Some(name_trimmed.to_string())
        };

        let cleaned_amount = if amount_input.trim().is_empty() {
            errors.push(ContributionValidationError::EmptyAmount);
            None
        } else {
            match self.clean_and_parse_amount(amount_input) {
                Ok(amount) if amount <= 0.0 => {
                    errors.push(ContributionValidationError::AmountNotPositive);
                    None
                }
                Ok(amount) if amount > MAX_AMOUNT => {
                    errors.push(ContributionValidationError::AmountTooLarge);
                    None
                }
                Ok(amount) => Some(amount),
                Err(parse_error) => {
                    errors.push(ContributionValidationError::InvalidAmountFormat(parse_error));
                    None
                }
            }
        };

        if !Self::is_valid_phone_number(phone_number) {
            errors.push(ContributionValidationError::InvalidPhoneNumber);
        }

        ContributionFormValidation {
            is_valid: errors.is_empty(),
            error_message: errors.first().map(|e| e.to_string()),
            errors,
            cleaned_name,
            cleaned_amount,
        }
    }

    /// Clean and parse amount input: strips one leading currency label, commas
    /// and spaces. Non-finite values are rejected.
    pub fn clean_and_parse_amount(&self, amount_input: &str) -> Result<f64, String> {
        let trimmed = amount_input.trim();
        let cleaned = trimmed
            .strip_prefix(CURRENCY)
            .unwrap_or(trimmed)
            .replace(',', "")
            .replace(' ', "");

        if cleaned.is_empty() {
            return Err("Empty amount after cleaning".to_string());
        }

        let amount = cleaned
            .parse::<f64>()
            .map_err(|e| format!("Invalid number format: {}", e))?;

        if !amount.is_finite() {
            return Err("Amount must be a finite number".to_string());
        }
        Ok(amount)
    }

    /// Exactly ten ASCII digits, nothing else
    pub fn is_valid_phone_number(phone_number: &str) -> bool {
        phone_number.len() == PHONE_NUMBER_LENGTH && phone_number.bytes().all(|b| b.is_ascii_digit())
    }

    /// Validate a request and turn it into a submit command
    pub fn to_submit_command(
        &self,
        request: &SubmitContributionRequest,
    ) -> Result<SubmitContributionCommand, ContributionFormValidation> {
        let validation = self.validate_form(&request.name, &request.amount, &request.phone_number);
        match (&validation.cleaned_name, validation.cleaned_amount) {
            (Some(name), Some(amount)) if validation.is_valid => Ok(SubmitContributionCommand {
                name: name.clone(),
                amount,
                payment_method: request.payment_method,
                phone_number: request.phone_number.clone(),
            }),
            _ => Err(validation),
        }
    }

    /// Check that a command still satisfies the record invariants
    pub fn validate_command(&self, command: &SubmitContributionCommand) -> Vec<ContributionValidationError> {
        let mut errors = Vec::new();
        if command.name.trim().is_empty() || command.name.trim() != command.name {
            errors.push(ContributionValidationError::EmptyName);
        }
        if !command.amount.is_finite() || command.amount <= 0.0 {
            errors.push(ContributionValidationError::AmountNotPositive);
        } else if command.amount > MAX_AMOUNT {
            errors.push(ContributionValidationError::AmountTooLarge);
        }
        if !Self::is_valid_phone_number(&command.phone_number) {
            errors.push(ContributionValidationError::InvalidPhoneNumber);
        }
        errors
    }

    /// Validate the form held in `state`; on success the form switches to
    /// submitting and the command to submit is returned alongside it
    pub fn begin_submit(
        &self,
        mut state: ContributionFormState,
    ) -> (ContributionFormState, Option<SubmitContributionCommand>) {
        if state.is_submitting {
            return (state, None);
        }

        let request = SubmitContributionRequest {
            name: state.name.clone(),
            amount: state.amount_input.clone(),
            payment_method: state.payment_method,
            phone_number: state.phone_number.clone(),
        };

        match self.to_submit_command(&request) {
            Ok(command) => {
                state.error_message = None;
                state.is_submitting = true;
                (state, Some(command))
            }
            Err(validation) => {
                state.error_message = validation.error_message;
                (state, None)
            }
        }
    }

    /// Leave the submitting state; a successful submission clears the form
    pub fn complete_submit(&self, state: ContributionFormState, success: bool) -> ContributionFormState {
        if success {
            Self::create_form_state()
        } else {
            ContributionFormState {
                is_submitting: false,
                ..state
            }
        }
    }

    /// Dismiss the inline error message
    pub fn dismiss_error(&self, state: ContributionFormState) -> ContributionFormState {
        ContributionFormState {
            error_message: None,
            ..state
        }
    }
}
