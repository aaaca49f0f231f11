//! Local validation of the form before anything reaches the network.
//!
//! Czech account numbers are written as `prefix-number/bank`, the prefix
//! (up to six digits) being optional. Both the account and the amount
//! patterns are searched anywhere in the value; the first match wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    form::{FormField, FormState},
    result::{INVALID_ACCOUNT, INVALID_AMOUNT, INVALID_FORM, RequestErrors},
};

#[allow(clippy::expect_used)]
static ACCOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:([0-9]{1,6})-)?([0-9]{2,10})/([0-9]{4})")
        .expect("Account regex pattern is valid")
});

#[allow(clippy::expect_used)]
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+(?:\.[0-9]{1,2})?").expect("Amount regex pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountNumber {
    pub prefix: Option<String>,
    pub number: String,
    pub bank_code: String,
}

impl AccountNumber {
    pub fn parse(value: &str) -> Option<Self> {
        let captures = ACCOUNT_PATTERN.captures(value)?;
        Some(Self {
            prefix: captures.get(1).map(|m| m.as_str().to_string()),
            number: captures.get(2)?.as_str().to_string(),
            bank_code: captures.get(3)?.as_str().to_string(),
        })
    }
}

/// A form that passed validation, ready to become a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayment {
    pub account: AccountNumber,
    /// Raw amount as typed (trimmed), forwarded untouched.
    pub amount: String,
    pub message: String,
}

pub fn is_valid_amount(value: &str) -> bool {
    AMOUNT_PATTERN.is_match(value)
}

pub fn validate(state: &FormState) -> Result<ValidatedPayment, RequestErrors> {
    let mut errors = RequestErrors::default();

    let account = AccountNumber::parse(&state.account);
    if account.is_none() {
        errors.fields.set(FormField::Account, INVALID_ACCOUNT);
        errors.generic = Some(INVALID_FORM.to_string());
    }

    if !is_valid_amount(&state.amount) {
        errors.fields.set(FormField::Amount, INVALID_AMOUNT);
        // Overwrites any message set above: the last failing check wins.
        errors.generic = Some(INVALID_FORM.to_string());
    }

    match account {
        Some(account) if errors.generic.is_none() => Ok(ValidatedPayment {
            account,
            amount: state.amount.clone(),
            message: state.message.clone(),
        }),
        _ => {
            tracing::debug!(
                account = errors.fields.account.is_some(),
                amount = errors.fields.amount.is_some(),
                "form rejected locally"
            );
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(account: &str, amount: &str) -> FormState {
        FormState {
            account: account.to_string(),
            amount: amount.to_string(),
            message: "rent".to_string(),
        }
    }

    #[test]
    fn account_with_prefix() {
        let account = AccountNumber::parse("123456-7890123456/0100").unwrap();
        assert_eq!(account.prefix.as_deref(), Some("123456"));
        assert_eq!(account.number, "7890123456");
        assert_eq!(account.bank_code, "0100");
    }

    #[test]
    fn account_without_prefix() {
        let account = AccountNumber::parse("7890123456/0100").unwrap();
        assert_eq!(account.prefix, None);
        assert_eq!(account.number, "7890123456");
        assert_eq!(account.bank_code, "0100");
    }

    #[test]
    fn account_bounds() {
        for number_len in 2..=10 {
            for prefix_len in 1..=6 {
                let value = format!("{}-{}/0800", "1".repeat(prefix_len), "2".repeat(number_len));
                let account = AccountNumber::parse(&value).unwrap();
                assert_eq!(account.prefix.unwrap().len(), prefix_len);
                assert_eq!(account.number.len(), number_len);
            }
        }
        assert!(AccountNumber::parse("1/0100").is_none());
        assert!(AccountNumber::parse("12345/010").is_none());
    }

    #[test]
    fn account_is_searched_within_text() {
        let account = AccountNumber::parse("účet: 19-2000145399/0800 díky").unwrap();
        assert_eq!(account.prefix.as_deref(), Some("19"));
        assert_eq!(account.bank_code, "0800");
    }

    #[test]
    fn amount_patterns() {
        assert!(is_valid_amount("150"));
        assert!(is_valid_amount("150.50"));
        assert!(is_valid_amount("cca 42 Kč"));
        assert!(!is_valid_amount(""));
        assert!(!is_valid_amount("abc"));
        assert!(!is_valid_amount("."));
    }

    #[test]
    fn valid_form_keeps_raw_amount_and_message() {
        let payment = validate(&state("123456-7890123456/0100", "150.50")).unwrap();
        assert_eq!(payment.amount, "150.50");
        assert_eq!(payment.message, "rent");
        assert_eq!(payment.account.prefix.as_deref(), Some("123456"));
    }

    #[test]
    fn bad_account_sets_account_error_only() {
        let errors = validate(&state("badaccount", "150")).unwrap_err();
        assert_eq!(errors.fields.account.as_deref(), Some(INVALID_ACCOUNT));
        assert_eq!(errors.fields.amount, None);
        assert!(errors.generic.is_some());
    }

    #[test]
    fn bad_amount_sets_amount_error_only() {
        let errors = validate(&state("7890123456/0100", "zdarma")).unwrap_err();
        assert_eq!(errors.fields.account, None);
        assert_eq!(errors.fields.amount.as_deref(), Some(INVALID_AMOUNT));
        assert!(errors.generic.is_some());
    }

    #[test]
    fn both_failures_set_both_fields() {
        let errors = validate(&state("", "")).unwrap_err();
        assert!(errors.fields.account.is_some());
        assert!(errors.fields.amount.is_some());
        assert_eq!(errors.generic.as_deref(), Some(INVALID_FORM));
        assert_eq!(errors.fields.message, None);
    }
}
