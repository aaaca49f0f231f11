use api_types::{Currency, qr::QrImageQuery};

use crate::validation::ValidatedPayment;

/// Builds the generator query for a validated form.
///
/// Currency is always CZK and the generator's branding frame is disabled.
pub fn build_query(payment: &ValidatedPayment) -> QrImageQuery {
    QrImageQuery {
        account_prefix: payment.account.prefix.clone(),
        account_number: payment.account.number.clone(),
        bank_code: payment.account.bank_code.clone(),
        amount: payment.amount.clone(),
        currency: Currency::Czk,
        message: payment.message.clone(),
        branding: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{form::FormState, validation::validate};

    fn query_for(account: &str, amount: &str) -> QrImageQuery {
        let state = FormState {
            account: account.to_string(),
            amount: amount.to_string(),
            message: "najem".to_string(),
        };
        build_query(&validate(&state).unwrap())
    }

    #[test]
    fn query_with_prefix() {
        let query = query_for("123456-7890123456/0100", "150.50");
        assert_eq!(query.account_prefix.as_deref(), Some("123456"));
        assert_eq!(query.account_number, "7890123456");
        assert_eq!(query.bank_code, "0100");
        assert_eq!(query.amount, "150.50");
        assert_eq!(query.currency, Currency::Czk);
        assert_eq!(query.message, "najem");
        assert!(!query.branding);
    }

    #[test]
    fn query_without_prefix() {
        let query = query_for("7890123456/0100", "150.50");
        assert_eq!(query.account_prefix, None);
        assert_eq!(query.bank_code, "0100");
        assert_eq!(query.amount, "150.50");
    }
}
