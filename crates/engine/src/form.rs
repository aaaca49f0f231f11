#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Account,
    Amount,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [Self::Account, Self::Amount, Self::Message];

    /// Name used for the field in pre-fill query strings.
    pub fn key(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Amount => "amount",
            Self::Message => "message",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn next(self) -> Self {
        match self {
            Self::Account => Self::Amount,
            Self::Amount => Self::Message,
            Self::Message => Self::Account,
        }
    }
}

/// Raw values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub account: String,
    pub amount: String,
    pub message: String,
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Account => &self.account,
            FormField::Amount => &self.amount,
            FormField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Account => &mut self.account,
            FormField::Amount => &mut self.amount,
            FormField::Message => &mut self.message,
        }
    }
}

/// Trimmed snapshot of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub account: String,
    pub amount: String,
    pub message: String,
}

impl From<&FormInput> for FormState {
    fn from(input: &FormInput) -> Self {
        Self {
            account: input.account.trim().to_string(),
            amount: input.amount.trim().to_string(),
            message: input.message.trim().to_string(),
        }
    }
}

/// Emits a new [`FormState`] only when a trimmed value changed.
#[derive(Debug, Default)]
pub struct FormTracker {
    last: Option<FormState>,
}

impl FormTracker {
    pub fn observe(&mut self, input: &FormInput) -> Option<FormState> {
        let state = FormState::from(input);
        if self.last.as_ref() == Some(&state) {
            return None;
        }
        self.last = Some(state.clone());
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(account: &str, amount: &str, message: &str) -> FormInput {
        FormInput {
            account: account.to_string(),
            amount: amount.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn first_observation_always_emits() {
        let mut tracker = FormTracker::default();
        assert_eq!(tracker.observe(&FormInput::default()), Some(FormState::default()));
    }

    #[test]
    fn values_are_trimmed() {
        let mut tracker = FormTracker::default();
        let state = tracker.observe(&input("  19-2000145399/0800 ", " 10 ", " hi ")).unwrap();
        assert_eq!(state.account, "19-2000145399/0800");
        assert_eq!(state.amount, "10");
        assert_eq!(state.message, "hi");
    }

    #[test]
    fn whitespace_only_change_is_suppressed() {
        let mut tracker = FormTracker::default();
        assert!(tracker.observe(&input("1/0100", "10", "")).is_some());
        assert!(tracker.observe(&input("1/0100 ", "10", " ")).is_none());
        assert!(tracker.observe(&input("1/0100", "10", "")).is_none());
    }

    #[test]
    fn any_field_change_emits() {
        let mut tracker = FormTracker::default();
        tracker.observe(&input("1/0100", "10", ""));
        let state = tracker.observe(&input("1/0100", "10", "x")).unwrap();
        assert_eq!(state.message, "x");
    }

    #[test]
    fn field_keys_round_trip() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_key(field.key()), Some(field));
        }
        assert_eq!(FormField::from_key("currency"), None);
    }
}
