use std::sync::Arc;

use crate::form::FormField;

pub const INVALID_ACCOUNT: &str = "Neplatné číslo účtu";
pub const INVALID_AMOUNT: &str = "Neplatný formát čísla";
pub const INVALID_FORM: &str = "Formulář obsahuje chyby.";
pub const GENERATION_FAILED: &str = "QR kód se nepodařilo vygenerovat.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub account: Option<String>,
    pub amount: Option<String>,
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Account => self.account.as_deref(),
            FormField::Amount => self.amount.as_deref(),
            FormField::Message => self.message.as_deref(),
        }
    }

    pub(crate) fn set(&mut self, field: FormField, message: &str) {
        let slot = match field {
            FormField::Account => &mut self.account,
            FormField::Amount => &mut self.amount,
            FormField::Message => &mut self.message,
        };
        *slot = Some(message.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestErrors {
    pub generic: Option<String>,
    pub fields: FieldErrors,
}

impl RequestErrors {
    pub fn generic(message: impl Into<String>) -> Self {
        Self {
            generic: Some(message.into()),
            fields: FieldErrors::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.generic.is_none() && self.fields == FieldErrors::default()
    }
}

/// Image bytes exactly as returned by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    bytes: Arc<[u8]>,
    content_type: Option<String>,
}

impl QrImage {
    pub fn new(bytes: impl Into<Arc<[u8]>>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// File extension matching the reported content type, `png` otherwise.
    pub fn extension(&self) -> &'static str {
        match self.content_type() {
            Some(ct) if ct.starts_with("image/svg") => "svg",
            Some(ct) if ct.starts_with("image/jpeg") => "jpg",
            _ => "png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Loading,
    Success,
    Failed,
}

impl RequestState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

/// Outcome of one pipeline run as shown to the user.
///
/// A success carries the payload and no errors, a failure carries errors
/// with a generic message and no payload, loading carries neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestResult {
    Loading,
    Success(QrImage),
    Failed(RequestErrors),
}

impl RequestResult {
    pub fn state(&self) -> RequestState {
        match self {
            Self::Loading => RequestState::Loading,
            Self::Success(_) => RequestState::Success,
            Self::Failed(_) => RequestState::Failed,
        }
    }

    pub fn payload(&self) -> Option<&QrImage> {
        match self {
            Self::Success(image) => Some(image),
            _ => None,
        }
    }

    pub fn errors(&self) -> Option<&RequestErrors> {
        match self {
            Self::Failed(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_and_errors_are_exclusive() {
        let success = RequestResult::Success(QrImage::new(vec![1, 2, 3], None));
        assert!(success.payload().is_some());
        assert!(success.errors().is_none());

        let failed = RequestResult::Failed(RequestErrors::generic(GENERATION_FAILED));
        assert!(failed.payload().is_none());
        assert_eq!(
            failed.errors().and_then(|e| e.generic.as_deref()),
            Some(GENERATION_FAILED)
        );

        assert!(RequestResult::Loading.payload().is_none());
        assert!(RequestResult::Loading.errors().is_none());
        assert!(!RequestResult::Loading.is_terminal());
    }

    #[test]
    fn extension_follows_content_type() {
        assert_eq!(QrImage::new(vec![], Some("image/png".into())).extension(), "png");
        assert_eq!(QrImage::new(vec![], Some("image/svg+xml".into())).extension(), "svg");
        assert_eq!(QrImage::new(vec![], None).extension(), "png");
    }

    #[test]
    fn fresh_errors_are_empty() {
        assert!(RequestErrors::default().is_empty());
        assert!(!RequestErrors::generic("x").is_empty());
    }
}
