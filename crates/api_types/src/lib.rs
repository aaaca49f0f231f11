//! Wire types of the remote QR payment generator.
//!
//! The generator is a plain `GET` endpoint: the request travels as query
//! parameters and a successful reply is a PNG image. Failures carry a JSON
//! body listing error descriptors.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Czk,
}

pub mod qr {
    use super::*;

    /// Query parameters of the image endpoint.
    ///
    /// `accountPrefix` is left out of the query entirely when the account
    /// has no prefix.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QrImageQuery {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        pub account_prefix: Option<String>,
        pub account_number: String,
        pub bank_code: String,
        pub amount: String,
        pub currency: Currency,
        pub message: String,
        pub branding: bool,
    }

    /// Body returned by the generator on a non-success status.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ErrorBody {
        #[serde(default)]
        pub errors: Vec<ErrorDescriptor>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorDescriptor {
        #[serde(default)]
        pub description: Option<String>,
    }
}
