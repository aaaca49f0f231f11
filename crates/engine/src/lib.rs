//! QR payment engine.
//!
//! Turns the three form inputs (account, amount, message) into a request to
//! the remote QR payment generator and maps whatever comes back into a
//! [`RequestResult`] the front end can show.

pub use client::{ClientError, DEFAULT_ENDPOINT, HttpQrApi, HttpReply, QrApi};
pub use error::EngineError;
pub use form::{FormField, FormInput, FormState, FormTracker};
pub use image::ImageHandle;
pub use pipeline::{DEFAULT_DEBOUNCE, Dispatcher, Pipeline, Results};
pub use presenter::Presenter;
pub use result::{FieldErrors, QrImage, RequestErrors, RequestResult, RequestState};
pub use validation::{AccountNumber, ValidatedPayment, validate};

pub mod pipeline;
pub mod request;
pub mod response;
pub mod result;

mod client;
mod error;
mod form;
mod image;
mod presenter;
mod validation;
