pub mod card;
pub mod hints;
pub mod qr_preview;
pub mod toast;
