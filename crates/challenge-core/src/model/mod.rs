//! Modelos del wizard (Draft, FormFields).

pub mod draft;
pub mod form;

pub use draft::Draft;
pub use form::FormFields;
