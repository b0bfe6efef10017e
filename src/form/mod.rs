pub mod fingerprint;
pub mod form_model;
pub mod view;
