//! Python bindings for dwimeta.

pub mod module;
pub mod validation;
pub mod validator;
