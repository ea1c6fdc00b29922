//! Application layer: the controller that owns the card state, plus input debouncing and form
//! validation.

pub(crate) mod controller;
pub(crate) mod debounce;
pub(crate) mod validate;
