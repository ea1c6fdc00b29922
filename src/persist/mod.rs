//! Local persistence of the card state.

pub(crate) mod snapshot;
pub(crate) mod store;
