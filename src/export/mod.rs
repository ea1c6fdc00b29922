//! Export artifacts (PNG, PDF, VCF) and where they are delivered.

pub(crate) mod naming;
pub(crate) mod pdf;
pub(crate) mod pipeline;
pub(crate) mod sink;
