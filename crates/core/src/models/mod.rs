//! Entity records and the request shapes they are built from.

mod clinical_data;
mod patient;

pub use clinical_data::*;
pub use patient::*;
