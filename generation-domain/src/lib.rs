pub mod domain;
pub mod reference;

pub use reference::{MissingFactor, ReferenceData};
