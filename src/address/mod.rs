pub mod normalizer;

pub use normalizer::{COMPONENT_FIELDS, NormalizedAddress, field_for_type, normalize};
