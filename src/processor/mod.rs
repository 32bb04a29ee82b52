pub mod alias_resolver;
pub mod field_normalizers;
pub mod final_dataset;
pub mod location_stripper;
pub mod place_standardizer;
pub mod rule_normalizer;
pub mod school_rules;
pub mod school_standardizer;

pub use alias_resolver::*;
pub use field_normalizers::*;
pub use final_dataset::*;
pub use location_stripper::*;
pub use place_standardizer::*;
pub use rule_normalizer::*;
pub use school_standardizer::*;
