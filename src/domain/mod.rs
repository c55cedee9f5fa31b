// Domain layer - Core types and naming rules

pub mod errors;
pub mod model;
pub mod rules;
