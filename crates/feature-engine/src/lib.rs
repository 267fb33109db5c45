//! Feature Engineering Engine
//!
//! Builds the fixed-order numeric feature vector the consumption model was
//! trained on from a vehicle and a fuel grade.

mod features;

pub use features::{
    assemble, check_column_order, Feature, FeatureError, FeatureVector, FEATURE_DIMENSION,
    FEATURE_ORDER,
};
