//! Quality scoring: dimensions, weights, thresholds, decisions

pub mod assessment;
pub mod decision;
pub mod dimensions;
pub mod parsing;
pub mod reconcile;
pub mod thresholds;
pub mod weights;
