pub mod metrics;
pub mod scores;
pub mod targets;
pub mod weights;
