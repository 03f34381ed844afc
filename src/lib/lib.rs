pub mod engine;
pub mod error;
pub mod estimator;
pub mod model;
pub mod transform;
pub mod trials;
