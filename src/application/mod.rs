// Category encoding derived from the reference dataset
pub mod encoder;

// Model backends
pub mod ml;

// Input-to-row alignment and prediction
pub mod pipeline;
