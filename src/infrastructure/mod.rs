// Reference dataset adapter (CSV)
pub mod dataset;
