pub mod onnx_model;
pub mod predictor;
pub mod smartcore_model;
