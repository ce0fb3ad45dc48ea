/// Interface over the trained pricing model.
pub trait PriceModel: Send + Sync {
    /// Run the model on one feature row (schema order) and return the raw
    /// predicted price.
    fn predict(&self, row: &[f64]) -> Result<f64, String>;

    /// Input column names baked into the model artifact, when it carries
    /// them. `None` means the caller falls back to the built-in order.
    fn feature_names(&self) -> Option<Vec<String>> {
        None
    }

    /// Get model name/type
    fn name(&self) -> &str;
}
