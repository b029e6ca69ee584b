use crate::backend::Backend;
use crate::emotion::{Aggregator, ClassificationResult};

pub struct Classifier {
    backend: Box<dyn Backend + Send + Sync>,
    aggregator: Aggregator,
}

impl Classifier {
    pub fn new(backend: Box<dyn Backend + Send + Sync>, aggregator: Aggregator) -> Self {
        Self { backend, aggregator }
    }

    pub fn from_config(config: &crate::config::Config) -> Result<Self, anyhow::Error> {
        Ok(Self::new(
            crate::backend::new_backend_from_config(config)?,
            Aggregator::new(crate::emotion::LabelMapper::new(config.surprise), config.accumulation),
        ))
    }

    /// Classifies `text` with `model_id`, or the backend's default model.
    ///
    /// Never fails: any error talking to the backend or reading its response yields
    /// [`ClassificationResult::empty`].
    pub async fn classify(&self, text: &str, model_id: Option<&str>) -> ClassificationResult {
        let model_id = model_id.unwrap_or_else(|| self.backend.default_model());

        let predictions = match self.backend.predict(model_id, text).await {
            Ok(predictions) => predictions,
            Err(e) => {
                log::warn!("classification with {} failed: {:?}", model_id, e);
                return ClassificationResult::empty();
            }
        };

        self.aggregator.aggregate(&predictions)
    }
}
