pub mod huggingface;

/// One provider label with its score, in the order the provider returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

#[async_trait::async_trait]
pub trait Backend {
    async fn predict(&self, model_id: &str, text: &str) -> Result<Vec<Prediction>, anyhow::Error>;
    fn default_model(&self) -> &str;
}

pub fn new_backend_from_config(config: &crate::config::Config) -> Result<Box<dyn Backend + Send + Sync>, anyhow::Error> {
    Ok(match config.backend.as_str() {
        "huggingface" => Box::new(huggingface::Backend::new(config)?),
        _ => {
            return Err(anyhow::format_err!("unknown backend type: {}", config.backend));
        }
    })
}
