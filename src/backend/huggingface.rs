pub struct Backend {
    client: crate::huggingface::Client,
    model: String,
}

impl Backend {
    pub fn new(config: &crate::config::Config) -> Result<Self, anyhow::Error> {
        Ok(Self {
            client: crate::huggingface::Client::new(
                config.endpoint.clone(),
                config.api_token.as_deref(),
                config.timeout(),
            )?,
            model: config.model.clone(),
        })
    }
}

fn convert_prediction(p: crate::huggingface::text_classification::Prediction) -> super::Prediction {
    super::Prediction {
        label: p.label,
        score: p.score,
    }
}

#[async_trait::async_trait]
impl super::Backend for Backend {
    async fn predict(&self, model_id: &str, text: &str) -> Result<Vec<super::Prediction>, anyhow::Error> {
        log::info!("huggingface request: model {}", model_id);

        let resp = self.client.classify_text(model_id, text).await?;
        Ok(resp.into_predictions().into_iter().map(convert_prediction).collect())
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}
