pub mod text_classification;

pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Predicts Ekman's six basic emotions plus neutral.
pub const EKMAN_DISTILROBERTA: &str = "j-hartmann/emotion-english-distilroberta-base";

/// Tweet model; labels include optimism.
pub const TWITTER_ROBERTA_EMOTION: &str = "cardiffnlp/twitter-roberta-base-emotion";

/// GoEmotions, 27 fine-grained labels plus neutral.
pub const GO_EMOTIONS_ROBERTA: &str = "SamLowe/roberta-base-go_emotions";

pub struct Client {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("status: {0} ({1})")]
    Status(reqwest::StatusCode, String),

    #[error("serde: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("unrecognized response shape: {0}")]
    UnrecognizedShape(String),

    #[error("invalid header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl Client {
    /// Without an api key no `Authorization` header is sent.
    pub fn new(endpoint: impl Into<String>, api_key: Option<&str>, timeout: std::time::Duration) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, reqwest::header::HeaderValue::from_static("application/json"));
        headers.insert(reqwest::header::CONTENT_TYPE, reqwest::header::HeaderValue::from_static("application/json"));
        if let Some(api_key) = api_key {
            let mut value: reqwest::header::HeaderValue = format!("Bearer {}", api_key).parse()?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        Ok(Self {
            client: reqwest::ClientBuilder::new().default_headers(headers).timeout(timeout).build()?,
            endpoint: endpoint.into().trim_end_matches('/').to_owned(),
        })
    }

    pub fn model_url(&self, model_id: &str) -> String {
        format!("{}/models/{}", self.endpoint, model_id)
    }

    pub async fn classify_text(&self, model_id: &str, text: &str) -> Result<text_classification::Response, Error> {
        let resp = self
            .client
            .post(self.model_url(model_id))
            .json(&text_classification::Request { inputs: text })
            .send()
            .await
            .map_err(|e| e.without_url())?;

        // Anything but a plain 200 is treated as a failed call, including other 2xx codes.
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.map_err(|e| e.without_url())?;
            return Err(Error::Status(status, body));
        }

        let body = resp.bytes().await.map_err(|e| e.without_url())?;
        match serde_json::from_slice::<text_classification::Response>(&body) {
            Ok(r) => Ok(r),
            Err(e) => {
                // Valid JSON that fits none of the shapes is a different failure from a garbled body.
                serde_json::from_slice::<serde::de::IgnoredAny>(&body)?;
                Err(Error::UnrecognizedShape(e.to_string()))
            }
        }
    }
}
