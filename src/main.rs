use clap::Parser;
use tokio::io::AsyncBufReadExt;

#[derive(clap::Parser)]
struct Opts {
    #[clap(long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Model id to use instead of the configured one.
    #[clap(long)]
    model: Option<String>,

    /// Texts to classify. Reads one text per line from stdin if none are given.
    texts: Vec<String>,
}

async fn classify_and_print(classifier: &emodetect::Classifier, text: &str, model: Option<&str>) -> Result<(), anyhow::Error> {
    let result = classifier.classify(text, model).await;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("emodetect=info")).init();

    let opts = Opts::parse();

    if let Err(e) = dotenv::dotenv() {
        log::debug!("no .env loaded: {}", e);
    }

    let config = emodetect::config::Config::load(&opts.config, std::env::var(emodetect::config::TOKEN_ENV_VAR).ok())?;
    let classifier = emodetect::Classifier::from_config(&config)?;

    if !opts.texts.is_empty() {
        for text in opts.texts.iter() {
            classify_and_print(&classifier, text, opts.model.as_deref()).await?;
        }
        return Ok(());
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        classify_and_print(&classifier, text, opts.model.as_deref()).await?;
    }

    Ok(())
}
