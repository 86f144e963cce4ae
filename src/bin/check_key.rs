use dotenv::dotenv;
use news_verifier::config::AppConfig;
use news_verifier::error::ProviderError;
use news_verifier::pipeline::{GeminiClient, GenerativeModel};
use std::env;

fn diagnose(err: &ProviderError) -> Option<&'static str> {
    match err {
        ProviderError::MissingCredential => Some("Set GOOGLE_API_KEY in the environment or .env."),
        ProviderError::Status { body, .. } if body.contains("API_KEY_INVALID") => {
            Some("Your key is wrong. Create a new one at aistudio.google.com.")
        }
        ProviderError::NotFound => Some("The model name is wrong. Try CHECK_MODEL=gemini-pro."),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let config = AppConfig::from_env();
    let model = env::var("CHECK_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
    if let Some(key) = config.api_key.as_deref() {
        let shown: String = key.chars().take(10).collect();
        println!("Testing key: {}... (hidden)", shown);
    }

    let client = GeminiClient::from_config(&config)?;
    println!("Attempting to connect to {}...", model);
    match client.generate(&model, "Say hello").await {
        Ok(reply) => {
            println!("\nSUCCESS! Your API key works.");
            println!("AI response: {}", reply.trim());
        }
        Err(e) => {
            println!("\nFAILURE. Error from the provider:");
            println!("------------------------------------------------");
            println!("{}", e);
            println!("------------------------------------------------");
            if let Some(hint) = diagnose(&e) {
                println!("FIX: {}", hint);
            }
            std::process::exit(1);
        }
    }
    Ok(())
}
