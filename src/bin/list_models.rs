use dotenv::dotenv;
use news_verifier::config::AppConfig;
use news_verifier::pipeline::GeminiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let config = AppConfig::from_env();
    let client = GeminiClient::from_config(&config)?;

    println!("Checking available AI models...");
    match client.list_model_info().await {
        Ok(models) => {
            for m in models.iter().filter(|m| m.supports_generate_content()) {
                println!("- Found: {}", m.name);
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}
