//! Caption a hosted image.
//!
//! ```sh
//! cargo run --example caption_url -- https://example.com/cat.jpg
//! ```

use captionbot::CaptionBotClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(url) = std::env::args().nth(1) else {
        eprintln!("usage: caption_url <image-url>");
        return Ok(());
    };

    let client = CaptionBotClient::new();
    let caption = client.caption_url(&url).await?;
    println!("{}", caption);

    Ok(())
}
