//! Upload a local image and caption it.
//!
//! Set `RUST_LOG=captionbot=debug` to see the sniffed content type and
//! endpoints being hit.
//!
//! ```sh
//! cargo run --example caption_file -- photos/dog.png
//! ```

use captionbot::{detect_content_type, CaptionBotClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: caption_file <image-path>");
        return Ok(());
    };

    println!("Content type: {}", detect_content_type(&path).await?);

    let client = CaptionBotClient::new();
    let caption = client.caption_file(&path).await?;
    println!("{}", caption);

    Ok(())
}
