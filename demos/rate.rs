//! Rate the last caption the service produced.
//!
//! ```sh
//! cargo run --example rate -- 5
//! ```

use captionbot::CaptionBotClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rating: i64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => {
            eprintln!("usage: rate <rating>");
            return Ok(());
        }
    };

    let ack = CaptionBotClient::new().submit_rating(rating).await?;
    println!("Service replied: {}", ack);

    Ok(())
}
