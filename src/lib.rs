//! # captionbot-rs
//!
//! Async Rust client for the [CaptionBot](https://www.captionbot.ai) image
//! captioning service.
//!
//! Caption an image by URL, upload a local file and caption it, and rate
//! the last caption. Every call is a single HTTP round trip; nothing is
//! cached or retried.
//!
//! ## Quick Start
//!
//! ```no_run
//! use captionbot::CaptionBotClient;
//!
//! # async fn example() -> captionbot::Result<()> {
//! let client = CaptionBotClient::new();
//!
//! // Caption a hosted image
//! let caption = client.caption_url("https://example.com/cat.jpg").await?;
//! println!("{}", caption);
//!
//! // Upload a local image, then caption it
//! let caption = client.caption_file("photos/dog.png").await?;
//! println!("{}", caption);
//!
//! // Tell the service how it did
//! let ack = client.submit_rating(5).await?;
//! println!("{}", ack);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom endpoints
//!
//! ```
//! use captionbot::{CaptionBotClient, CaptionBotConfig};
//! use std::time::Duration;
//!
//! let client = CaptionBotClient::new().with_config(
//!     CaptionBotConfig::with_base_url("http://127.0.0.1:8080")
//!         .timeout(Duration::from_secs(30)),
//! );
//! assert_eq!(client.config().upload_endpoint, "http://127.0.0.1:8080/api/upload");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod sniff;
pub mod types;

pub use client::{decode_quoted, CaptionBotClient};
pub use config::CaptionBotConfig;
pub use error::{CaptionBotError, Result};
pub use sniff::{detect_content_type, sniff_content_type};
pub use types::{Request, RequestKind};
