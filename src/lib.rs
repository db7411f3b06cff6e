//! Video metadata lookup and progress-reporting downloads.
//!
//! [`Client::fetch_metadata`] turns a video id into a [`VideoMetadata`] with
//! its available encodings; [`Client::download`] streams one of them to a
//! file while reporting `(transferred, total)` byte counts.

pub mod config;
pub mod downloader;
pub mod error;
pub mod formats;
pub mod metadata;
pub mod model;
pub mod params;
pub mod progress;
pub mod transport;

pub use config::ClientConfig;
pub use downloader::{Client, get};
pub use error::{Error, Result};
pub use formats::infer_extension;
pub use model::{EncodingDescriptor, VideoMetadata};
pub use progress::ProgressReader;
pub use transport::{HttpTransport, TransferBody, Transport};
