use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use tracing::{info, warn};

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    metadata::parse_metadata,
    model::VideoMetadata,
    progress::ProgressReader,
    transport::{HttpTransport, Transport},
};

const COPY_BUF_SIZE: usize = 8 * 1024;

/// Looks up videos and downloads their encodings.
pub struct Client<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches and decodes the metadata of `video_id`.
    pub fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        let body = self.transport.fetch_text(&self.config.meta_url_for(video_id))?;
        let video = parse_metadata(video_id, &body)?;
        info!(
            video_id,
            title = %video.title,
            formats = video.formats.len(),
            "fetched video metadata"
        );
        Ok(video)
    }

    /// Streams the encoding at `index` into a new file at `destination`.
    ///
    /// `observer` gets `(transferred, total)` after every chunk, `total` being
    /// 0 when the server declares no length. The file is only created once
    /// the transfer answered with success. Returns the number of bytes written.
    pub fn download<F>(
        &self,
        video: &VideoMetadata,
        index: usize,
        destination: impl AsRef<Path>,
        observer: F,
    ) -> Result<u64>
    where
        F: FnMut(u64, u64),
    {
        let destination = destination.as_ref();
        let format = video.format(index).ok_or(Error::NoSuchEncoding {
            index,
            available: video.formats.len(),
        })?;

        let body = self.transport.open(&format.url)?;
        if !body.is_success() {
            warn!(video_id = %video.id, itag = format.itag, status = body.status, "transfer refused");
            return Err(Error::http_status(body.status, &format.url));
        }

        let file = File::create(destination).map_err(|source| Error::SinkCreation {
            path: destination.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(file);

        let total = body.content_length.unwrap_or(0);
        info!(
            video_id = %video.id,
            itag = format.itag,
            total,
            path = %destination.display(),
            "downloading"
        );

        let mut reader = ProgressReader::new(body.reader, total, observer);
        let mut buf = [0u8; COPY_BUF_SIZE];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(video_id = %video.id, transferred = reader.transferred(), "transfer broke off: {e}");
                    return Err(Error::Transfer(e));
                }
            };
            out.write_all(&buf[..n])?;
        }
        out.flush()?;
        let written = reader.transferred();

        info!(video_id = %video.id, written, "download finished");
        Ok(written)
    }

    pub fn infer_extension(&self, video: &VideoMetadata, index: usize) -> Option<&'static str> {
        video.extension(index)
    }
}

/// Fetches metadata for `video_id` with a default HTTP client.
pub fn get(video_id: &str) -> Result<VideoMetadata> {
    Client::new(ClientConfig::default())?.fetch_metadata(video_id)
}
