use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io, thread};

use futures::channel::oneshot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid post file name: {0}")]
    InvalidName(String),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("{url} is larger than {limit} bytes")]
    TooLarge { url: String, limit: usize },
    #[error("{url} is not valid UTF-8")]
    Encoding { url: String },
}

const MAX_POST_BYTES: usize = 1024 * 1024;

/// Where post files come from. Every fetch is independent of the others.
#[allow(async_fn_in_trait)]
pub trait PostSource {
    async fn fetch(&self, file_name: &str) -> Result<String, FetchError>;
}

fn check_file_name(file_name: &str) -> Result<(), FetchError> {
    if file_name.is_empty() || file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
        return Err(FetchError::InvalidName(file_name.to_string()));
    }
    Ok(())
}

/// Reads posts from a local directory
pub struct DirSource {
    pub base_dir: PathBuf,
}

impl DirSource {
    pub fn new(base_dir: PathBuf) -> Self {
        DirSource { base_dir }
    }
}

impl PostSource for DirSource {
    async fn fetch(&self, file_name: &str) -> Result<String, FetchError> {
        check_file_name(file_name)?;
        let path = self.base_dir.join(file_name);

        // each read runs on its own thread, concurrent fetches stay concurrent
        let (tx, rx) = oneshot::channel();
        let read_path = path.clone();
        thread::spawn(move || {
            let _ = tx.send(fs::read_to_string(read_path));
        });

        let result = match rx.await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(io::ErrorKind::Interrupted, "reader thread stopped")),
        };
        result.map_err(|source| FetchError::Io { path, source })
    }
}

/// Appends `chunk` unless the body would grow past `limit`
fn push_chunk(body: &mut Vec<u8>, chunk: &[u8], limit: usize) -> bool {
    if body.len() + chunk.len() > limit {
        return false;
    }
    body.extend_from_slice(chunk);
    true
}

fn body_to_string(url: &str, body: Vec<u8>) -> Result<String, FetchError> {
    String::from_utf8(body).map_err(|_| FetchError::Encoding { url: url.to_string() })
}

/// Downloads posts from `<base_url>/<file_name>`
pub struct HttpSource {
    pub base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(HttpSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }
}

impl PostSource for HttpSource {
    async fn fetch(&self, file_name: &str) -> Result<String, FetchError> {
        check_file_name(file_name)?;
        let url = self.url_for(file_name);
        let transport = |e: reqwest::Error| FetchError::Transport { url: url.clone(), reason: e.to_string() };

        let mut response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.clone(), status: status.as_u16() });
        }
        if response.content_length().is_some_and(|len| len > MAX_POST_BYTES as u64) {
            return Err(FetchError::TooLarge { url: url.clone(), limit: MAX_POST_BYTES });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(transport)? {
            if !push_chunk(&mut body, &chunk, MAX_POST_BYTES) {
                return Err(FetchError::TooLarge { url: url.clone(), limit: MAX_POST_BYTES });
            }
        }

        body_to_string(&url, body)
    }
}

/// The source picked by configuration
pub enum Source {
    Dir(DirSource),
    Http(HttpSource),
}

impl PostSource for Source {
    async fn fetch(&self, file_name: &str) -> Result<String, FetchError> {
        match self {
            Source::Dir(source) => source.fetch(file_name).await,
            Source::Http(source) => source.fetch(file_name).await,
        }
    }
}
