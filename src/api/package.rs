use bytes::Bytes;
use futures::TryStream;
use reqwest::Body;
use std::path::Path;

/// A package archive (usually a ZIP) to upload.
///
/// The contents are streamed to the server exactly once. A failed upload
/// needs a fresh `Package` to try again.
#[derive(Debug)]
pub struct Package {
    body: Body,
}

impl Package {
    /// An archive already held in memory.
    pub fn from_bytes(contents: impl Into<Bytes>) -> Self {
        Self {
            body: Body::from(contents.into()),
        }
    }

    /// Any fallible stream of byte chunks, e.g. one read from a socket.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: TryStream + Send + Sync + 'static,
        S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
        Bytes: From<S::Ok>,
    {
        Self {
            body: Body::wrap_stream(stream),
        }
    }

    /// Opens the archive at `path`; its contents are read as the upload proceeds.
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Self::from(file))
    }

    pub(crate) fn into_body(self) -> Body {
        self.body
    }
}

impl From<tokio::fs::File> for Package {
    fn from(file: tokio::fs::File) -> Self {
        Self {
            body: Body::from(file),
        }
    }
}

impl From<Vec<u8>> for Package {
    fn from(contents: Vec<u8>) -> Self {
        Self::from_bytes(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_packages_keep_their_bytes() {
        let package = Package::from_bytes(&b"PK\x03\x04"[..]);
        assert_eq!(package.into_body().as_bytes(), Some(&b"PK\x03\x04"[..]));
    }

    #[tokio::test]
    async fn opening_a_missing_file_fails() {
        let result = Package::open("/definitely/not/a/real/package.zip").await;
        assert_eq!(
            result.unwrap_err().kind(),
            std::io::ErrorKind::NotFound
        );
    }
}
