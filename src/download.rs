use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use tokio::io::AsyncWriteExt;

use crate::error::MenuError;

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// A fresh path in the system temp dir, unique per invocation.
pub fn temp_pdf_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "canteen-menu-{}-{nanos}-{seq}.pdf",
        std::process::id()
    ))
}

/// Streams `url` into `path`. On any failure the partial file is removed
/// before the error is returned.
pub async fn download_to(client: &Client, url: &str, path: &Path) -> Result<u64, MenuError> {
    let result = stream_into(client, url, path).await;
    if result.is_err() {
        remove_temp_file(path).await;
    }
    result
}

pub async fn download_pdf(client: &Client, url: &str) -> Result<PathBuf, MenuError> {
    let path = temp_pdf_path();
    let written = download_to(client, url, &path).await?;
    tracing::debug!(url, path = %path.display(), bytes = written, "downloaded menu PDF");
    Ok(path)
}

async fn stream_into(client: &Client, url: &str, path: &Path) -> Result<u64, MenuError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(MenuError::io(path))?;

    let mut resp = client
        .get(url)
        .send()
        .await
        .map_err(MenuError::transport(url))?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(MenuError::Status {
            url: url.to_string(),
            status,
        });
    }

    let mut written = 0u64;
    while let Some(chunk) = resp.chunk().await.map_err(MenuError::transport(url))? {
        file.write_all(&chunk).await.map_err(MenuError::io(path))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(MenuError::io(path))?;

    Ok(written)
}

/// Best effort: a failed removal is logged and otherwise ignored.
pub async fn remove_temp_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed temp file"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not remove temp file")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    async fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(&response).await.unwrap();
            socket.shutdown().await.ok();
        });
        format!("http://{addr}/menu.pdf")
    }

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn temp_paths_are_unique() {
        let first = temp_pdf_path();
        let second = temp_pdf_path();
        assert_ne!(first, second);
        assert_eq!(first.extension().unwrap(), "pdf");
        assert!(first.starts_with(std::env::temp_dir()));
    }

    #[tokio::test]
    async fn body_is_written_to_file() {
        let body = b"%PDF-1.4 fake body".to_vec();
        let mut response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/pdf\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(&body);
        let url = serve_once(response).await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.pdf");
        let written = download_to(&client(), &url, &path).await.unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&path).unwrap(), body);
    }

    #[tokio::test]
    async fn bad_status_removes_partial_file() {
        let url = serve_once(
            b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_vec(),
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.pdf");
        let err = download_to(&client(), &url, &path).await.unwrap_err();

        assert!(matches!(err, MenuError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn refused_connection_removes_partial_file() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.pdf");
        let err = download_to(&client(), &format!("http://{addr}/menu.pdf"), &path)
            .await
            .unwrap_err();

        assert!(matches!(err, MenuError::Transport { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("menu.pdf");
        let err = download_to(&client(), "http://127.0.0.1:9/menu.pdf", &path)
            .await
            .unwrap_err();
        assert!(matches!(err, MenuError::Io { .. }));
    }
}
