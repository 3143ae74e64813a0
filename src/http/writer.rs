use std::path::PathBuf;

use anyhow::{Context, bail};
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Renders the status line and headers of `resp`, ending with the blank line.
///
/// Headers come out sorted by canonical name, so equal responses always
/// serialize to identical bytes.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // BTreeMap iterates in key order.
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
    body: Option<(PathBuf, u64)>,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_head(response),
            written: 0,
            body: response
                .body
                .clone()
                .map(|path| (path, response.content_length())),
        }
    }

    /// Writes the head, then streams the body file if there is one.
    ///
    /// Exactly `Content-Length` body bytes are sent; a file that has
    /// shrunk since it was resolved is an error.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                bail!("connection closed while writing");
            }

            self.written += n;
        }

        if let Some((path, len)) = &self.body {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            let copied = tokio::io::copy(&mut file.take(*len), stream).await?;
            if copied != *len {
                bail!(
                    "{} yielded {} of {} bytes",
                    path.display(),
                    copied,
                    len
                );
            }
        }

        stream.flush().await?;
        Ok(())
    }
}
