use crate::http::request::{Method, Request, canonical_header_key};
use std::collections::HashMap;

/// Upper bound on the size of a request head (request line plus headers).
pub const MAX_HEAD_BYTES: usize = 8 * 1024;

const SUPPORTED_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// More bytes are needed before a decision can be made.
    #[error("incomplete request")]
    Incomplete,
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error("invalid request target: {0}")]
    InvalidTarget(String),
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(String),
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    #[error("missing Host")]
    MissingHost,
    #[error("request head too large")]
    HeadTooLarge,
}

/// Parses one request head from the front of `buf`.
///
/// On success returns the request and the number of bytes it occupied,
/// so that pipelined bytes after it stay in the buffer. Lines are checked
/// as soon as their CRLF has arrived; `ParseError::Incomplete` means every
/// complete line so far was valid but the blank line has not been seen.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let line_end = find_crlf(buf).ok_or_else(|| incomplete(buf.len()))?;
    let (method, path, version) = parse_request_line(&buf[..line_end])?;

    let mut pos = line_end + 2;
    let mut host = None;
    let mut close = false;
    let mut headers = HashMap::new();

    loop {
        let rel = find_crlf(&buf[pos..]).ok_or_else(|| incomplete(buf.len()))?;
        let line = &buf[pos..pos + rel];
        pos += rel + 2;

        if pos > MAX_HEAD_BYTES {
            return Err(ParseError::HeadTooLarge);
        }
        if line.is_empty() {
            break;
        }

        let (key, value) = parse_header_line(line)?;
        // Duplicates: the last occurrence wins.
        match key.as_str() {
            "Host" => host = Some(value),
            "Connection" => close = value.trim_end().eq_ignore_ascii_case("close"),
            _ => {
                headers.insert(key, value);
            }
        }
    }

    let host = host
        .filter(|h| !h.trim().is_empty())
        .ok_or(ParseError::MissingHost)?;

    let request = Request {
        method,
        path,
        version,
        host,
        close,
        headers,
    };

    Ok((request, pos))
}

fn incomplete(buffered: usize) -> ParseError {
    if buffered >= MAX_HEAD_BYTES {
        ParseError::HeadTooLarge
    } else {
        ParseError::Incomplete
    }
}

fn parse_request_line(line: &[u8]) -> Result<(Method, String, String), ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::MalformedRequestLine)?;

    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts[..] else {
        return Err(ParseError::MalformedRequestLine);
    };

    let method =
        Method::from_str(method).ok_or_else(|| ParseError::UnsupportedMethod(method.to_string()))?;

    if !target.starts_with('/') {
        return Err(ParseError::InvalidTarget(target.to_string()));
    }
    if version != SUPPORTED_VERSION {
        return Err(ParseError::UnsupportedVersion(version.to_string()));
    }

    Ok((method, target.to_string(), version.to_string()))
}

fn parse_header_line(line: &[u8]) -> Result<(String, String), ParseError> {
    let line = std::str::from_utf8(line)
        .map_err(|_| ParseError::MalformedHeader(String::from_utf8_lossy(line).into_owned()))?;

    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;

    let key = key.trim();
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(ParseError::MalformedHeader(line.to_string()));
    }

    Ok((canonical_header_key(key), value.trim_start().to_string()))
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
