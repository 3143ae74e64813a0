use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::http::request::{Request, canonical_header_key};
use crate::static_files::ResolvedFile;

pub const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes the server emits.
///
/// - `Ok` (200): the requested file is served
/// - `BadRequest` (400): malformed or truncated request
/// - `NotFound` (404): nothing servable at the requested path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// The body is never held in memory: `body` names the file whose contents
/// are streamed after the head.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Protocol version for the status line
    pub version: String,
    /// Headers keyed by canonical name, iterated in sorted order
    pub headers: BTreeMap<String, String>,
    /// File to stream as the body, if any
    pub body: Option<PathBuf>,
    /// The valid request this answers; `None` for a 400
    pub request: Option<Request>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::NotFound)
///     .date(SystemTime::now())
///     .header("Connection", "close")
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: BTreeMap<String, String>,
    body: Option<PathBuf>,
    request: Option<Request>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: None,
            request: None,
        }
    }

    /// Adds or replaces a header. The key is stored in canonical form.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(canonical_header_key(key), value.into());
        self
    }

    /// Sets the `Date` header.
    pub fn date(self, now: SystemTime) -> Self {
        self.header("Date", http_date(now))
    }

    /// Sets `Connection: close` when `close` is true.
    pub fn close(self, close: bool) -> Self {
        if close {
            self.header("Connection", "close")
        } else {
            self
        }
    }

    pub fn body_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.body = Some(path.into());
        self
    }

    pub fn request(mut self, request: Request) -> Self {
        self.request = Some(request);
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            version: HTTP_VERSION.to_string(),
            headers: self.headers,
            body: self.body,
            request: self.request,
        }
    }
}

impl Response {
    /// Creates a 200 OK response streaming `file`.
    pub fn ok(request: Request, file: &ResolvedFile, content_type: &str) -> Self {
        Self::ok_at(request, file, content_type, SystemTime::now())
    }

    pub fn ok_at(
        request: Request,
        file: &ResolvedFile,
        content_type: &str,
        now: SystemTime,
    ) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .date(now)
            .header("Last-Modified", http_date(file.modified))
            .header("Content-Type", content_type)
            .header("Content-Length", file.size.to_string())
            .close(request.close)
            .body_file(file.path.clone())
            .request(request)
            .build()
    }

    /// Creates a 400 Bad Request response. It always closes the connection.
    pub fn bad_request() -> Self {
        Self::bad_request_at(SystemTime::now())
    }

    pub fn bad_request_at(now: SystemTime) -> Self {
        ResponseBuilder::new(StatusCode::BadRequest)
            .date(now)
            .close(true)
            .build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found(request: Request) -> Self {
        Self::not_found_at(request, SystemTime::now())
    }

    pub fn not_found_at(request: Request, now: SystemTime) -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .date(now)
            .close(request.close)
            .request(request)
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_key(key))
            .map(|v| v.as_str())
    }

    /// Whether the connection must be closed once this response is sent.
    pub fn closes_connection(&self) -> bool {
        self.header("Connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"))
    }

    /// Declared body length, zero when there is no body.
    pub fn content_length(&self) -> u64 {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}

/// Formats a timestamp as an HTTP date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
///
/// Times before the Unix epoch are formatted as the epoch.
pub fn http_date(time: SystemTime) -> String {
    httpdate::fmt_http_date(time.max(SystemTime::UNIX_EPOCH))
}
