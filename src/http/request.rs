use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// The server only serves GET; any other token on the request line is
/// rejected by the parser before a `Request` is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a supported method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("POST"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a validated HTTP request read off a connection.
///
/// `Host` and `Connection` are lifted into dedicated fields and never
/// appear in `headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The request target, always starting with `/`
    pub path: String,
    /// HTTP version, always "HTTP/1.1"
    pub version: String,
    /// Value of the mandatory `Host` header
    pub host: String,
    /// Set when the client sent `Connection: close`
    pub close: bool,
    /// Remaining headers keyed by canonical name
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Method,
    path: Option<String>,
    version: String,
    host: Option<String>,
    close: bool,
    headers: HashMap<String, String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            path: None,
            version: "HTTP/1.1".to_string(),
            host: None,
            close: false,
            headers: HashMap::new(),
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn close(mut self, close: bool) -> Self {
        self.close = close;
        self
    }

    /// Adds a header under its canonical name.
    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(canonical_header_key(key), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let path = self.path.ok_or("path missing")?;
        if !path.starts_with('/') {
            return Err("path must start with '/'");
        }
        Ok(Request {
            method: self.method,
            path,
            version: self.version,
            host: self.host.ok_or("host missing")?,
            close: self.close,
            headers: self.headers,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// The lookup key is canonicalized first, so `user-agent` and
    /// `User-Agent` find the same entry.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_key(key))
            .map(|v| v.as_str())
    }

    /// Whether the connection may stay open after responding.
    pub fn keep_alive(&self) -> bool {
        !self.close
    }
}

/// Returns the canonical form of a header name.
///
/// Each hyphen-separated segment gets an upper-case first letter and
/// lower-case remainder: `content-type` becomes `Content-Type`.
///
/// ```
/// # use staticd::http::request::canonical_header_key;
/// assert_eq!(canonical_header_key("host"), "Host");
/// assert_eq!(canonical_header_key("x-FORWARDED-for"), "X-Forwarded-For");
/// ```
pub fn canonical_header_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = true;
    for c in key.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}
