use staticd::http::parser::{ParseError, parse_http_request};
use staticd::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.host, "example.com");
    assert!(!parsed.close);
    assert!(parsed.headers.is_empty());
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.host, "example.com");
    assert_eq!(parsed.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
    assert!(!parsed.headers.contains_key("Host"));
}

#[test]
fn test_parse_header_keys_are_canonicalized() {
    let req = b"GET / HTTP/1.1\r\nhost: a\r\ncontent-TYPE: text/plain\r\nx-my-header:   v\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.host, "a");
    assert_eq!(parsed.headers.get("Content-Type").unwrap(), "text/plain");
    assert_eq!(parsed.headers.get("X-My-Header").unwrap(), "v");
}

#[test]
fn test_parse_header_value_keeps_colons() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:8080\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.host, "localhost:8080");
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let req = b"GET / HTTP/1.1\r\nHost: a\r\nAccept: one\r\naccept: two\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("Accept").unwrap(), "two");
}

#[test]
fn test_parse_connection_close() {
    let req = b"GET / HTTP/1.1\r\nHost: a\r\nConnection: Close\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert!(parsed.close);
    assert!(!parsed.headers.contains_key("Connection"));
}

#[test]
fn test_parse_connection_other_value_does_not_close() {
    let req = b"GET / HTTP/1.1\r\nHost: a\r\nConnection: keep-alive\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert!(!parsed.close);
    assert!(!parsed.headers.contains_key("Connection"));
}

#[test]
fn test_parse_leaves_pipelined_bytes() {
    let first = b"GET /a HTTP/1.1\r\nHost: x\r\n\r\n";
    let mut buf = first.to_vec();
    buf.extend_from_slice(b"GET /b HTTP/1.1\r\nHost: x\r\n\r\n");

    let (parsed, consumed) = parse_http_request(&buf).unwrap();
    assert_eq!(parsed.path, "/a");
    assert_eq!(consumed, first.len());

    let (second, _) = parse_http_request(&buf[consumed..]).unwrap();
    assert_eq!(second.path, "/b");
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_incomplete_request_line() {
    let result = parse_http_request(b"GET / HTTP/1");

    assert!(matches!(result, Err(ParseError::Incomplete)));
}

#[test]
fn test_parse_unsupported_method() {
    for method in ["POST", "HEAD", "get", "DELETE"] {
        let req = format!("{} / HTTP/1.1\r\nHost: a\r\n\r\n", method);
        let result = parse_http_request(req.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::UnsupportedMethod(method.to_string()));
    }
}

#[test]
fn test_parse_wrong_token_count() {
    for line in ["GET /", "GET / HTTP/1.1 extra", "GET  / HTTP/1.1", ""] {
        let req = format!("{}\r\nHost: a\r\n\r\n", line);
        let result = parse_http_request(req.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::MalformedRequestLine, "line {:?}", line);
    }
}

#[test]
fn test_parse_target_must_be_absolute() {
    let result = parse_http_request(b"GET index.html HTTP/1.1\r\nHost: a\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidTarget(_))));
}

#[test]
fn test_parse_wrong_version() {
    for version in ["HTTP/1.0", "HTTP/2", "http/1.1"] {
        let req = format!("GET / {}\r\nHost: a\r\n\r\n", version);
        let result = parse_http_request(req.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::UnsupportedVersion(version.to_string()));
    }
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";
    let result = parse_http_request(req);

    assert!(matches!(result, Err(ParseError::MalformedHeader(_))));
}

#[test]
fn test_parse_header_key_with_invalid_characters() {
    for line in ["Bad Key: v", "Bad_Key: v", "Bad.Key: v", ": v"] {
        let req = format!("GET / HTTP/1.1\r\nHost: a\r\n{}\r\n\r\n", line);
        let result = parse_http_request(req.as_bytes());
        assert!(matches!(result, Err(ParseError::MalformedHeader(_))), "line {:?}", line);
    }
}

#[test]
fn test_parse_malformed_header_detected_before_blank_line() {
    let result = parse_http_request(b"GET / HTTP/1.1\r\nnocolon\r\n");

    assert!(matches!(result, Err(ParseError::MalformedHeader(_))));
}

#[test]
fn test_parse_missing_host() {
    let result = parse_http_request(b"GET / HTTP/1.1\r\nAccept: */*\r\n\r\n");

    assert_eq!(result.unwrap_err(), ParseError::MissingHost);
}

#[test]
fn test_parse_empty_host_counts_as_missing() {
    let result = parse_http_request(b"GET / HTTP/1.1\r\nHost:\r\n\r\n");

    assert_eq!(result.unwrap_err(), ParseError::MissingHost);
}

#[test]
fn test_parse_missing_host_needs_full_head() {
    // Without the blank line the request may still be in flight.
    let result = parse_http_request(b"GET / HTTP/1.1\r\nAccept: */*\r\n");

    assert_eq!(result.unwrap_err(), ParseError::Incomplete);
}

#[test]
fn test_parse_keeps_query_in_path() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/search?q=rust");
}
