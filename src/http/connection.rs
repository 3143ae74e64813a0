use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::ServerContext;
use crate::static_files::resolve;

/// Outcome of one attempt to read a request off the stream.
#[derive(Debug)]
pub enum Frame {
    /// A complete, valid request.
    Request(Request),
    /// The peer closed before sending any byte of a new request.
    CleanEof,
    /// The deadline passed before any byte of a new request arrived.
    IdleTimeout,
    /// The deadline passed with part of a request buffered.
    PartialTimeout,
    /// The peer closed with part of a request buffered.
    Truncated,
    /// The bytes received do not form a valid request.
    Invalid(ParseError),
}

/// Why a connection was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    CleanEof,
    BadRequest,
    IdleTimeout,
    CloseRequested,
    WriteFailed,
}

pub enum ConnectionState {
    AwaitingRequest,
    Serving(Request),
    Writing(Response, Option<Termination>), // Some = close after writing
    Closed(Termination),
}

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    ctx: Arc<ServerContext>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, ctx: Arc<ServerContext>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::AwaitingRequest,
            ctx,
        }
    }

    /// Serves requests until one of the terminal transitions fires.
    ///
    /// Responses are written strictly in request order. The stream is
    /// shut down before returning; read errors are propagated.
    pub async fn run(&mut self) -> anyhow::Result<Termination> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::AwaitingRequest);
            self.state = match state {
                ConnectionState::AwaitingRequest => match self.read_frame().await? {
                    Frame::Request(req) => ConnectionState::Serving(req),
                    Frame::CleanEof => {
                        debug!("client closed connection");
                        ConnectionState::Closed(Termination::CleanEof)
                    }
                    Frame::IdleTimeout => {
                        debug!("connection idle, closing");
                        ConnectionState::Closed(Termination::IdleTimeout)
                    }
                    Frame::PartialTimeout => {
                        warn!("timed out with partial request");
                        Self::reject()
                    }
                    Frame::Truncated => {
                        warn!("client closed mid-request");
                        Self::reject()
                    }
                    Frame::Invalid(e) => {
                        warn!(error = %e, "bad request");
                        Self::reject()
                    }
                },

                ConnectionState::Serving(req) => {
                    let response = self.handle_request(req).await;
                    let after = response
                        .closes_connection()
                        .then_some(Termination::CloseRequested);
                    ConnectionState::Writing(response, after)
                }

                ConnectionState::Writing(response, after) => {
                    let mut writer = ResponseWriter::new(&response);
                    match writer.write_to_stream(&mut self.stream).await {
                        Ok(()) => match after {
                            Some(termination) => ConnectionState::Closed(termination),
                            None => ConnectionState::AwaitingRequest,
                        },
                        Err(e) => {
                            warn!(error = %e, "failed to write response");
                            ConnectionState::Closed(Termination::WriteFailed)
                        }
                    }
                }

                ConnectionState::Closed(termination) => {
                    if let Err(e) = self.stream.shutdown().await {
                        debug!(error = %e, "shutdown failed");
                    }
                    return Ok(termination);
                }
            };
        }
    }

    fn reject() -> ConnectionState {
        ConnectionState::Writing(Response::bad_request(), Some(Termination::BadRequest))
    }

    /// Reads the next request under a fresh idle deadline.
    ///
    /// Bytes already buffered from a pipelined client count as received.
    pub async fn read_frame(&mut self) -> anyhow::Result<Frame> {
        match tokio::time::timeout(self.ctx.idle_timeout, self.read_request()).await {
            Ok(frame) => frame,
            Err(_) if self.buffer.is_empty() => Ok(Frame::IdleTimeout),
            Err(_) => Ok(Frame::PartialTimeout),
        }
    }

    async fn read_request(&mut self) -> anyhow::Result<Frame> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Frame::Request(request));
                }
                Err(ParseError::Incomplete) => {}
                Err(e) => return Ok(Frame::Invalid(e)),
            }

            self.buffer.reserve(1024);
            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                return Ok(if self.buffer.is_empty() {
                    Frame::CleanEof
                } else {
                    Frame::Truncated
                });
            }
        }
    }

    async fn handle_request(&self, req: Request) -> Response {
        match resolve(&self.ctx.doc_root, &req.path).await {
            Ok(file) => {
                info!(method = %req.method, path = %req.path, status = 200, size = file.size, "served");
                let content_type = self.ctx.mime.lookup(file.extension());
                Response::ok(req, &file, content_type)
            }
            Err(cause) => {
                info!(method = %req.method, path = %req.path, status = 404, "served");
                debug!(%cause, "not found");
                Response::not_found(req)
            }
        }
    }
}
