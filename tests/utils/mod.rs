//! Test utilities for running a stand-in GraphQL server.
//!
//! The server records every request (headers and JSON body) and answers with
//! whatever the installed handler returns, so tests can assert on the wire
//! format the client produced.

#![allow(dead_code, reason = "each test binary uses a subset of helpers")]

use assert_cmd::prelude::*;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{HeaderMap, Request, Response, StatusCode, body::Incoming, service::service_fn};
use hyper_util::rt::TokioIo;
use std::io::ErrorKind;
use std::{
    collections::VecDeque,
    net::SocketAddr,
    process::Command,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// A request as seen by the stand-in server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    /// Value of `name`, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Shared handler type invoked for each incoming request.
pub type Handler = Arc<Mutex<Box<dyn FnMut(&RecordedRequest) -> Response<Full<Bytes>> + Send>>>;

/// Every request received so far, in arrival order.
pub type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

/// Handle returned by [`start_mitm`] for shutting down the server.
pub struct ShutdownHandle {
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

/// Running stand-in server.
pub struct MockServer {
    pub addr: SocketAddr,
    pub handler: Handler,
    pub recorded: Recorded,
    pub shutdown: ShutdownHandle,
}

impl MockServer {
    /// GraphQL endpoint URL served by this instance.
    pub fn url(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    /// Snapshot of the requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().expect("lock recorded").clone()
    }

    /// Answer every request with `status` and `body`.
    pub fn respond_with(&self, status: StatusCode, body: impl Into<String>) {
        let body = body.into();
        *self.handler.lock().expect("lock handler") =
            Box::new(move |_req| json_response(status, body.clone()));
    }

    /// Answer each request with the next JSON body from `bodies`.
    pub fn respond_in_sequence(&self, bodies: impl Into<Vec<String>>) {
        let responses = Arc::new(Mutex::new(VecDeque::from(bodies.into())));
        *self.handler.lock().expect("lock handler") = Box::new(move |_req| {
            let body = responses
                .lock()
                .expect("lock responses")
                .pop_front()
                .expect("response");
            json_response(StatusCode::OK, body)
        });
    }
}

/// Build a response carrying `body` as JSON.
///
/// # Panics
///
/// Panics if the response cannot be built.
pub fn json_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::from(body.into()))
        .expect("build response")
}

/// Start an HTTP server forwarding requests to a shared handler.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
///
/// # Panics
///
/// Panics if the default response cannot be constructed.
pub async fn start_mitm() -> Result<MockServer, std::io::Error> {
    let handler: Handler = Arc::new(Mutex::new(Box::new(|_req| {
        Response::builder()
            .status(404)
            .body(Full::from("No handler"))
            .expect("failed to create default response")
    })));
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let handler_clone = handler.clone();
    let recorded_clone = recorded.clone();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let h = handler_clone.clone();
                        let rec = recorded_clone.clone();
                        let service = service_fn(move |req: Request<Incoming>| {
                            let h = h.clone();
                            let rec = rec.clone();
                            async move {
                                let (parts, body) = req.into_parts();
                                let bytes = body
                                    .collect()
                                    .await
                                    .map(|b| b.to_bytes())
                                    .unwrap_or_default();
                                let recorded = RecordedRequest {
                                    headers: parts.headers,
                                    body: serde_json::from_slice(&bytes)
                                        .unwrap_or(serde_json::Value::Null),
                                };
                                rec.lock().expect("lock recorded").push(recorded.clone());
                                let resp = {
                                    let mut f = h.lock().expect("lock handler in service");
                                    (f)(&recorded)
                                };
                                Ok::<_, std::convert::Infallible>(resp)
                            }
                        });
                        tokio::spawn(async move {
                            let _ = hyper::server::conn::http1::Builder::new()
                                .serve_connection(io, service)
                                .await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok(MockServer {
        addr,
        handler,
        recorded,
        shutdown: ShutdownHandle { join, stop: tx },
    })
}

/// Create a `jobboard` command pointed at `server` with a clean environment.
///
/// # Panics
///
/// Panics if the binary cannot be located.
pub fn jobboard_cmd(server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("jobboard").expect("binary");
    cmd.env("JOBBOARD_GRAPHQL_URL", server.url())
        .env_remove("JOBBOARD_TOKEN")
        .env_remove("JOBBOARD_CONFIG_PATH")
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "warn");
    cmd
}
