//! Transcript logging for GraphQL exchanges.
//!
//! Each exchange becomes one JSON line holding the operation label, the HTTP
//! status, the redacted request body and a truncated response body.

use log::warn;
use serde_json::json;

use super::GraphQLClient;
use super::HttpResponse;
use super::helpers::{BODY_SNIPPET_LEN, redacted, snippet};

impl GraphQLClient {
    /// Write the request and response to the transcript if enabled.
    pub(super) fn log_transcript(
        &self,
        payload: &serde_json::Value,
        operation: &str,
        resp: &HttpResponse,
    ) {
        let Some(t) = &self.transcript else {
            return;
        };
        let line = match serde_json::to_string(&json!({
            "operation": operation,
            "status": resp.status,
            "request": redacted(payload),
            "response": snippet(&resp.body, BODY_SNIPPET_LEN)
        })) {
            Ok(line) => line,
            Err(e) => {
                warn!("failed to serialise transcript entry for op={operation}: {e}");
                return;
            }
        };
        use std::io::Write as _;
        match t.lock() {
            Ok(mut f) => {
                if let Err(e) = writeln!(f, "{line}") {
                    warn!("failed to write transcript for op={operation}: {e}");
                    return;
                }
                if let Err(e) = f.flush() {
                    warn!("failed to flush transcript for op={operation}: {e}");
                }
            }
            Err(e) => {
                warn!("failed to lock transcript for op={operation}: {e}");
            }
        }
    }
}
