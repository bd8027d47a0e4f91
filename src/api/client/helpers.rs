//! Helper utilities for GraphQL request handling.

use log::warn;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT,
};
use serde::Serialize;
use serde_json::{Map, Value, json};

use super::types::{GraphQLError, Query};
use crate::JobBoardError;
use crate::auth::Session;

/// Maximum number of characters to keep when logging response body snippets.
pub(super) const BODY_SNIPPET_LEN: usize = 500;
/// Maximum number of characters to keep when logging request payload snippets.
pub(super) const REQUEST_SNIPPET_LEN: usize = 1024;
/// Maximum number of characters to keep when logging individual value snippets.
pub(super) const VALUE_SNIPPET_LEN: usize = 200;

/// Trim `text` to `max` characters, appending `...` when truncated.
///
/// Returns an empty string when `max` is zero.
pub(super) fn snippet(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out = text.chars().take(max).collect::<String>();
        out.push_str("...");
        out
    }
}

/// Recursively redact sensitive values from a JSON structure.
fn redact_sensitive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (k, v) in map.iter_mut() {
                if matches!(
                    k.to_ascii_lowercase().as_str(),
                    "token"
                        | "authorization"
                        | "password"
                        | "secret"
                        | "access_token"
                        | "accesstoken"
                        | "refresh_token"
                        | "api_key"
                        | "apikey"
                        | "bearer"
                        | "credentials"
                ) {
                    *v = Value::String("<redacted>".into());
                } else {
                    redact_sensitive(v);
                }
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(redact_sensitive),
        _ => {}
    }
}

/// Clone `payload` with sensitive fields replaced by `<redacted>`.
pub(super) fn redacted(payload: &Value) -> Value {
    let mut copy = payload.clone();
    redact_sensitive(&mut copy);
    copy
}

/// Build a snippet of the redacted GraphQL payload.
pub(super) fn payload_snippet(payload: &Value) -> String {
    let json = match serde_json::to_string(&redacted(payload)) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to serialise redacted payload: {e}");
            "<failed to serialise payload>".into()
        }
    };
    snippet(&json, REQUEST_SNIPPET_LEN)
}

/// Extract the operation name from a GraphQL document.
///
/// Returns `None` when the input does not begin with a recognised operation
/// keyword or when the operation is anonymous.
pub(super) fn operation_name(query: &str) -> Option<&str> {
    let trimmed = query.trim_start();
    for prefix in ["query", "mutation", "subscription"] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            // "queryX" is not the keyword followed by a name.
            let first = rest.chars().next();
            let is_delim =
                matches!(first, Some(ch) if matches!(ch, '{' | '(' | ' ' | '\n' | '\t' | '\r'));
            if !is_delim {
                continue;
            }
            let name = rest
                .trim_start()
                .split(|c: char| c.is_whitespace() || c == '(' || c == '{')
                .next()
                .filter(|s| !s.is_empty());
            if let Some(name) = name {
                return Some(name);
            }
        }
    }
    None
}

/// Label used for an operation in logs, transcripts and errors.
pub(super) fn operation_label(query: &Query) -> String {
    operation_name(query.as_str()).map_or_else(
        || snippet(query.as_str().trim(), 64),
        str::to_string,
    )
}

/// Convert GraphQL errors into a single newline-joined error.
pub(super) fn handle_graphql_errors(errors: Vec<GraphQLError>) -> JobBoardError {
    let msg = errors
        .into_iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("\n");
    JobBoardError::GraphQl(msg.into())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the `{query, variables}` request body.
///
/// Variables serialising to `null` (such as `()`) are sent as `{}`.
pub(super) fn build_payload<V>(query: &Query, variables: V) -> Result<Value, JobBoardError>
where
    V: Serialize,
{
    let variables = serde_json::to_value(variables).map_err(|e| {
        JobBoardError::InvalidVariables(format!("serialising variables: {e}").into())
    })?;
    let variables = match variables {
        Value::Null => Value::Object(Map::new()),
        obj @ Value::Object(_) => obj,
        other => {
            return Err(JobBoardError::InvalidVariables(
                format!(
                    "variables must be a JSON object, got {}",
                    json_type(&other)
                )
                .into(),
            ));
        }
    };
    Ok(json!({ "query": query.as_str(), "variables": variables }))
}

/// Build request headers, adding the bearer token when a user is signed in.
pub(super) fn build_headers(session: &dyn Session) -> Result<HeaderMap, JobBoardError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("jobboard"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = session.current_token().filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(JobBoardError::InvalidToken)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::{
        GraphQLError, Query, build_headers, build_payload, handle_graphql_errors,
        operation_label, operation_name, payload_snippet, snippet,
    };
    use crate::JobBoardError;
    use crate::api::Token;
    use crate::auth::{Anonymous, Session, SessionStore, TokenSession};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use rstest::rstest;
    use serde_json::json;

    fn gql_error(message: &str) -> GraphQLError {
        GraphQLError {
            message: message.to_string(),
        }
    }

    #[rstest]
    #[case("", 3, "")]
    #[case("abc", 0, "")]
    #[case("abc", 3, "abc")]
    #[case("abcd", 3, "abc...")]
    #[case("žžž", 2, "žž...")]
    fn snippet_cases(#[case] text: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(snippet(text, max), expected);
    }

    #[rstest]
    #[case("query JobQuery($id: ID!) { job(id: $id) { id } }", Some("JobQuery"))]
    #[case("\n  mutation CreateJob($input: CreateJobInput) {", Some("CreateJob"))]
    #[case("query jobsQuery { jobs { id } }", Some("jobsQuery"))]
    #[case("query { jobs { id } }", None)]
    #[case("queryJobs { jobs { id } }", None)]
    #[case("{ jobs { id } }", None)]
    fn operation_name_cases(#[case] query: &str, #[case] expected: Option<&str>) {
        assert_eq!(operation_name(query), expected);
    }

    #[test]
    fn operation_label_falls_back_to_query_text() {
        assert_eq!(operation_label(&Query::from("  { jobs { id } }")), "{ jobs { id } }");
    }

    #[test]
    fn graphql_errors_join_with_newlines() {
        let err = handle_graphql_errors(vec![gql_error("A"), gql_error("B")]);
        assert_eq!(err.to_string(), "A\nB");
    }

    #[test]
    fn single_graphql_error_is_the_message() {
        let err = handle_graphql_errors(vec![gql_error("X")]);
        assert_eq!(err.to_string(), "X");
    }

    #[test]
    fn payload_has_exactly_query_and_variables() {
        let payload = build_payload(&Query::from("query { jobs { id } }"), json!({"id": "7"}))
            .expect("payload");
        assert_eq!(
            payload,
            json!({"query": "query { jobs { id } }", "variables": {"id": "7"}})
        );
    }

    #[test]
    fn unit_variables_become_empty_object() {
        let payload = build_payload(&Query::from("query { jobs { id } }"), ()).expect("payload");
        assert_eq!(payload.get("variables"), Some(&json!({})));
    }

    #[rstest]
    #[case(json!([1, 2]), "array")]
    #[case(json!("id"), "string")]
    #[case(json!(3), "number")]
    fn non_object_variables_are_rejected(#[case] vars: serde_json::Value, #[case] kind: &str) {
        let err = build_payload(&Query::from("query { jobs { id } }"), vars).expect_err("reject");
        match err {
            JobBoardError::InvalidVariables(msg) => assert!(msg.contains(kind), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn payload_snippet_redacts_sensitive_fields() {
        let payload = json!({
            "query": "mutation { signIn }",
            "variables": {
                "password": "hunter2",
                "nested": { "token": "tok-123" },
                "input": { "title": "Engineer" }
            }
        });
        let snip = payload_snippet(&payload);
        assert!(!snip.contains("hunter2"));
        assert!(!snip.contains("tok-123"));
        assert!(snip.contains("Engineer"));
        assert!(snip.contains("<redacted>"));
    }

    #[test]
    fn anonymous_headers_omit_authorization() {
        let headers = build_headers(&Anonymous).expect("headers");
        assert!(!headers.contains_key(AUTHORIZATION));
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn signed_in_headers_carry_bearer_token() {
        let headers = build_headers(&TokenSession::new("abc123")).expect("headers");
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .expect("authorization header");
        assert_eq!(auth, "Bearer abc123");
    }

    /// Claims to be signed in while holding no token.
    struct EmptyTokenSession;

    impl Session for EmptyTokenSession {
        fn is_logged_in(&self) -> bool {
            true
        }

        fn access_token(&self) -> Token {
            Token::new("")
        }
    }

    #[test]
    fn empty_token_sends_no_authorization() {
        let headers = build_headers(&EmptyTokenSession).expect("headers");
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn concurrent_sign_out_never_yields_empty_bearer() {
        let store = Arc::new(SessionStore::new());
        let stop = Arc::new(AtomicBool::new(false));
        let toggler = {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    store.sign_in("tok");
                    store.sign_out();
                }
            })
        };
        for _ in 0..200_000 {
            let headers = build_headers(store.as_ref()).expect("headers");
            if let Some(value) = headers.get(AUTHORIZATION) {
                assert_eq!(value.to_str().expect("ascii header"), "Bearer tok");
            }
        }
        stop.store(true, Ordering::Relaxed);
        toggler.join().expect("toggler thread");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = build_headers(&TokenSession::new("bad\ntoken")).expect_err("invalid token");
        assert!(matches!(err, JobBoardError::InvalidToken(_)));
    }
}
