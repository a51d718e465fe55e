//! Helpers for inspecting GraphQL responses

#![allow(dead_code)]

use async_graphql::Response;
use serde_json::Value;

/// The `data` member of a response as JSON
pub fn data(response: &Response) -> Value {
    response
        .data
        .clone()
        .into_json()
        .expect("response data is valid JSON")
}

/// `extensions.code` of every error in the response, in order
pub fn error_codes(response: &Response) -> Vec<String> {
    response
        .errors
        .iter()
        .map(|error| {
            error
                .extensions
                .as_ref()
                .and_then(|extensions| extensions.get("code"))
                .and_then(|code| match code {
                    async_graphql::Value::String(code) => Some(code.clone()),
                    _ => None,
                })
                .unwrap_or_default()
        })
        .collect()
}

/// Assert that a response carries no errors, printing them otherwise
#[macro_export]
macro_rules! assert_no_errors {
    ($response:expr) => {
        assert!(
            $response.errors.is_empty(),
            "unexpected GraphQL errors: {:?}",
            $response.errors
        );
    };
}
