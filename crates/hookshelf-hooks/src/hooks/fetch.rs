//! use_fetch

use serde_json::Value;

use super::async_state::{UseAsync, use_async};
use crate::error::HookError;
use crate::platform;

/// Request options for [`use_fetch`]
///
/// Defaults to a `GET` with a `Content-Type: application/json` header.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
	/// HTTP method
	pub method: String,
	/// Request headers, in order
	pub headers: Vec<(String, String)>,
	/// Request body
	pub body: Option<String>,
}

impl Default for FetchOptions {
	fn default() -> Self {
		Self {
			method: "GET".to_string(),
			headers: vec![("Content-Type".to_string(), "application/json".to_string())],
			body: None,
		}
	}
}

impl FetchOptions {
	/// Creates the default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the HTTP method.
	pub fn method(mut self, method: impl Into<String>) -> Self {
		self.method = method.into();
		self
	}

	/// Sets a header, replacing any existing header with the same name.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let name = name.into();
		self.headers
			.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
		self.headers.push((name, value.into()));
		self
	}

	/// Sets the request body.
	pub fn body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());
		self
	}

	/// Value of the header `name`, compared case-insensitively
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(existing, _)| existing.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

async fn fetch_json(url: String, options: FetchOptions) -> Result<Value, HookError> {
	let response = platform::fetch(url, options).await?;
	if response.ok() {
		return Ok(serde_json::from_str(&response.body)?);
	}
	let body = serde_json::from_str(&response.body).unwrap_or(Value::String(response.body));
	Err(HookError::Fetch {
		status: response.status,
		body,
	})
}

/// Requests `url()` and parses the response as JSON.
///
/// The request is made on mount and again whenever `deps` changes. `url` is
/// called untracked before each request, so it can build the address from
/// the same signals `deps` reads. A non-2xx
/// response becomes [`HookError::Fetch`] with the status and the error body
/// (parsed as JSON, or kept as a string).
///
/// # Example
///
/// ```ignore
/// let id = Signal::new(1);
/// let todo = use_fetch(
///     { let id = id.clone(); move || format!("https://jsonplaceholder.typicode.com/todos/{}", id.get()) },
///     FetchOptions::default(),
///     { let id = id.clone(); move || id.get() },
/// );
/// ```
pub fn use_fetch<U, D, C>(url: U, options: FetchOptions, deps: D) -> UseAsync<Value, HookError>
where
	U: Fn() -> String + 'static,
	D: Fn() -> C + 'static,
	C: PartialEq + 'static,
{
	use_async(
		move || {
			let url = url();
			crate::debug_log!("use_fetch: {} {}", options.method, url);
			fetch_json(url, options.clone())
		},
		deps,
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{flush, mock_fetch, requests, reset};
	use crate::{Signal, mount};
	use rstest::rstest;
	use serde_json::json;
	use serial_test::serial;

	const URL: &str = "https://api.example.com/todos/1";

	#[test]
	#[serial]
	fn test_success_parses_json() {
		reset();
		mock_fetch(URL, 200, r#"{"id":1,"title":"write tests"}"#);

		let (_scope, todo) =
			mount(|| use_fetch(|| URL.to_string(), FetchOptions::default(), || ()));
		assert!(todo.loading());
		flush();

		assert_eq!(todo.value(), Some(json!({"id": 1, "title": "write tests"})));
		let sent = requests();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].1.method, "GET");
		assert_eq!(sent[0].1.header_value("content-type"), Some("application/json"));
	}

	#[rstest]
	#[case(404, r#"{"error":"not found"}"#, json!({"error": "not found"}))]
	#[case(500, "Internal Server Error", json!("Internal Server Error"))]
	#[serial]
	fn test_error_status_keeps_body(#[case] status: u16, #[case] body: &str, #[case] expected: Value) {
		reset();
		mock_fetch(URL, status, body);

		let (_scope, todo) =
			mount(|| use_fetch(|| URL.to_string(), FetchOptions::default(), || ()));
		flush();

		assert_eq!(todo.error(), Some(HookError::Fetch { status, body: expected }));
	}

	#[test]
	#[serial]
	fn test_unreachable_url_is_network_error() {
		reset();
		let (_scope, todo) = mount(|| {
			use_fetch(
				|| "https://nowhere.invalid/".to_string(),
				FetchOptions::default(),
				|| (),
			)
		});
		flush();

		assert!(matches!(todo.error(), Some(HookError::Network(_))));
	}

	#[test]
	#[serial]
	fn test_options_are_sent() {
		reset();
		mock_fetch(URL, 201, "{}");
		let options = FetchOptions::new()
			.method("POST")
			.header("content-type", "text/plain")
			.body("hello");

		let (_scope, _todo) = mount(move || use_fetch(|| URL.to_string(), options, || ()));
		flush();

		let sent_requests = requests();
		let (url, sent) = &sent_requests[0];
		assert_eq!(url, URL);
		assert_eq!(sent.method, "POST");
		assert_eq!(sent.headers, vec![("content-type".to_string(), "text/plain".to_string())]);
		assert_eq!(sent.body.as_deref(), Some("hello"));
	}

	#[test]
	#[serial]
	fn test_refetch_follows_url_built_from_deps() {
		reset();
		mock_fetch(URL, 200, r#"{"id":1}"#);
		mock_fetch("https://api.example.com/todos/2", 200, r#"{"id":2}"#);
		let id = Signal::new(1);

		let (_scope, todo) = mount({
			let id = id.clone();
			move || {
				use_fetch(
					{
						let id = id.clone();
						move || format!("https://api.example.com/todos/{}", id.get())
					},
					FetchOptions::default(),
					move || id.get(),
				)
			}
		});
		flush();
		assert_eq!(todo.value(), Some(json!({"id": 1})));

		id.set(2);
		flush();

		let urls: Vec<String> = requests().into_iter().map(|(url, _)| url).collect();
		assert_eq!(urls, vec![URL, "https://api.example.com/todos/2"]);
		assert_eq!(todo.value(), Some(json!({"id": 2})));
	}
}
