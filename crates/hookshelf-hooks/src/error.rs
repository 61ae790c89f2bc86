//! Error types shared by the platform layer and the hooks.

use thiserror::Error;

/// Failure reported by a browser capability
///
/// Hooks never propagate these to the caller. They either keep the error as
/// state (fetch, geolocation, script loading, clipboard) or log it and carry
/// on (storage writes).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HookError {
	/// The API does not exist in this environment
	#[error("{0} is not available")]
	Unavailable(&'static str),

	/// A storage area rejected a read or write
	#[error("storage error: {0}")]
	Storage(String),

	/// A value could not be converted to or from JSON
	#[error("serialization error: {0}")]
	Serialization(String),

	/// The server answered with a non-2xx status
	#[error("request failed with status {status}")]
	Fetch {
		/// HTTP status code
		status: u16,
		/// Response body, parsed as JSON when possible
		body: serde_json::Value,
	},

	/// The request never produced a response
	#[error("network error: {0}")]
	Network(String),

	/// The clipboard write was rejected
	#[error("clipboard error: {0}")]
	Clipboard(String),

	/// `GeolocationPositionError`
	#[error("geolocation error {code}: {message}")]
	Geolocation {
		/// 1 = permission denied, 2 = position unavailable, 3 = timeout
		code: u16,
		/// Human readable description
		message: String,
	},

	/// A `<script>` fired its `error` event
	#[error("failed to load script {0}")]
	Script(String),

	/// Any other JavaScript exception
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<serde_json::Error> for HookError {
	fn from(err: serde_json::Error) -> Self {
		HookError::Serialization(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(HookError::Unavailable("navigator.clipboard"), "navigator.clipboard is not available")]
	#[case(
		HookError::Fetch { status: 404, body: serde_json::Value::Null },
		"request failed with status 404"
	)]
	#[case(
		HookError::Geolocation { code: 1, message: "User denied Geolocation".into() },
		"geolocation error 1: User denied Geolocation"
	)]
	#[case(
		HookError::Script("https://cdn.example/lib.js".into()),
		"failed to load script https://cdn.example/lib.js"
	)]
	fn test_display(#[case] error: HookError, #[case] expected: &str) {
		assert_eq!(error.to_string(), expected);
	}

	#[test]
	fn test_from_serde_json_error() {
		let err = serde_json::from_str::<u32>("not json").unwrap_err();
		let converted = HookError::from(err);
		assert!(matches!(converted, HookError::Serialization(_)));
	}
}
