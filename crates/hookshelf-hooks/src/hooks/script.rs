//! use_script

use super::async_state::{UseAsync, use_async};
use crate::error::HookError;
use crate::platform;

/// Loads an external script by appending a `<script src=url>` to the document.
///
/// The state settles when the element fires `load` (success) or `error`
/// ([`HookError::Script`]).
///
/// # Example
///
/// ```ignore
/// let jquery = use_script("https://code.jquery.com/jquery-3.6.0.min.js");
/// if !jquery.loading() && jquery.error().is_none() {
///     // the library is ready
/// }
/// ```
pub fn use_script(url: impl Into<String>) -> UseAsync<(), HookError> {
	let url = url.into();
	use_async(move || platform::load_script(url.clone()), || ())
}
