//! use_copy_to_clipboard

use hookshelf_reactive::Signal;

use crate::platform;

/// Clipboard writer and the outcome of its last write
#[derive(Debug, Clone)]
pub struct UseCopyToClipboard {
	/// Text of the last successful copy
	pub value: Signal<Option<String>>,
	/// Outcome of the last copy; `None` before the first
	pub success: Signal<Option<bool>>,
}

impl UseCopyToClipboard {
	/// Writes `text` to the clipboard.
	///
	/// The write completes asynchronously; `success` reports the outcome and
	/// `value` is updated only when it succeeded.
	pub fn copy(&self, text: impl Into<String>) {
		let text = text.into();
		let value = self.value.clone();
		let success = self.success.clone();
		platform::spawn_local(async move {
			match platform::write_clipboard(text.clone()).await {
				Ok(()) => {
					value.set(Some(text));
					success.set(Some(true));
				}
				Err(err) => {
					crate::warn_log!("use_copy_to_clipboard: {}", err);
					success.set(Some(false));
				}
			}
		});
	}
}

/// Creates a clipboard writer.
pub fn use_copy_to_clipboard() -> UseCopyToClipboard {
	UseCopyToClipboard {
		value: Signal::new(None),
		success: Signal::new(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mount;
	use crate::testing::{clipboard_text, deny_clipboard, flush, reset};
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_copy_writes_and_reports() {
		reset();
		let (_scope, clipboard) = mount(use_copy_to_clipboard);
		assert_eq!(clipboard.success.get_untracked(), None);

		clipboard.copy("ABC123");
		flush();

		assert_eq!(clipboard_text().as_deref(), Some("ABC123"));
		assert_eq!(clipboard.value.get_untracked().as_deref(), Some("ABC123"));
		assert_eq!(clipboard.success.get_untracked(), Some(true));
	}

	#[test]
	#[serial]
	fn test_denied_write_reports_failure() {
		reset();
		deny_clipboard(true);
		let (_scope, clipboard) = mount(use_copy_to_clipboard);

		clipboard.copy("secret");
		flush();

		assert_eq!(clipboard_text(), None);
		assert_eq!(clipboard.value.get_untracked(), None);
		assert_eq!(clipboard.success.get_untracked(), Some(false));
	}
}
