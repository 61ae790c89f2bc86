//! use_cookie
//!
//! Names and values are percent-encoded when written and decoded when read,
//! so any string round-trips through `document.cookie`.

use std::borrow::Cow;

use hookshelf_reactive::Signal;

use crate::platform;

/// `SameSite` cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
	/// Sent only with same-site requests
	Strict,
	/// Also sent on top-level navigations
	Lax,
	/// Sent with every request (requires `Secure`)
	None,
}

impl SameSite {
	fn as_str(self) -> &'static str {
		match self {
			SameSite::Strict => "Strict",
			SameSite::Lax => "Lax",
			SameSite::None => "None",
		}
	}
}

/// Attributes written along with a cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
	/// Lifetime in days; a session cookie when `None`
	pub days: Option<u32>,
	/// `Path` attribute
	pub path: String,
	/// `Domain` attribute
	pub domain: Option<String>,
	/// `Secure` flag
	pub secure: bool,
	/// `SameSite` attribute
	pub same_site: Option<SameSite>,
}

impl Default for CookieOptions {
	fn default() -> Self {
		Self {
			days: None,
			path: "/".to_string(),
			domain: None,
			secure: false,
			same_site: None,
		}
	}
}

impl CookieOptions {
	/// Sets the lifetime in days.
	pub fn days(mut self, days: u32) -> Self {
		self.days = Some(days);
		self
	}

	/// Sets the `Path` attribute.
	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Sets the `Domain` attribute.
	pub fn domain(mut self, domain: impl Into<String>) -> Self {
		self.domain = Some(domain.into());
		self
	}

	/// Sets the `Secure` flag.
	pub fn secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	/// Sets the `SameSite` attribute.
	pub fn same_site(mut self, same_site: SameSite) -> Self {
		self.same_site = Some(same_site);
		self
	}
}

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

fn cookie_string(name: &str, value: &str, options: &CookieOptions, max_age: Option<u64>) -> String {
	let mut cookie = format!(
		"{}={}",
		urlencoding::encode(name),
		urlencoding::encode(value)
	);
	if let Some(max_age) = max_age {
		cookie.push_str(&format!("; max-age={max_age}"));
	}
	cookie.push_str(&format!("; path={}", options.path));
	if let Some(domain) = &options.domain {
		cookie.push_str(&format!("; domain={domain}"));
	}
	if let Some(same_site) = options.same_site {
		cookie.push_str(&format!("; samesite={}", same_site.as_str()));
	}
	if options.secure {
		cookie.push_str("; secure");
	}
	cookie
}

fn decode(raw: &str) -> Cow<'_, str> {
	urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Reads cookie `name` from `document.cookie`.
pub fn read_cookie(name: &str) -> Option<String> {
	let jar = match platform::document_cookie() {
		Ok(jar) => jar,
		Err(err) => {
			crate::warn_log!("use_cookie: cannot read cookies: {}", err);
			return None;
		}
	};
	jar.split(';')
		.filter_map(|pair| pair.trim().split_once('='))
		.find(|(key, _)| decode(key) == name)
		.map(|(_, value)| decode(value).into_owned())
}

fn write_cookie(name: &str, value: &str, options: &CookieOptions, max_age: Option<u64>) {
	let cookie = cookie_string(name, value, options, max_age);
	if let Err(err) = platform::set_document_cookie(&cookie) {
		crate::warn_log!("use_cookie: cannot write {}: {}", name, err);
	}
}

/// A cookie bound to reactive state
#[derive(Debug, Clone)]
pub struct UseCookie {
	/// Current value; `None` after [`UseCookie::delete`]
	pub value: Signal<Option<String>>,
	name: String,
}

impl UseCookie {
	/// Writes the cookie with `options` and updates the value.
	pub fn update(&self, value: impl Into<String>, options: CookieOptions) {
		let value = value.into();
		let max_age = options.days.map(|days| u64::from(days) * SECONDS_PER_DAY);
		write_cookie(&self.name, &value, &options, max_age);
		self.value.set(Some(value));
	}

	/// Expires the cookie and sets the value to `None`.
	pub fn delete(&self) {
		write_cookie(&self.name, "", &CookieOptions::default(), Some(0));
		self.value.set(None);
	}

	/// The cookie name
	pub fn name(&self) -> &str {
		&self.name
	}
}

/// Binds cookie `name`, writing `default` on mount if the cookie is absent.
///
/// # Example
///
/// ```ignore
/// let theme = use_cookie("theme", "light");
/// theme.update("dark", CookieOptions::default().days(30));
/// ```
pub fn use_cookie(name: &str, default: &str) -> UseCookie {
	let initial = match read_cookie(name) {
		Some(existing) => existing,
		None => {
			write_cookie(name, default, &CookieOptions::default(), None);
			default.to_string()
		}
	};
	UseCookie {
		value: Signal::new(Some(initial)),
		name: name.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mount;
	use crate::testing::{cookie_jar, reset};
	use rstest::rstest;
	use serial_test::serial;

	#[test]
	#[serial]
	fn test_default_written_when_absent() {
		reset();
		let (_scope, cookie) = mount(|| use_cookie("name", "Kyle"));

		assert_eq!(cookie.value.get_untracked().as_deref(), Some("Kyle"));
		assert_eq!(cookie_jar().get("name").map(String::as_str), Some("Kyle"));
	}

	#[test]
	#[serial]
	fn test_existing_cookie_wins() {
		reset();
		platform::set_document_cookie("name=Sally; path=/").unwrap();
		let (_scope, cookie) = mount(|| use_cookie("name", "Kyle"));
		assert_eq!(cookie.value.get_untracked().as_deref(), Some("Sally"));
	}

	#[test]
	#[serial]
	fn test_update_and_delete() {
		reset();
		let (_scope, cookie) = mount(|| use_cookie("greeting", "hi"));

		cookie.update("hello world; bye", CookieOptions::default().days(7));
		assert_eq!(cookie.value.get_untracked().as_deref(), Some("hello world; bye"));
		assert_eq!(read_cookie("greeting").as_deref(), Some("hello world; bye"));

		cookie.delete();
		assert_eq!(cookie.value.get_untracked(), None);
		assert!(cookie_jar().get("greeting").is_none());
	}

	#[rstest]
	#[case(CookieOptions::default(), None, "a=b; path=/")]
	#[case(CookieOptions::default().days(1), Some(86_400), "a=b; max-age=86400; path=/")]
	#[case(
		CookieOptions::default()
			.path("/app")
			.domain("example.com")
			.same_site(SameSite::Strict)
			.secure(true),
		None,
		"a=b; path=/app; domain=example.com; samesite=Strict; secure"
	)]
	fn test_cookie_string(
		#[case] options: CookieOptions,
		#[case] max_age: Option<u64>,
		#[case] expected: &str,
	) {
		assert_eq!(cookie_string("a", "b", &options, max_age), expected);
	}
}
