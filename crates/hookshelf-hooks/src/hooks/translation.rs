//! use_translation
//!
//! Translations are nested JSON objects per language. Keys are looked up by
//! dotted path (`"greeting.morning"`) in the current language, then in the
//! fallback language, and finally the key itself is returned.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use super::storage::{UseStorage, use_local_storage};

/// Language code to translation tree
pub type Translations = BTreeMap<String, Value>;

/// `localStorage` key for the current language
pub const LANGUAGE_STORAGE_KEY: &str = "language";
/// `localStorage` key for the fallback language
pub const FALLBACK_LANGUAGE_STORAGE_KEY: &str = "fallbackLanguage";
/// Language used when nothing is stored
pub const DEFAULT_LANGUAGE: &str = "en";

/// Translation lookup bound to the persisted language settings
#[derive(Debug, Clone)]
pub struct UseTranslation {
	language: UseStorage<String>,
	fallback_language: UseStorage<String>,
	translations: Rc<Translations>,
}

fn lookup<'a>(translations: &'a Translations, language: &str, key: &str) -> Option<&'a Value> {
	key.split('.')
		.try_fold(translations.get(language)?, |node, segment| node.get(segment))
}

fn leaf_text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}

impl UseTranslation {
	/// Current language (tracked)
	pub fn language(&self) -> String {
		self.language
			.get()
			.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
	}

	/// Fallback language (tracked)
	pub fn fallback_language(&self) -> String {
		self.fallback_language
			.get()
			.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
	}

	/// Switches the current language and persists the choice.
	pub fn set_language(&self, language: impl Into<String>) {
		self.language.set(language.into());
	}

	/// Switches the fallback language and persists the choice.
	pub fn set_fallback_language(&self, language: impl Into<String>) {
		self.fallback_language.set(language.into());
	}

	/// Translates `key` (tracked: re-read when a language changes).
	///
	/// Only text, number and boolean leaves count as translations.
	pub fn t(&self, key: &str) -> String {
		[self.language(), self.fallback_language()]
			.iter()
			.find_map(|language| lookup(&self.translations, language, key).and_then(leaf_text))
			.unwrap_or_else(|| key.to_string())
	}
}

/// Creates a translator over `translations`.
///
/// # Example
///
/// ```ignore
/// let translations = Translations::from([
///     ("en".into(), json!({"hi": "Hi", "bye": "Bye"})),
///     ("sp".into(), json!({"hi": "Hola"})),
/// ]);
/// let i18n = use_translation(translations);
/// i18n.set_language("sp");
/// assert_eq!(i18n.t("hi"), "Hola");
/// assert_eq!(i18n.t("bye"), "Bye");
/// ```
pub fn use_translation(translations: Translations) -> UseTranslation {
	UseTranslation {
		language: use_local_storage(LANGUAGE_STORAGE_KEY, Some(DEFAULT_LANGUAGE.to_string())),
		fallback_language: use_local_storage(
			FALLBACK_LANGUAGE_STORAGE_KEY,
			Some(DEFAULT_LANGUAGE.to_string()),
		),
		translations: Rc::new(translations),
	}
}
