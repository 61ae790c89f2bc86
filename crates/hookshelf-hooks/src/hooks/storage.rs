//! Web Storage hooks: use_local_storage and use_session_storage
//!
//! The value is stored as JSON under a single key. It is read once on mount;
//! afterwards the hook writes through on every change. A failed write is
//! logged and otherwise ignored.

use hookshelf_reactive::Signal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::effect::use_effect;
use crate::platform::{self, StorageArea};

/// A value persisted in `localStorage` or `sessionStorage`
#[derive(Debug, Clone)]
pub struct UseStorage<T: 'static> {
	/// Current value; `None` means the key is absent
	pub value: Signal<Option<T>>,
	area: StorageArea,
	key: String,
}

impl<T: Clone + 'static> UseStorage<T> {
	/// Current value (tracked)
	pub fn get(&self) -> Option<T> {
		self.value.get()
	}

	/// Stores a new value.
	pub fn set(&self, value: T) {
		self.value.set(Some(value));
	}

	/// Deletes the key and sets the value to `None`.
	pub fn remove(&self) {
		self.value.set(None);
	}

	/// The storage key
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Which storage area the key lives in
	pub fn area(&self) -> StorageArea {
		self.area
	}
}

fn read<T: DeserializeOwned>(area: StorageArea, key: &str) -> Option<T> {
	let raw = match platform::storage_get(area, key) {
		Ok(raw) => raw?,
		Err(err) => {
			crate::warn_log!("{}: failed to read {}: {}", area.as_str(), key, err);
			return None;
		}
	};
	match serde_json::from_str(&raw) {
		Ok(value) => Some(value),
		Err(err) => {
			crate::warn_log!("{}: ignoring unparsable {}: {}", area.as_str(), key, err);
			None
		}
	}
}

fn write<T: Serialize>(area: StorageArea, key: &str, value: Option<&T>) {
	let result = match value {
		None => platform::storage_remove(area, key),
		Some(value) => serde_json::to_string(value)
			.map_err(Into::into)
			.and_then(|json| platform::storage_set(area, key, &json)),
	};
	if let Err(err) = result {
		crate::warn_log!("{}: failed to persist {}: {}", area.as_str(), key, err);
	}
}

/// Binds a value to `key` in the given storage area.
///
/// On mount the stored JSON wins over `default`; if the key is absent or
/// unparsable, `default` is used and written back.
pub fn use_storage<T>(area: StorageArea, key: &str, default: Option<T>) -> UseStorage<T>
where
	T: Serialize + DeserializeOwned + Clone + 'static,
{
	let initial = read(area, key).or(default);
	let storage = UseStorage {
		value: Signal::new(initial),
		area,
		key: key.to_string(),
	};

	use_effect({
		let storage = storage.clone();
		move || {
			storage
				.value
				.with(|value| write(storage.area, &storage.key, value.as_ref()));
		}
	});

	storage
}

/// [`use_storage`] on `window.localStorage`
///
/// # Example
///
/// ```ignore
/// let name = use_local_storage("name", Some("Kyle".to_string()));
/// name.set("Sally".into());
/// name.remove();
/// ```
pub fn use_local_storage<T>(key: &str, default: Option<T>) -> UseStorage<T>
where
	T: Serialize + DeserializeOwned + Clone + 'static,
{
	use_storage(StorageArea::Local, key, default)
}

/// [`use_storage`] on `window.sessionStorage`
pub fn use_session_storage<T>(key: &str, default: Option<T>) -> UseStorage<T>
where
	T: Serialize + DeserializeOwned + Clone + 'static,
{
	use_storage(StorageArea::Session, key, default)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mount;
	use crate::testing::{fail_storage_writes, flush, reset, set_storage, storage_snapshot};
	use rstest::rstest;
	use serial_test::serial;

	fn stored(area: StorageArea, key: &str) -> Option<String> {
		storage_snapshot(area).get(key).cloned()
	}

	#[rstest]
	#[case(StorageArea::Local)]
	#[case(StorageArea::Session)]
	#[serial]
	fn test_default_written_on_mount(#[case] area: StorageArea) {
		reset();
		let (_scope, name) = mount(|| use_storage(area, "name", Some("Kyle".to_string())));
		flush();

		assert_eq!(name.value.get_untracked().as_deref(), Some("Kyle"));
		assert_eq!(stored(area, "name").as_deref(), Some("\"Kyle\""));
	}

	#[test]
	#[serial]
	fn test_stored_value_wins_over_default() {
		reset();
		set_storage(StorageArea::Local, "age", "31");
		let (_scope, age) = mount(|| use_local_storage("age", Some(26)));
		assert_eq!(age.value.get_untracked(), Some(31));
	}

	#[test]
	#[serial]
	fn test_set_and_remove_write_through() {
		reset();
		let (_scope, age) = mount(|| use_session_storage("age", Some(26)));

		age.set(40);
		flush();
		assert_eq!(stored(StorageArea::Session, "age").as_deref(), Some("40"));

		age.remove();
		flush();
		assert_eq!(age.value.get_untracked(), None);
		assert_eq!(stored(StorageArea::Session, "age"), None);
	}

	#[test]
	#[serial]
	fn test_unparsable_value_falls_back_to_default() {
		reset();
		set_storage(StorageArea::Local, "flags", "{not json");
		let (_scope, flags) = mount(|| use_local_storage("flags", Some(vec![1, 2])));
		flush();

		assert_eq!(flags.value.get_untracked(), Some(vec![1, 2]));
		assert_eq!(stored(StorageArea::Local, "flags").as_deref(), Some("[1,2]"));
	}

	#[test]
	#[serial]
	fn test_write_failure_keeps_in_memory_value() {
		reset();
		let (_scope, note) = mount(|| use_local_storage::<String>("note", None));
		fail_storage_writes(true);

		note.set("draft".into());
		flush();

		assert_eq!(note.value.get_untracked().as_deref(), Some("draft"));
		assert_eq!(stored(StorageArea::Local, "note"), None);
	}
}
