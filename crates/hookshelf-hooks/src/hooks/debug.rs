//! Debug hooks: use_render_count and use_debug_information
//!
//! A "render" is one run of the view closure handed to the hook. The closure
//! is run in a layout effect, so it renders once on mount and again,
//! synchronously, every time a signal it read changes.

use std::collections::BTreeMap;

use hookshelf_reactive::Signal;
use serde::Serialize;
use serde_json::Value;

use super::effect::use_layout_effect;
use crate::platform;

/// Counts how many times `view` has rendered, starting at 1 on mount.
///
/// # Example
///
/// ```ignore
/// let (label, set_label) = use_state(String::new());
/// let renders = use_render_count(move || {
///     let _ = label.get();
/// });
/// set_label("x".into());
/// assert_eq!(renders.get_untracked(), 2);
/// ```
pub fn use_render_count<F>(mut view: F) -> Signal<usize>
where
	F: FnMut() + 'static,
{
	let count = Signal::new(0usize);
	use_layout_effect({
		let count = count.clone();
		move || {
			view();
			count.update(|count| *count += 1);
		}
	});
	count
}

/// Previous and current value of a prop that changed between renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropChange {
	/// Value at the previous render (`null` if the prop was absent)
	pub previous: Value,
	/// Value at this render (`null` if the prop was removed)
	pub current: Value,
}

/// Snapshot describing the latest render
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebugInformation {
	/// Renders so far, including this one
	pub count: usize,
	/// Props whose value differs from the previous render
	pub changed_props: BTreeMap<String, PropChange>,
	/// Milliseconds since the previous render; `0` on mount
	pub time_since_last_render: f64,
	/// Time of this render in milliseconds since the epoch
	pub last_render_timestamp: f64,
}

fn diff_props(
	previous: &BTreeMap<String, Value>,
	current: &BTreeMap<String, Value>,
) -> BTreeMap<String, PropChange> {
	previous
		.keys()
		.chain(current.keys())
		.filter_map(|key| {
			let before = previous.get(key).cloned().unwrap_or(Value::Null);
			let after = current.get(key).cloned().unwrap_or(Value::Null);
			(before != after).then(|| {
				(
					key.clone(),
					PropChange {
						previous: before,
						current: after,
					},
				)
			})
		})
		.collect()
}

/// Tracks renders of a component driven by `props`.
///
/// `props` is the view: every signal it reads is a dependency, and the map it
/// returns is compared against the previous render's map. Each render is
/// logged with `info_log!`.
///
/// # Example
///
/// ```ignore
/// let (count, set_count) = use_state(0);
/// let info = use_debug_information("Counter", move || {
///     BTreeMap::from([("count".to_string(), json!(count.get()))])
/// });
/// ```
pub fn use_debug_information<F>(component_name: &str, mut props: F) -> Signal<DebugInformation>
where
	F: FnMut() -> BTreeMap<String, Value> + 'static,
{
	let info = Signal::new(DebugInformation::default());
	let name = component_name.to_string();
	let mut previous_props: Option<BTreeMap<String, Value>> = None;

	use_layout_effect({
		let info = info.clone();
		move || {
			let current_props = props();
			let now = platform::now_ms();
			let last = info.get_untracked();

			let next = DebugInformation {
				count: last.count + 1,
				changed_props: previous_props
					.as_ref()
					.map(|previous| diff_props(previous, &current_props))
					.unwrap_or_default(),
				time_since_last_render: if last.count == 0 {
					0.0
				} else {
					now - last.last_render_timestamp
				},
				last_render_timestamp: now,
			};
			crate::info_log!("[debug] {}: {:?}", name, next);

			previous_props = Some(current_props);
			info.set(next);
		}
	});
	info
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mount;
	use crate::testing::{advance_time, now, reset};
	use serde_json::json;
	use serial_test::serial;
	use std::time::Duration;

	#[test]
	#[serial]
	fn test_render_count_tracks_view_dependencies() {
		reset();
		let label = Signal::new("a".to_string());
		let unrelated = Signal::new(0);
		let (_scope, renders) = mount({
			let label = label.clone();
			move || {
				use_render_count(move || {
					let _ = label.get();
				})
			}
		});
		assert_eq!(renders.get_untracked(), 1);

		label.set("b".into());
		label.set("c".into());
		unrelated.set(1);
		assert_eq!(renders.get_untracked(), 3);
	}

	#[test]
	#[serial]
	fn test_debug_information_reports_changes() {
		reset();
		let count = Signal::new(0);
		let (_scope, info) = mount({
			let count = count.clone();
			move || {
				use_debug_information("Counter", move || {
					BTreeMap::from([
						("count".to_string(), json!(count.get())),
						("label".to_string(), json!("fixed")),
					])
				})
			}
		});

		let first = info.get_untracked();
		assert_eq!(first.count, 1);
		assert!(first.changed_props.is_empty());
		assert_eq!(first.time_since_last_render, 0.0);
		assert_eq!(first.last_render_timestamp, now());

		advance_time(Duration::from_millis(250));
		count.set(5);

		let second = info.get_untracked();
		assert_eq!(second.count, 2);
		assert_eq!(second.time_since_last_render, 250.0);
		assert_eq!(
			second.changed_props,
			BTreeMap::from([(
				"count".to_string(),
				PropChange {
					previous: json!(0),
					current: json!(5),
				}
			)])
		);
	}

	#[test]
	fn test_diff_props_added_and_removed() {
		let previous = BTreeMap::from([("gone".to_string(), json!(1))]);
		let current = BTreeMap::from([("new".to_string(), json!(true))]);

		let changes = diff_props(&previous, &current);
		assert_eq!(changes.len(), 2);
		assert_eq!(changes["gone"].current, Value::Null);
		assert_eq!(changes["new"].previous, Value::Null);
	}
}
