//! DOM event hooks: use_event_listener, use_click_outside and use_hover

use hookshelf_reactive::{Signal, own};

use crate::callback::Callback;
use crate::platform::{self, Element, Event, Target};

/// Listens for `event` on `target` for the lifetime of the component.
///
/// The listener is added on mount and removed on unmount. If the target
/// cannot be listened on, the failure is logged and nothing is registered.
///
/// # Example
///
/// ```ignore
/// let key = Signal::new(String::new());
/// use_event_listener(
///     "keydown",
///     { let key = key.clone(); move |e: Event| key.set(e.kind()) },
///     Target::Window,
/// );
/// ```
pub fn use_event_listener<F>(event: &str, callback: F, target: impl Into<Target>)
where
	F: Fn(Event) + 'static,
{
	let callback = Callback::new(callback);
	let target = target.into();
	match platform::listen(&target, event, move |e| callback.call(e)) {
		Ok(listener) => {
			crate::debug_log!("use_event_listener: {} on {:?}", event, target);
			own(listener);
		}
		Err(err) => crate::warn_log!("use_event_listener: cannot listen for {}: {}", event, err),
	}
}

/// Calls `callback` for every click whose target is outside `element`.
///
/// # Example
///
/// ```ignore
/// let modal = use_toggle(true);
/// use_click_outside(&modal_element, { let modal = modal.clone(); move |_| modal.set(false) });
/// ```
pub fn use_click_outside<F>(element: &Element, callback: F)
where
	F: Fn(Event) + 'static,
{
	let element = element.clone();
	use_event_listener(
		"click",
		move |event: Event| {
			let inside = event
				.target_element()
				.is_some_and(|target| platform::element_contains(&element, &target));
			if !inside {
				callback(event);
			}
		},
		Target::Document,
	);
}

/// Whether the pointer is over `element`.
pub fn use_hover(element: &Element) -> Signal<bool> {
	let hovered = Signal::new(false);
	for (event, value) in [("mouseover", true), ("mouseout", false)] {
		let hovered = hovered.clone();
		use_event_listener(event, move |_| hovered.set(value), element);
	}
	hovered
}
