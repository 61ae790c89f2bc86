//! Observer hooks: use_on_screen and use_size

use hookshelf_reactive::{Signal, own};

use crate::platform::{self, Element, Rect};

/// Whether `element` is intersecting the viewport.
///
/// Backed by an `IntersectionObserver` with the given `root_margin` (CSS
/// margin syntax, e.g. `"-100px"`). `false` until the first report.
pub fn use_on_screen(element: &Element, root_margin: &str) -> Signal<bool> {
	let visible = Signal::new(false);
	let on_change = {
		let visible = visible.clone();
		move |intersecting| visible.set(intersecting)
	};
	match platform::observe_intersection(element, root_margin, on_change) {
		Ok(watch) => own(watch),
		Err(err) => crate::warn_log!("use_on_screen: cannot observe element: {}", err),
	}
	visible
}

/// Bounding box of `element`, updated whenever it resizes.
///
/// Backed by a `ResizeObserver`. `None` until the first report.
pub fn use_size(element: &Element) -> Signal<Option<Rect>> {
	let size = Signal::new(None);
	let on_resize = {
		let size = size.clone();
		move |rect| size.set(Some(rect))
	};
	match platform::observe_size(element, on_resize) {
		Ok(watch) => own(watch),
		Err(err) => crate::warn_log!("use_size: cannot observe element: {}", err),
	}
	size
}
