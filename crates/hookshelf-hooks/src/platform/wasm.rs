//! Browser implementation backed by `web-sys`

use std::future::Future;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{FetchResponse, Position, Rect, StorageArea, Target, WindowSize};
use crate::error::HookError;
use crate::hooks::fetch::FetchOptions;
use crate::hooks::geolocation::GeolocationOptions;

/// A DOM element
pub type Element = web_sys::Element;

fn describe(value: JsValue) -> String {
	if let Some(error) = value.dyn_ref::<js_sys::Error>() {
		return String::from(error.message());
	}
	value
		.as_string()
		.or_else(|| js_sys::JSON::stringify(&value).ok().and_then(|s| s.as_string()))
		.unwrap_or_else(|| format!("{value:?}"))
}

fn js_error(value: JsValue) -> HookError {
	HookError::Js(describe(value))
}

fn window() -> Result<web_sys::Window, HookError> {
	web_sys::window().ok_or(HookError::Unavailable("window"))
}

fn document() -> Result<web_sys::Document, HookError> {
	window()?.document().ok_or(HookError::Unavailable("document"))
}

/// Whether `child` is `parent` or one of its descendants
pub fn element_contains(parent: &Element, child: &Element) -> bool {
	parent.contains(Some(child.as_ref()))
}

/// A dispatched DOM event
#[derive(Debug, Clone)]
pub struct Event(web_sys::Event);

impl Event {
	/// The event type, like `Event.type`
	pub fn kind(&self) -> String {
		self.0.type_()
	}

	/// The element the event was dispatched to, if it was an element
	pub fn target_element(&self) -> Option<Element> {
		self.0
			.target()
			.and_then(|target| target.dyn_into::<web_sys::Element>().ok())
	}

	/// The underlying `web_sys::Event`
	pub fn inner(&self) -> &web_sys::Event {
		&self.0
	}
}

/// A registered event listener. Dropping it removes the listener.
#[must_use = "dropping a Listener removes it immediately"]
pub struct Listener {
	target: web_sys::EventTarget,
	event: String,
	closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl core::fmt::Debug for Listener {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Listener").field("event", &self.event).finish()
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(&self.event, self.closure.as_ref().unchecked_ref());
	}
}

fn listen_on(
	target: web_sys::EventTarget,
	event: &str,
	mut handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<Listener, HookError> {
	let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| handler(e));
	target
		.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
		.map_err(js_error)?;
	Ok(Listener {
		target,
		event: event.to_string(),
		closure,
	})
}

/// Adds an event listener to `target`.
pub fn listen(
	target: &Target,
	event: &str,
	mut handler: impl FnMut(Event) + 'static,
) -> Result<Listener, HookError> {
	let target: web_sys::EventTarget = match target {
		Target::Window => window()?.into(),
		Target::Document => document()?.into(),
		Target::Element(element) => element.clone().into(),
	};
	listen_on(target, event, move |e| handler(Event(e)))
}

/// A pending `setTimeout`. Dropping the handle clears the timeout.
#[must_use = "dropping a TimeoutHandle clears the timeout"]
#[derive(Debug)]
pub struct TimeoutHandle {
	_timeout: Timeout,
}

impl TimeoutHandle {
	/// Clears the timeout, like `clearTimeout`.
	pub fn cancel(self) {}
}

/// Runs `callback` once `delay` has elapsed.
pub fn set_timeout(delay: Duration, callback: impl FnOnce() + 'static) -> TimeoutHandle {
	let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
	TimeoutHandle {
		_timeout: Timeout::new(millis, callback),
	}
}

/// `Date.now()`
pub fn now_ms() -> f64 {
	js_sys::Date::now()
}

thread_local! {
	static SCHEDULER_INSTALLED: core::cell::Cell<bool> = const { core::cell::Cell::new(false) };
}

/// Routes passive effect flushes through the microtask queue. Idempotent.
pub(crate) fn install_scheduler() {
	if SCHEDULER_INSTALLED.with(|installed| installed.replace(true)) {
		return;
	}
	hookshelf_reactive::set_scheduler(|flush| {
		wasm_bindgen_futures::spawn_local(async move { flush() });
	});
}

/// Spawns a future on the browser's microtask queue.
pub fn spawn_local(future: impl Future<Output = ()> + 'static) {
	wasm_bindgen_futures::spawn_local(future);
}

/// Current window inner size
pub fn window_size() -> WindowSize {
	let Ok(window) = window() else {
		return WindowSize::default();
	};
	let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	WindowSize {
		width: read(window.inner_width()),
		height: read(window.inner_height()),
	}
}

/// `navigator.onLine`
pub fn is_online() -> bool {
	window().map(|w| w.navigator().on_line()).unwrap_or(true)
}

/// A `MediaQueryList`
#[derive(Debug, Clone)]
pub struct MediaQuery(web_sys::MediaQueryList);

impl MediaQuery {
	/// Whether the query currently matches
	pub fn matches(&self) -> bool {
		self.0.matches()
	}

	/// Calls `handler` with the new match state on every `change` event.
	pub fn on_change(&self, mut handler: impl FnMut(bool) + 'static) -> Result<Listener, HookError> {
		let list = self.0.clone();
		listen_on(self.0.clone().into(), "change", move |_| handler(list.matches()))
	}
}

/// `window.matchMedia(query)`
pub fn match_media(query: &str) -> Result<MediaQuery, HookError> {
	window()?
		.match_media(query)
		.map_err(js_error)?
		.map(MediaQuery)
		.ok_or(HookError::Unavailable("window.matchMedia"))
}

fn storage(area: StorageArea) -> Result<web_sys::Storage, HookError> {
	let window = window()?;
	let storage = match area {
		StorageArea::Local => window.local_storage(),
		StorageArea::Session => window.session_storage(),
	};
	storage
		.map_err(|e| HookError::Storage(describe(e)))?
		.ok_or(HookError::Unavailable(area.as_str()))
}

/// `storage.getItem(key)`
pub fn storage_get(area: StorageArea, key: &str) -> Result<Option<String>, HookError> {
	storage(area)?
		.get_item(key)
		.map_err(|e| HookError::Storage(describe(e)))
}

/// `storage.setItem(key, value)`
pub fn storage_set(area: StorageArea, key: &str, value: &str) -> Result<(), HookError> {
	storage(area)?
		.set_item(key, value)
		.map_err(|e| HookError::Storage(describe(e)))
}

/// `storage.removeItem(key)`
pub fn storage_remove(area: StorageArea, key: &str) -> Result<(), HookError> {
	storage(area)?
		.remove_item(key)
		.map_err(|e| HookError::Storage(describe(e)))
}

fn html_document() -> Result<web_sys::HtmlDocument, HookError> {
	document()?
		.dyn_into::<web_sys::HtmlDocument>()
		.map_err(|_| HookError::Unavailable("HTMLDocument"))
}

/// `document.cookie` (read)
pub fn document_cookie() -> Result<String, HookError> {
	html_document()?.cookie().map_err(js_error)
}

/// `document.cookie = cookie` (write)
pub fn set_document_cookie(cookie: &str) -> Result<(), HookError> {
	html_document()?.set_cookie(cookie).map_err(js_error)
}

/// `navigator.clipboard.writeText(text)`
pub async fn write_clipboard(text: String) -> Result<(), HookError> {
	let navigator = window()?.navigator();
	let clipboard =
		js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(js_error)?;
	if clipboard.is_undefined() {
		return Err(HookError::Unavailable("navigator.clipboard"));
	}
	let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
		.map_err(js_error)?
		.dyn_into::<js_sys::Function>()
		.map_err(|_| HookError::Unavailable("navigator.clipboard.writeText"))?;
	let promise = write_text
		.call1(&clipboard, &JsValue::from_str(&text))
		.map_err(|e| HookError::Clipboard(describe(e)))?
		.dyn_into::<js_sys::Promise>()
		.map_err(js_error)?;
	JsFuture::from(promise)
		.await
		.map(|_| ())
		.map_err(|e| HookError::Clipboard(describe(e)))
}

/// An active `watchPosition`. Dropping it calls `clearWatch`.
#[must_use = "dropping a PositionWatch clears the watch"]
pub struct PositionWatch {
	geolocation: web_sys::Geolocation,
	id: i32,
	_on_position: Closure<dyn FnMut(web_sys::GeolocationPosition)>,
	_on_error: Closure<dyn FnMut(web_sys::GeolocationPositionError)>,
}

impl core::fmt::Debug for PositionWatch {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("PositionWatch").field("id", &self.id).finish()
	}
}

impl Drop for PositionWatch {
	fn drop(&mut self) {
		self.geolocation.clear_watch(self.id);
	}
}

/// `navigator.geolocation.watchPosition(success, error, options)`
pub fn watch_position(
	options: &GeolocationOptions,
	mut on_position: impl FnMut(Position) + 'static,
	mut on_error: impl FnMut(HookError) + 'static,
) -> Result<PositionWatch, HookError> {
	let geolocation = window()?
		.navigator()
		.geolocation()
		.map_err(|_| HookError::Unavailable("navigator.geolocation"))?;

	let js_options = web_sys::PositionOptions::new();
	js_options.set_enable_high_accuracy(options.enable_high_accuracy);
	if let Some(maximum_age) = options.maximum_age {
		js_options.set_maximum_age(maximum_age);
	}
	if let Some(timeout) = options.timeout {
		js_options.set_timeout(timeout);
	}

	let success = Closure::<dyn FnMut(web_sys::GeolocationPosition)>::new(
		move |position: web_sys::GeolocationPosition| {
			let coords = position.coords();
			on_position(Position {
				latitude: coords.latitude(),
				longitude: coords.longitude(),
				accuracy: coords.accuracy(),
				altitude: coords.altitude(),
				altitude_accuracy: coords.altitude_accuracy(),
				heading: coords.heading(),
				speed: coords.speed(),
				timestamp: position.timestamp(),
			});
		},
	);
	let error = Closure::<dyn FnMut(web_sys::GeolocationPositionError)>::new(
		move |error: web_sys::GeolocationPositionError| {
			on_error(HookError::Geolocation {
				code: error.code(),
				message: error.message(),
			});
		},
	);

	let id = geolocation
		.watch_position_with_error_callback_and_options(
			success.as_ref().unchecked_ref(),
			Some(error.as_ref().unchecked_ref()),
			&js_options,
		)
		.map_err(js_error)?;

	Ok(PositionWatch {
		geolocation,
		id,
		_on_position: success,
		_on_error: error,
	})
}

/// An `IntersectionObserver` observing one element. Dropping it disconnects.
#[must_use = "dropping an IntersectionWatch disconnects the observer"]
pub struct IntersectionWatch {
	observer: web_sys::IntersectionObserver,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl Drop for IntersectionWatch {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Observes `element` and reports `isIntersecting` on every change.
pub fn observe_intersection(
	element: &Element,
	root_margin: &str,
	mut on_change: impl FnMut(bool) + 'static,
) -> Result<IntersectionWatch, HookError> {
	let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
		let latest = entries
			.iter()
			.filter_map(|entry| entry.dyn_into::<web_sys::IntersectionObserverEntry>().ok())
			.last();
		if let Some(entry) = latest {
			on_change(entry.is_intersecting());
		}
	});
	let init = web_sys::IntersectionObserverInit::new();
	init.set_root_margin(root_margin);
	let observer =
		web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
			.map_err(js_error)?;
	observer.observe(element);
	Ok(IntersectionWatch {
		observer,
		_callback: callback,
	})
}

/// A `ResizeObserver` observing one element. Dropping it disconnects.
#[must_use = "dropping a ResizeWatch disconnects the observer"]
pub struct ResizeWatch {
	observer: web_sys::ResizeObserver,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl Drop for ResizeWatch {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Observes `element` and reports its bounding box whenever it resizes.
pub fn observe_size(
	element: &Element,
	mut on_resize: impl FnMut(Rect) + 'static,
) -> Result<ResizeWatch, HookError> {
	let observed = element.clone();
	let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
		let rect = observed.get_bounding_client_rect();
		on_resize(Rect::new(rect.x(), rect.y(), rect.width(), rect.height()));
	});
	let observer =
		web_sys::ResizeObserver::new(callback.as_ref().unchecked_ref()).map_err(js_error)?;
	observer.observe(element);
	Ok(ResizeWatch {
		observer,
		_callback: callback,
	})
}

/// Appends a `<script src=url>` to the document and waits for `load` or `error`.
pub async fn load_script(url: String) -> Result<(), HookError> {
	let document = document()?;
	let script = document
		.create_element("script")
		.map_err(js_error)?
		.dyn_into::<web_sys::HtmlScriptElement>()
		.map_err(|_| HookError::Unavailable("HTMLScriptElement"))?;
	script.set_src(&url);
	script.set_async(true);

	let settled = js_sys::Promise::new(&mut |resolve, reject| {
		script.set_onload(Some(&resolve));
		script.set_onerror(Some(&reject));
	});

	let parent = document
		.body()
		.ok_or(HookError::Unavailable("document.body"))?;
	parent.append_child(&script).map_err(js_error)?;

	JsFuture::from(settled)
		.await
		.map(|_| ())
		.map_err(|_| HookError::Script(url))
}

/// `document.body`
pub fn body() -> Option<Element> {
	document().ok()?.body().map(Into::into)
}

/// `document.body.classList.toggle(class, enabled)`
pub fn set_body_class(class: &str, enabled: bool) -> Result<(), HookError> {
	let body = document()?
		.body()
		.ok_or(HookError::Unavailable("document.body"))?;
	body.class_list()
		.toggle_with_force(class, enabled)
		.map(|_| ())
		.map_err(js_error)
}

/// Performs a single HTTP request.
pub async fn fetch(url: String, options: FetchOptions) -> Result<FetchResponse, HookError> {
	let method = reqwest::Method::from_bytes(options.method.as_bytes())
		.map_err(|e| HookError::Network(e.to_string()))?;
	let mut request = reqwest::Client::new().request(method, &url);
	for (name, value) in &options.headers {
		request = request.header(name.as_str(), value.as_str());
	}
	if let Some(body) = options.body {
		request = request.body(body);
	}
	let response = request
		.send()
		.await
		.map_err(|e| HookError::Network(e.to_string()))?;
	let status = response.status().as_u16();
	let body = response
		.text()
		.await
		.map_err(|e| HookError::Network(e.to_string()))?;
	Ok(FetchResponse { status, body })
}
