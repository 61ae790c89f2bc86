//! In-memory browser for native targets
//!
//! Holds everything the wasm implementation would read from or write to the
//! real browser: listeners, a virtual clock with pending timeouts, storage
//! areas, a cookie jar, media queries, geolocation watchers, observers, script
//! tags and canned HTTP responses. The state is thread-local, like the DOM.
//!
//! Handlers are always invoked after the state borrow is released, so they
//! may freely register or remove other listeners.

use core::cell::{Cell, RefCell};
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

use super::{FetchResponse, Position, Rect, StorageArea, Target, WindowSize};
use crate::error::HookError;
use crate::hooks::fetch::FetchOptions;
use crate::hooks::geolocation::GeolocationOptions;

type Handler<A> = Rc<RefCell<dyn FnMut(A)>>;

fn handler<A: 'static>(f: impl FnMut(A) + 'static) -> Handler<A> {
	Rc::new(RefCell::new(f))
}

fn call<A>(handler: &Handler<A>, arg: A) {
	// A handler that is already running (re-entrant dispatch) is skipped
	if let Ok(mut f) = handler.try_borrow_mut() {
		(&mut *f)(arg);
	}
}

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

struct ElementData {
	id: u64,
	tag: String,
	parent: RefCell<Weak<ElementData>>,
	classes: RefCell<BTreeSet<String>>,
	rect: Cell<Rect>,
}

/// A detached in-memory element
#[derive(Clone)]
pub struct Element {
	inner: Rc<ElementData>,
}

impl Element {
	/// Creates an element with the given tag name.
	pub fn new(tag: &str) -> Self {
		Self {
			inner: Rc::new(ElementData {
				id: NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed),
				tag: tag.to_ascii_uppercase(),
				parent: RefCell::new(Weak::new()),
				classes: RefCell::new(BTreeSet::new()),
				rect: Cell::new(Rect::default()),
			}),
		}
	}

	/// Upper-cased tag name, like `Element.tagName`
	pub fn tag_name(&self) -> String {
		self.inner.tag.clone()
	}

	/// Makes `child` a child of this element.
	pub fn append_child(&self, child: &Element) {
		*child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
	}

	/// The parent element, if attached
	pub fn parent(&self) -> Option<Element> {
		self.inner
			.parent
			.borrow()
			.upgrade()
			.map(|inner| Element { inner })
	}

	/// Whether `other` is this element or one of its descendants, like `Node.contains`
	pub fn contains(&self, other: &Element) -> bool {
		let mut current = Some(other.clone());
		while let Some(node) = current {
			if node == *self {
				return true;
			}
			current = node.parent();
		}
		false
	}

	/// Whether the class list contains `class`
	pub fn has_class(&self, class: &str) -> bool {
		self.inner.classes.borrow().contains(class)
	}

	/// Adds or removes `class`, like `classList.toggle(class, force)`
	pub fn toggle_class(&self, class: &str, enabled: bool) {
		let mut classes = self.inner.classes.borrow_mut();
		if enabled {
			classes.insert(class.to_string());
		} else {
			classes.remove(class);
		}
	}

	/// Last bounding box assigned by [`crate::testing::resize_element`]
	pub fn bounding_client_rect(&self) -> Rect {
		self.inner.rect.get()
	}

	pub(crate) fn set_rect(&self, rect: Rect) {
		self.inner.rect.set(rect);
	}

	fn id(&self) -> u64 {
		self.inner.id
	}

	/// This element and its ancestors, innermost first
	fn ancestry(&self) -> Vec<Element> {
		let mut chain = vec![self.clone()];
		while let Some(parent) = chain.last().and_then(Element::parent) {
			chain.push(parent);
		}
		chain
	}
}

impl PartialEq for Element {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

/// Whether `child` is `parent` or one of its descendants
pub fn element_contains(parent: &Element, child: &Element) -> bool {
	parent.contains(child)
}

impl fmt::Debug for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Element")
			.field("id", &self.inner.id)
			.field("tag", &self.inner.tag)
			.finish()
	}
}

/// A dispatched DOM event
#[derive(Debug, Clone)]
pub struct Event {
	kind: String,
	target: Option<Element>,
}

impl Event {
	/// Creates an event of type `kind` targeting `target`.
	pub fn new(kind: &str, target: Option<Element>) -> Self {
		Self {
			kind: kind.to_string(),
			target,
		}
	}

	/// The event type, like `Event.type`
	pub fn kind(&self) -> String {
		self.kind.clone()
	}

	/// The element the event was dispatched to, if it was an element
	pub fn target_element(&self) -> Option<Element> {
		self.target.clone()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ListenerKey {
	Window,
	Document,
	Element(u64),
	MediaQuery(String),
}

struct PendingTimer {
	deadline: f64,
	callback: Box<dyn FnOnce()>,
}

struct Browser {
	next_id: u64,
	now: f64,
	timers: BTreeMap<u64, PendingTimer>,
	listeners: BTreeMap<u64, (ListenerKey, String, Handler<Event>)>,
	window_size: WindowSize,
	online: bool,
	media: BTreeMap<String, bool>,
	storage: BTreeMap<(StorageArea, String), String>,
	storage_writes_fail: bool,
	cookies: BTreeMap<String, String>,
	clipboard: Option<String>,
	clipboard_denied: bool,
	geolocation_available: bool,
	last_position: Option<Position>,
	position_watchers: BTreeMap<u64, (Handler<Position>, Handler<HookError>)>,
	intersection_observers: BTreeMap<u64, (u64, Handler<bool>)>,
	resize_observers: BTreeMap<u64, (u64, Handler<Rect>)>,
	scripts: Vec<String>,
	pending_scripts: BTreeMap<String, Vec<oneshot::Sender<bool>>>,
	routes: BTreeMap<String, FetchResponse>,
	requests: Vec<(String, FetchOptions)>,
	body: Element,
}

impl Default for Browser {
	fn default() -> Self {
		Self {
			next_id: 1,
			now: 0.0,
			timers: BTreeMap::new(),
			listeners: BTreeMap::new(),
			window_size: WindowSize {
				width: 1024.0,
				height: 768.0,
			},
			online: true,
			media: BTreeMap::new(),
			storage: BTreeMap::new(),
			storage_writes_fail: false,
			cookies: BTreeMap::new(),
			clipboard: None,
			clipboard_denied: false,
			geolocation_available: true,
			last_position: None,
			position_watchers: BTreeMap::new(),
			intersection_observers: BTreeMap::new(),
			resize_observers: BTreeMap::new(),
			scripts: Vec::new(),
			pending_scripts: BTreeMap::new(),
			routes: BTreeMap::new(),
			requests: Vec::new(),
			body: Element::new("body"),
		}
	}
}

impl Browser {
	fn next_id(&mut self) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		id
	}
}

thread_local! {
	static BROWSER: RefCell<Browser> = RefCell::new(Browser::default());
	static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
	static SPAWNER: LocalSpawner = POOL.with(|pool| pool.borrow().spawner());
}

fn with_browser<R>(f: impl FnOnce(&mut Browser) -> R) -> R {
	BROWSER.with(|browser| f(&mut browser.borrow_mut()))
}

/// Like [`with_browser`] but tolerant of TLS teardown, for `Drop` impls.
fn try_with_browser<R>(f: impl FnOnce(&mut Browser) -> R) -> Option<R> {
	BROWSER
		.try_with(|browser| browser.try_borrow_mut().ok().map(|mut b| f(&mut b)))
		.ok()
		.flatten()
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A registered event listener. Dropping it removes the listener.
#[must_use = "dropping a Listener removes it immediately"]
pub struct Listener {
	id: u64,
}

impl fmt::Debug for Listener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Listener").field("id", &self.id).finish()
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let removed = try_with_browser(|b| b.listeners.remove(&self.id));
		drop(removed);
	}
}

fn register(key: ListenerKey, event: &str, handler: Handler<Event>) -> Listener {
	with_browser(|b| {
		let id = b.next_id();
		b.listeners.insert(id, (key, event.to_string(), handler));
		Listener { id }
	})
}

fn key_for(target: &Target) -> ListenerKey {
	match target {
		Target::Window => ListenerKey::Window,
		Target::Document => ListenerKey::Document,
		Target::Element(element) => ListenerKey::Element(element.id()),
	}
}

/// Adds an event listener to `target`.
pub fn listen(
	target: &Target,
	event: &str,
	handler: impl FnMut(Event) + 'static,
) -> Result<Listener, HookError> {
	Ok(register(key_for(target), event, self::handler(handler)))
}

fn handlers_for(key: &ListenerKey, event: &str) -> Vec<Handler<Event>> {
	with_browser(|b| {
		b.listeners
			.values()
			.filter(|(k, e, _)| k == key && e == event)
			.map(|(_, _, h)| h.clone())
			.collect()
	})
}

/// Dispatches `event` to `target`. Element events bubble up through their
/// ancestors, then the document, then the window.
pub(crate) fn dispatch(target: &Target, event: &str) {
	let (keys, element) = match target {
		Target::Window => (vec![ListenerKey::Window], None),
		Target::Document => (vec![ListenerKey::Document, ListenerKey::Window], None),
		Target::Element(element) => {
			let mut keys: Vec<ListenerKey> = element
				.ancestry()
				.iter()
				.map(|e| ListenerKey::Element(e.id()))
				.collect();
			keys.push(ListenerKey::Document);
			keys.push(ListenerKey::Window);
			(keys, Some(element.clone()))
		}
	};
	let event = Event::new(event, element);
	for key in keys {
		for h in handlers_for(&key, &event.kind) {
			call(&h, event.clone());
		}
	}
}

pub(crate) fn listener_count() -> usize {
	with_browser(|b| b.listeners.len())
}

// ---------------------------------------------------------------------------
// Timers and tasks
// ---------------------------------------------------------------------------

/// A pending `setTimeout`. Dropping the handle clears the timeout.
#[must_use = "dropping a TimeoutHandle clears the timeout"]
pub struct TimeoutHandle {
	id: u64,
}

impl TimeoutHandle {
	/// Clears the timeout, like `clearTimeout`.
	pub fn cancel(self) {}
}

impl fmt::Debug for TimeoutHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TimeoutHandle").field("id", &self.id).finish()
	}
}

impl Drop for TimeoutHandle {
	fn drop(&mut self) {
		let removed = try_with_browser(|b| b.timers.remove(&self.id));
		drop(removed);
	}
}

/// Runs `callback` once `delay` has elapsed on the virtual clock.
pub fn set_timeout(delay: Duration, callback: impl FnOnce() + 'static) -> TimeoutHandle {
	with_browser(|b| {
		let id = b.next_id();
		let deadline = b.now + delay.as_secs_f64() * 1000.0;
		b.timers.insert(
			id,
			PendingTimer {
				deadline,
				callback: Box::new(callback),
			},
		);
		TimeoutHandle { id }
	})
}

/// Milliseconds on the virtual clock
pub fn now_ms() -> f64 {
	with_browser(|b| b.now)
}

/// Removes and returns the earliest timer due at or before `until`.
pub(crate) fn take_due_timer(until: f64) -> Option<Box<dyn FnOnce()>> {
	with_browser(|b| {
		let id = b
			.timers
			.iter()
			.filter(|(_, timer)| timer.deadline <= until)
			.min_by(|(a_id, a), (b_id, b)| {
				a.deadline
					.total_cmp(&b.deadline)
					.then_with(|| a_id.cmp(b_id))
			})
			.map(|(id, _)| *id)?;
		let timer = b.timers.remove(&id)?;
		b.now = b.now.max(timer.deadline);
		Some(timer.callback)
	})
}

pub(crate) fn set_now(now: f64) {
	with_browser(|b| b.now = b.now.max(now));
}

pub(crate) fn pending_timer_count() -> usize {
	with_browser(|b| b.timers.len())
}

/// Passive effects are flushed by [`crate::testing::flush`], so there is
/// nothing to install.
pub(crate) fn install_scheduler() {}

/// Spawns a future on the thread's local task pool.
pub fn spawn_local(future: impl Future<Output = ()> + 'static) {
	SPAWNER.with(|spawner| {
		if let Err(err) = spawner.spawn_local(future) {
			crate::error_log!("failed to spawn local task: {}", err);
		}
	});
}

/// Polls every spawned task until none can make progress.
pub(crate) fn run_tasks_until_stalled() {
	POOL.with(|pool| pool.borrow_mut().run_until_stalled());
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// Current window inner size
pub fn window_size() -> WindowSize {
	with_browser(|b| b.window_size)
}

pub(crate) fn set_window_size(size: WindowSize) {
	with_browser(|b| b.window_size = size);
}

/// `navigator.onLine`
pub fn is_online() -> bool {
	with_browser(|b| b.online)
}

pub(crate) fn set_online(online: bool) {
	with_browser(|b| b.online = online);
}

/// A `MediaQueryList`
#[derive(Debug, Clone)]
pub struct MediaQuery {
	query: String,
}

impl MediaQuery {
	/// Whether the query currently matches
	pub fn matches(&self) -> bool {
		with_browser(|b| b.media.get(&self.query).copied().unwrap_or(false))
	}

	/// Calls `handler` with the new match state on every `change` event.
	pub fn on_change(&self, mut handler: impl FnMut(bool) + 'static) -> Result<Listener, HookError> {
		let query = self.clone();
		Ok(register(
			ListenerKey::MediaQuery(self.query.clone()),
			"change",
			self::handler(move |_event: Event| handler(query.matches())),
		))
	}
}

/// `window.matchMedia(query)`
pub fn match_media(query: &str) -> Result<MediaQuery, HookError> {
	Ok(MediaQuery {
		query: query.to_string(),
	})
}

pub(crate) fn set_media_query(query: &str, matches: bool) {
	let changed = with_browser(|b| b.media.insert(query.to_string(), matches) != Some(matches));
	if changed {
		for h in handlers_for(&ListenerKey::MediaQuery(query.to_string()), "change") {
			call(&h, Event::new("change", None));
		}
	}
}

// ---------------------------------------------------------------------------
// Storage and cookies
// ---------------------------------------------------------------------------

/// `storage.getItem(key)`
pub fn storage_get(area: StorageArea, key: &str) -> Result<Option<String>, HookError> {
	Ok(with_browser(|b| b.storage.get(&(area, key.to_string())).cloned()))
}

/// `storage.setItem(key, value)`
pub fn storage_set(area: StorageArea, key: &str, value: &str) -> Result<(), HookError> {
	with_browser(|b| {
		if b.storage_writes_fail {
			return Err(HookError::Storage(format!(
				"QuotaExceededError: {} is full",
				area.as_str()
			)));
		}
		b.storage
			.insert((area, key.to_string()), value.to_string());
		Ok(())
	})
}

/// `storage.removeItem(key)`
pub fn storage_remove(area: StorageArea, key: &str) -> Result<(), HookError> {
	with_browser(|b| {
		b.storage.remove(&(area, key.to_string()));
	});
	Ok(())
}

pub(crate) fn fail_storage_writes(fail: bool) {
	with_browser(|b| b.storage_writes_fail = fail);
}

/// `document.cookie` (read)
pub fn document_cookie() -> Result<String, HookError> {
	Ok(with_browser(|b| {
		b.cookies
			.iter()
			.map(|(name, value)| format!("{name}={value}"))
			.collect::<Vec<_>>()
			.join("; ")
	}))
}

/// `document.cookie = cookie` (write)
///
/// Honors `max-age`: zero or negative removes the cookie.
pub fn set_document_cookie(cookie: &str) -> Result<(), HookError> {
	let mut parts = cookie.split(';').map(str::trim);
	let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
		return Err(HookError::Js(format!("malformed cookie string: {cookie}")));
	};
	let expired = parts
		.filter_map(|attr| attr.split_once('='))
		.any(|(k, v)| {
			k.eq_ignore_ascii_case("max-age") && v.parse::<i64>().is_ok_and(|age| age <= 0)
		});
	with_browser(|b| {
		if expired {
			b.cookies.remove(name);
		} else {
			b.cookies.insert(name.to_string(), value.to_string());
		}
	});
	Ok(())
}

// ---------------------------------------------------------------------------
// Clipboard
// ---------------------------------------------------------------------------

/// `navigator.clipboard.writeText(text)`
pub async fn write_clipboard(text: String) -> Result<(), HookError> {
	with_browser(|b| {
		if b.clipboard_denied {
			return Err(HookError::Clipboard("NotAllowedError: write permission denied".into()));
		}
		b.clipboard = Some(text);
		Ok(())
	})
}

pub(crate) fn clipboard_text() -> Option<String> {
	with_browser(|b| b.clipboard.clone())
}

pub(crate) fn deny_clipboard(denied: bool) {
	with_browser(|b| b.clipboard_denied = denied);
}

// ---------------------------------------------------------------------------
// Geolocation
// ---------------------------------------------------------------------------

/// An active `watchPosition`. Dropping it calls `clearWatch`.
#[must_use = "dropping a PositionWatch clears the watch"]
pub struct PositionWatch {
	id: u64,
}

impl fmt::Debug for PositionWatch {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PositionWatch").field("id", &self.id).finish()
	}
}

impl Drop for PositionWatch {
	fn drop(&mut self) {
		let removed = try_with_browser(|b| b.position_watchers.remove(&self.id));
		drop(removed);
	}
}

/// `navigator.geolocation.watchPosition(success, error, options)`
///
/// A fix that is already known is delivered from a spawned task, so it
/// arrives after the caller has returned.
pub fn watch_position(
	_options: &GeolocationOptions,
	on_position: impl FnMut(Position) + 'static,
	on_error: impl FnMut(HookError) + 'static,
) -> Result<PositionWatch, HookError> {
	let on_position = handler(on_position);
	let (id, known) = with_browser(|b| {
		if !b.geolocation_available {
			return Err(HookError::Unavailable("navigator.geolocation"));
		}
		let id = b.next_id();
		b.position_watchers
			.insert(id, (on_position.clone(), handler(on_error)));
		Ok((id, b.last_position))
	})?;
	if let Some(position) = known {
		let weak = Rc::downgrade(&on_position);
		spawn_local(async move {
			if let Some(h) = weak.upgrade() {
				call(&h, position);
			}
		});
	}
	Ok(PositionWatch { id })
}

pub(crate) fn set_position(position: Position) {
	let watchers: Vec<Handler<Position>> = with_browser(|b| {
		b.last_position = Some(position);
		b.position_watchers.values().map(|(ok, _)| ok.clone()).collect()
	});
	for h in watchers {
		call(&h, position);
	}
}

pub(crate) fn fail_geolocation(error: HookError) {
	let watchers: Vec<Handler<HookError>> =
		with_browser(|b| b.position_watchers.values().map(|(_, err)| err.clone()).collect());
	for h in watchers {
		call(&h, error.clone());
	}
}

pub(crate) fn set_geolocation_available(available: bool) {
	with_browser(|b| b.geolocation_available = available);
}

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

/// An `IntersectionObserver` observing one element. Dropping it disconnects.
#[must_use = "dropping an IntersectionWatch disconnects the observer"]
pub struct IntersectionWatch {
	id: u64,
}

impl Drop for IntersectionWatch {
	fn drop(&mut self) {
		let removed = try_with_browser(|b| b.intersection_observers.remove(&self.id));
		drop(removed);
	}
}

/// Observes `element` and reports `isIntersecting` on every change.
pub fn observe_intersection(
	element: &Element,
	_root_margin: &str,
	on_change: impl FnMut(bool) + 'static,
) -> Result<IntersectionWatch, HookError> {
	let element_id = element.id();
	Ok(with_browser(|b| {
		let id = b.next_id();
		b.intersection_observers
			.insert(id, (element_id, handler(on_change)));
		IntersectionWatch { id }
	}))
}

pub(crate) fn set_intersecting(element: &Element, intersecting: bool) {
	let element_id = element.id();
	let observers: Vec<Handler<bool>> = with_browser(|b| {
		b.intersection_observers
			.values()
			.filter(|(target, _)| *target == element_id)
			.map(|(_, h)| h.clone())
			.collect()
	});
	for h in observers {
		call(&h, intersecting);
	}
}

/// A `ResizeObserver` observing one element. Dropping it disconnects.
#[must_use = "dropping a ResizeWatch disconnects the observer"]
pub struct ResizeWatch {
	id: u64,
}

impl Drop for ResizeWatch {
	fn drop(&mut self) {
		let removed = try_with_browser(|b| b.resize_observers.remove(&self.id));
		drop(removed);
	}
}

/// Observes `element` and reports its bounding box whenever it resizes.
pub fn observe_size(
	element: &Element,
	on_resize: impl FnMut(Rect) + 'static,
) -> Result<ResizeWatch, HookError> {
	let element_id = element.id();
	Ok(with_browser(|b| {
		let id = b.next_id();
		b.resize_observers
			.insert(id, (element_id, handler(on_resize)));
		ResizeWatch { id }
	}))
}

pub(crate) fn resize_element(element: &Element, rect: Rect) {
	element.set_rect(rect);
	let element_id = element.id();
	let observers: Vec<Handler<Rect>> = with_browser(|b| {
		b.resize_observers
			.values()
			.filter(|(target, _)| *target == element_id)
			.map(|(_, h)| h.clone())
			.collect()
	});
	for h in observers {
		call(&h, rect);
	}
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Appends a `<script src=url>` to the document and waits for `load` or `error`.
pub async fn load_script(url: String) -> Result<(), HookError> {
	let (tx, rx) = oneshot::channel();
	with_browser(|b| {
		b.scripts.push(url.clone());
		b.pending_scripts.entry(url.clone()).or_default().push(tx);
	});
	match rx.await {
		Ok(true) => Ok(()),
		Ok(false) | Err(_) => Err(HookError::Script(url)),
	}
}

pub(crate) fn appended_scripts() -> Vec<String> {
	with_browser(|b| b.scripts.clone())
}

pub(crate) fn finish_script(url: &str, loaded: bool) {
	let senders = with_browser(|b| b.pending_scripts.remove(url).unwrap_or_default());
	for tx in senders {
		let _ = tx.send(loaded);
	}
}

/// `document.body`
pub fn body() -> Option<Element> {
	Some(with_browser(|b| b.body.clone()))
}

/// `document.body.classList.toggle(class, enabled)`
pub fn set_body_class(class: &str, enabled: bool) -> Result<(), HookError> {
	with_browser(|b| b.body.toggle_class(class, enabled));
	Ok(())
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Performs a single HTTP request against the canned routes.
///
/// Unknown URLs fail like an unreachable host.
pub async fn fetch(url: String, options: FetchOptions) -> Result<FetchResponse, HookError> {
	with_browser(|b| {
		b.requests.push((url.clone(), options));
		b.routes
			.get(&url)
			.cloned()
			.ok_or_else(|| HookError::Network(format!("failed to fetch {url}")))
	})
}

pub(crate) fn mock_fetch(url: &str, response: FetchResponse) {
	with_browser(|b| {
		b.routes.insert(url.to_string(), response);
	});
}

pub(crate) fn requests() -> Vec<(String, FetchOptions)> {
	with_browser(|b| b.requests.clone())
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

pub(crate) fn reset() {
	// Dropped outside the borrow: handlers may own Listeners whose Drop
	// re-enters the browser.
	let previous = BROWSER.with(|browser| browser.replace(Browser::default()));
	drop(previous);
}

pub(crate) fn storage_snapshot(area: StorageArea) -> BTreeMap<String, String> {
	with_browser(|b| {
		b.storage
			.iter()
			.filter(|((a, _), _)| *a == area)
			.map(|((_, k), v)| (k.clone(), v.clone()))
			.collect()
	})
}

pub(crate) fn cookie_jar() -> BTreeMap<String, String> {
	with_browser(|b| b.cookies.clone())
}
