//! Platform abstraction (unified types for WASM and native)
//!
//! Every browser capability a hook touches goes through this module. On
//! `wasm32` the functions call `web-sys`. On native targets they operate on an
//! in-memory browser that [`crate::testing`] can drive, so hooks can be mounted
//! and exercised without a real DOM.
//!
//! Both implementations expose the same names and signatures.

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(not(target_arch = "wasm32"))]
pub(crate) mod native;
#[cfg(not(target_arch = "wasm32"))]
pub use native::*;

/// Where an event listener is attached
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
	/// The global `window`
	Window,
	/// The global `document`
	Document,
	/// A specific element
	Element(Element),
}

impl From<Element> for Target {
	fn from(element: Element) -> Self {
		Target::Element(element)
	}
}

impl From<&Element> for Target {
	fn from(element: &Element) -> Self {
		Target::Element(element.clone())
	}
}

/// Inner dimensions of the browser window, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowSize {
	/// `window.innerWidth`
	pub width: f64,
	/// `window.innerHeight`
	pub height: f64,
}

/// An element's bounding box, mirroring `DOMRect`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
	/// Left edge
	pub x: f64,
	/// Top edge
	pub y: f64,
	/// Width
	pub width: f64,
	/// Height
	pub height: f64,
}

impl Rect {
	/// Creates a rect from its origin and size.
	pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// `y`
	pub fn top(&self) -> f64 {
		self.y
	}

	/// `x + width`
	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	/// `y + height`
	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	/// `x`
	pub fn left(&self) -> f64 {
		self.x
	}
}

/// A geolocation fix, mirroring `GeolocationCoordinates` plus its timestamp
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
	/// Latitude in decimal degrees
	pub latitude: f64,
	/// Longitude in decimal degrees
	pub longitude: f64,
	/// Accuracy of latitude/longitude in meters
	pub accuracy: f64,
	/// Altitude in meters, if available
	pub altitude: Option<f64>,
	/// Accuracy of the altitude in meters, if available
	pub altitude_accuracy: Option<f64>,
	/// Direction of travel in degrees, if available
	pub heading: Option<f64>,
	/// Ground speed in meters per second, if available
	pub speed: Option<f64>,
	/// Milliseconds since the Unix epoch when the fix was taken
	pub timestamp: f64,
}

/// Which Web Storage area a key lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageArea {
	/// `window.localStorage`
	Local,
	/// `window.sessionStorage`
	Session,
}

impl StorageArea {
	/// Name of the property on `window`
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageArea::Local => "localStorage",
			StorageArea::Session => "sessionStorage",
		}
	}
}

/// Status and raw body of an HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
	/// HTTP status code
	pub status: u16,
	/// Response body as text
	pub body: String,
}

impl FetchResponse {
	/// Whether the status is in the 2xx range, like `Response.ok`
	pub fn ok(&self) -> bool {
		(200..300).contains(&self.status)
	}
}
