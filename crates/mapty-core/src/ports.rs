//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod geolocation;
pub mod map;
pub mod persistence;

pub use geolocation::GeolocationProvider;
pub use map::{MapAdapter, MapHandle, PanOptions};
pub use persistence::KeyValueStore;
