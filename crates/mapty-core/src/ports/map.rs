use crate::error::Result;
use crate::models::{Coords, WorkoutId};
use crate::view::Marker;

/// Handle to an initialized map returned by [`MapAdapter::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle(pub u64);

/// Animation settings for [`MapAdapter::pan_to`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    /// Pan duration in seconds
    pub duration_secs: f64,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration_secs: 1.0,
        }
    }
}

/// Port for the interactive map widget
///
/// Map clicks are not delivered through this trait; the host forwards them
/// to [`crate::App::handle_map_click`].
pub trait MapAdapter {
    /// Render the basemap centered on `center`
    fn init(&mut self, center: Coords, zoom: u8) -> Result<MapHandle>;

    /// Place a marker with its popup open
    fn place_marker(&mut self, handle: MapHandle, marker: &Marker) -> Result<()>;

    /// Remove the marker previously placed for `id`
    fn remove_marker(&mut self, handle: MapHandle, id: &WorkoutId) -> Result<()>;

    /// Center the view on `coords`
    fn pan_to(&mut self, handle: MapHandle, coords: Coords, zoom: u8, options: PanOptions)
        -> Result<()>;
}
