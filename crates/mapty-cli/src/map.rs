use mapty_core::error::Result;
use mapty_core::ports::{MapAdapter, MapHandle, PanOptions};
use mapty_core::{Coords, Marker, WorkoutId};
use tracing::debug;

/// Map adapter for a terminal session
///
/// Nothing is drawn; the adapter keeps the markers and the current view so
/// commands can report where the map would be.
#[derive(Debug, Default)]
pub struct TerminalMap {
    next_handle: u64,
    center: Option<Coords>,
    zoom: Option<u8>,
    markers: Vec<Marker>,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view center, once the map is initialized
    pub fn center(&self) -> Option<Coords> {
        self.center
    }

    pub fn zoom(&self) -> Option<u8> {
        self.zoom
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

impl MapAdapter for TerminalMap {
    fn init(&mut self, center: Coords, zoom: u8) -> Result<MapHandle> {
        self.next_handle += 1;
        self.center = Some(center);
        self.zoom = Some(zoom);
        Ok(MapHandle(self.next_handle))
    }

    fn place_marker(&mut self, _handle: MapHandle, marker: &Marker) -> Result<()> {
        debug!("[{}] {} at {}", marker.style_class, marker.popup, marker.coords);
        self.markers.push(marker.clone());
        Ok(())
    }

    fn remove_marker(&mut self, _handle: MapHandle, id: &WorkoutId) -> Result<()> {
        self.markers.retain(|m| &m.workout_id != id);
        Ok(())
    }

    fn pan_to(
        &mut self,
        _handle: MapHandle,
        coords: Coords,
        zoom: u8,
        options: PanOptions,
    ) -> Result<()> {
        debug!(
            "Pan to {} at zoom {} (animate: {}, {}s)",
            coords, zoom, options.animate, options.duration_secs
        );
        self.center = Some(coords);
        self.zoom = Some(zoom);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapty_core::view::marker_for;
    use mapty_core::{Workout, WorkoutInput};

    #[test]
    fn test_tracks_markers_and_view() {
        let mut map = TerminalMap::new();
        let handle = map.init(Coords::new(0.0, 0.0), 13).unwrap();

        let workout =
            Workout::create(Coords::new(40.7, -74.0), WorkoutInput::running(5.0, 25.0, 180.0))
                .unwrap();
        map.place_marker(handle, &marker_for(&workout)).unwrap();
        assert_eq!(map.markers().len(), 1);

        map.pan_to(handle, workout.coords(), 16, PanOptions::default()).unwrap();
        assert_eq!(map.center(), Some(workout.coords()));
        assert_eq!(map.zoom(), Some(16));

        map.remove_marker(handle, workout.id()).unwrap();
        assert!(map.markers().is_empty());
    }
}
