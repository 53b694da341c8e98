use crate::error::Result;
use crate::models::Coords;

/// Port for one-shot position lookup
pub trait GeolocationProvider {
    /// Current position, or `MaptyError::LocationUnavailable` when the lookup
    /// is denied or fails
    fn current_position(&self) -> Result<Coords>;
}
