use mapty_core::error::{MaptyError, Result};
use mapty_core::ports::GeolocationProvider;
use mapty_core::Coords;

/// Geolocation backed by a configured position
///
/// A terminal has no location service; the position comes from `home` in the
/// configuration, or from a per-command fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    position: Option<Coords>,
}

impl FixedLocation {
    pub fn new(position: Option<Coords>) -> Self {
        Self { position }
    }

    /// Use `fallback` when no position is configured
    pub fn or(self, fallback: Coords) -> Self {
        Self {
            position: self.position.or(Some(fallback)),
        }
    }
}

impl GeolocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Coords> {
        self.position.ok_or_else(|| MaptyError::LocationUnavailable {
            reason: "no home position configured".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_is_unavailable() {
        let err = FixedLocation::default().current_position().unwrap_err();
        assert!(matches!(err, MaptyError::LocationUnavailable { .. }));
    }

    #[test]
    fn test_configured_wins_over_fallback() {
        let home = Coords::new(52.52, 13.405);
        let located = FixedLocation::new(Some(home)).or(Coords::new(0.0, 0.0));
        assert_eq!(located.current_position().unwrap(), home);

        let fallback = FixedLocation::default().or(Coords::new(1.0, 2.0));
        assert_eq!(fallback.current_position().unwrap(), Coords::new(1.0, 2.0));
    }
}
