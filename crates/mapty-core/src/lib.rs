//! Mapty Core - Workout models, store, view synchronization, and configuration
//!
//! This crate contains the domain logic and port definitions for the Mapty
//! workout tracker. Adapters for persistence live in `mapty-store`; the
//! host application lives in `mapty-cli`.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod store;
pub mod view;

pub use app::{App, FormState, Submitted};
pub use error::{MaptyError, Result};
pub use models::{
    Activity, ActivityInput, Coords, Workout, WorkoutId, WorkoutInput, WorkoutKind, WorkoutPatch,
};
pub use store::WorkoutStore;
pub use view::{ListItem, MapView, Marker};
