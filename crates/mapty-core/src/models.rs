pub mod coords;
pub mod record;
pub mod workout;

pub use coords::Coords;
pub use record::WorkoutRecord;
pub use workout::{
    Activity, ActivityInput, Workout, WorkoutId, WorkoutInput, WorkoutKind, WorkoutPatch,
};
