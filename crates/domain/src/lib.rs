#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod editor;
mod error;
mod exercise;
mod name;
mod quantity;
mod routine;
mod service;
mod user;
mod workout;

pub use editor::{EntryField, RoutineEditor, RoutineEntry};
pub use error::{CreateError, DeleteError, IndexError, ReadError, StorageError, UpdateError};
pub use exercise::{
    Equipment, EquipmentError, Exercise, ExerciseFilter, ExerciseID, ExerciseRepository,
    ExerciseService, MuscleGroup, MuscleGroupError, Property,
};
pub use name::{Name, NameError};
pub use quantity::{
    Reps, RepsError, Sets, SetsError, SupersetID, SupersetIDError, Time, TimeError, Weight,
    WeightError,
};
pub use routine::{
    Category, CategoryError, Routine, RoutineEntryRecord, RoutineID, RoutineRepository,
    RoutineService,
};
pub use service::Service;
pub use user::{Role, RoleError, User, UserID, UserRepository, UserService};
pub use workout::{
    Workout, WorkoutEntry, WorkoutID, WorkoutRepository, WorkoutService, WorkoutSet,
    format_duration,
};
