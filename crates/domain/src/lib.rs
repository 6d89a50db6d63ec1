#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod active_workout;
pub mod catalog;
pub mod error;
pub mod exercise;
pub mod history;
pub mod name;
pub mod rest_timer;
pub mod service;
pub mod session;
pub mod template;
pub mod user;
pub mod workout;

pub use active_workout::ActiveWorkout;
pub use catalog::{
    CatalogExercise, ExerciseCatalogRepository, ExerciseCatalogService, MIN_QUERY_LENGTH,
};
pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError};
pub use exercise::{
    CustomExercise, CustomExerciseID, CustomExerciseRepository, CustomExerciseService,
    ExerciseType, ExerciseTypeError,
};
pub use history::{
    FetchTicket, PREVIOUS_WORKOUT_LIMIT, PreviousPerformance, PreviousSets, previous_sets,
};
pub use name::{Name, NameError};
pub use rest_timer::{REST_PRESETS, RestTimer, TickToken, TimerTick};
pub use service::Service;
pub use session::{SessionRepository, SessionService};
pub use template::{Template, TemplateExercise, TemplateID, TemplateRepository, TemplateService};
pub use user::{User, UserID};
pub use workout::{
    ExerciseEntry, Reps, RepsError, SetEntry, SetUpdate, Weight, WeightError, Workout, WorkoutID,
    WorkoutRepository, WorkoutService,
};
