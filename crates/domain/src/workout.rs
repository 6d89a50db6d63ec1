use chrono::{DateTime, Duration, Utc};
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseType, Name, ReadError, TemplateID};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    /// Completed workouts, most recent first by completion time.
    async fn read_workouts(&self, limit: usize) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        template_id: Option<TemplateID>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        exercises: Vec<ExerciseEntry>,
    ) -> Result<Workout, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, limit: usize) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        template_id: Option<TemplateID>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        exercises: Vec<ExerciseEntry>,
    ) -> Result<Workout, CreateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

/// Weight of a set in kg, with a resolution of 0.1 kg.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        let tenths = value * 10.0;

        if (tenths - tenths.round()).abs() > 1e-4 {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Repetition count of a set.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value >= 1000 {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// One repetition block within an exercise. The weight field is retained
/// for bodyweight exercises but ignored there.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SetEntry {
    pub weight: Weight,
    pub reps: Reps,
    pub completed: bool,
}

impl SetEntry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Partial update merged into a set by [`ActiveWorkout::update_set`].
///
/// [`ActiveWorkout::update_set`]: crate::ActiveWorkout::update_set
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SetUpdate {
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub name: Name,
    pub exercise_type: ExerciseType,
    pub sets: Vec<SetEntry>,
}

/// A completed workout as stored in history.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub template_id: Option<TemplateID>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub exercises: Vec<ExerciseEntry>,
}

impl Workout {
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn num_completed_sets(&self) -> usize {
        self.exercises
            .iter()
            .flat_map(|e| &e.sets)
            .filter(|s| s.completed)
            .count()
    }

    /// Sum of reps times weight over all completed sets. Weightless sets
    /// count their reps only.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn volume_load(&self) -> u32 {
        self.exercises
            .iter()
            .flat_map(|e| {
                e.sets.iter().filter(|s| s.completed).map(|s| {
                    let reps = u32::from(s.reps);
                    if e.exercise_type.uses_weight() && f32::from(s.weight) > 0.0 {
                        (reps as f32 * f32::from(s.weight)).round() as u32
                    } else {
                        reps
                    }
                })
            })
            .sum()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
