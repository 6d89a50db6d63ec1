use std::fmt;

use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, Name, ReadError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait CustomExerciseRepository {
    async fn read_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError>;
    async fn create_custom_exercise(
        &self,
        name: Name,
        exercise_type: ExerciseType,
    ) -> Result<CustomExercise, CreateError>;
}

#[allow(async_fn_in_trait)]
pub trait CustomExerciseService {
    async fn get_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError>;
    async fn add_custom_exercise(
        &self,
        name: Name,
        exercise_type: ExerciseType,
    ) -> Result<CustomExercise, CreateError>;

    /// Validates a name for a new registry entry, deduplicating
    /// case-insensitively against the existing entries.
    async fn validate_new_name(&self, name: &str) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_custom_exercises().await {
                Ok(exercises) => {
                    if exercises.iter().any(|e| e.name.key() == name.key()) {
                        Err(ValidationError::Conflict("name".to_string()))
                    } else {
                        Ok(name)
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

/// Equipment category of an exercise. Only determines whether the weight
/// field of a set is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExerciseType {
    Barbell,
    Dumbbell,
    Bodyweight,
    Machine,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 4] = [
        ExerciseType::Barbell,
        ExerciseType::Dumbbell,
        ExerciseType::Bodyweight,
        ExerciseType::Machine,
    ];

    /// Bodyweight sets carry reps only.
    #[must_use]
    pub fn uses_weight(self) -> bool {
        !matches!(self, ExerciseType::Bodyweight)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ExerciseType::Barbell => "barbell",
                ExerciseType::Dumbbell => "dumbbell",
                ExerciseType::Bodyweight => "bodyweight",
                ExerciseType::Machine => "machine",
            }
        )
    }
}

impl TryFrom<&str> for ExerciseType {
    type Error = ExerciseTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "barbell" => Ok(ExerciseType::Barbell),
            "dumbbell" => Ok(ExerciseType::Dumbbell),
            "bodyweight" => Ok(ExerciseType::Bodyweight),
            "machine" => Ok(ExerciseType::Machine),
            _ => Err(ExerciseTypeError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseTypeError {
    #[error("unknown exercise type: {0}")]
    Unknown(String),
}

/// User-defined exercise saved for reuse in the add-exercise flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomExercise {
    pub id: CustomExerciseID,
    pub name: Name,
    pub exercise_type: ExerciseType,
    pub created_at: DateTime<Utc>,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CustomExerciseID(Uuid);

impl CustomExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for CustomExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for CustomExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ExerciseType::Barbell, "barbell")]
    #[case(ExerciseType::Dumbbell, "dumbbell")]
    #[case(ExerciseType::Bodyweight, "bodyweight")]
    #[case(ExerciseType::Machine, "machine")]
    fn test_exercise_type_display(#[case] exercise_type: ExerciseType, #[case] string: &str) {
        assert_eq!(exercise_type.to_string(), string);
        assert_eq!(ExerciseType::try_from(string), Ok(exercise_type));
    }

    #[test]
    fn test_exercise_type_all_roundtrips() {
        for exercise_type in ExerciseType::ALL {
            assert_eq!(
                ExerciseType::try_from(exercise_type.to_string().as_str()),
                Ok(exercise_type)
            );
        }
    }

    #[test]
    fn test_exercise_type_try_from_unknown() {
        assert_eq!(
            ExerciseType::try_from("kettlebell"),
            Err(ExerciseTypeError::Unknown("kettlebell".to_string()))
        );
    }

    #[rstest]
    #[case(ExerciseType::Barbell, true)]
    #[case(ExerciseType::Dumbbell, true)]
    #[case(ExerciseType::Bodyweight, false)]
    #[case(ExerciseType::Machine, true)]
    fn test_exercise_type_uses_weight(#[case] exercise_type: ExerciseType, #[case] expected: bool) {
        assert_eq!(exercise_type.uses_weight(), expected);
    }

    #[test]
    fn test_custom_exercise_id_nil() {
        assert!(CustomExerciseID::nil().is_nil());
        assert_eq!(CustomExerciseID::nil(), CustomExerciseID::default());
    }
}
