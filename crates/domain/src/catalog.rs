use crate::{ExerciseType, ReadError};

/// Queries shorter than this are not sent to the search backend.
pub const MIN_QUERY_LENGTH: usize = 2;

#[allow(async_fn_in_trait)]
pub trait ExerciseCatalogRepository {
    /// Name search against the third-party exercise catalog. Failures
    /// degrade to an empty result list at the call site; they never
    /// block the session.
    async fn search_exercises(&self, query: &str) -> Result<Vec<CatalogExercise>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseCatalogService {
    async fn search_exercises(&self, query: &str) -> Result<Vec<CatalogExercise>, ReadError>;
}

/// Search result from the exercise catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogExercise {
    pub name: String,
    pub muscle_group: String,
    pub difficulty: String,
    pub equipment: Vec<String>,
}

impl CatalogExercise {
    /// Infers the equipment category from the catalog's equipment list:
    /// barbells (including EZ curl bars) map to `Barbell`, dumbbells to
    /// `Dumbbell`, "body only" or no equipment to `Bodyweight`, and
    /// everything else (cable, smith machine, ...) to `Machine`.
    #[must_use]
    pub fn exercise_type(&self) -> ExerciseType {
        let joined = self.equipment.join(" ").to_lowercase();

        if joined.contains("barbell") || joined.contains("ez curl bar") {
            ExerciseType::Barbell
        } else if joined.contains("dumbbell") {
            ExerciseType::Dumbbell
        } else if joined.contains("body only") || self.equipment.is_empty() {
            ExerciseType::Bodyweight
        } else {
            ExerciseType::Machine
        }
    }
}
