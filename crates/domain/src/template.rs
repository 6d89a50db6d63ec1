use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseType, Name, ReadError, Reps, UpdateError};

#[allow(async_fn_in_trait)]
pub trait TemplateRepository {
    /// Templates, newest first.
    async fn read_templates(&self) -> Result<Vec<Template>, ReadError>;
    async fn create_template(
        &self,
        name: Name,
        exercises: Vec<TemplateExercise>,
    ) -> Result<Template, CreateError>;
    async fn modify_template(
        &self,
        id: TemplateID,
        name: Option<Name>,
        exercises: Option<Vec<TemplateExercise>>,
    ) -> Result<Template, UpdateError>;
    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait TemplateService {
    async fn get_templates(&self) -> Result<Vec<Template>, ReadError>;
    async fn create_template(
        &self,
        name: Name,
        exercises: Vec<TemplateExercise>,
    ) -> Result<Template, CreateError>;
    async fn modify_template(
        &self,
        id: TemplateID,
        name: Option<Name>,
        exercises: Option<Vec<TemplateExercise>>,
    ) -> Result<Template, UpdateError>;
    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError>;
}

/// Reusable blueprint for seeding new workout sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateID,
    pub name: Name,
    pub created_at: DateTime<Utc>,
    pub exercises: Vec<TemplateExercise>,
}

impl Template {
    /// Number of sets a session seeded from this template starts with.
    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.default_sets.max(1)).sum()
    }
}

/// One exercise slot of a template. `default_reps` is a placeholder hint
/// shown in the session UI, not a prefilled value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateExercise {
    pub name: Name,
    pub exercise_type: ExerciseType,
    pub default_sets: u32,
    pub default_reps: Reps,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateID(Uuid);

impl TemplateID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for TemplateID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for TemplateID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
