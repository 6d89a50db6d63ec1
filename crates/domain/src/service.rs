use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::{
    CatalogExercise, CreateError, CustomExercise, CustomExerciseRepository, CustomExerciseService,
    DeleteError, ExerciseCatalogRepository, ExerciseCatalogService, ExerciseEntry, ExerciseType,
    Name, ReadError, SessionRepository, SessionService, Template, TemplateExercise, TemplateID,
    TemplateRepository, TemplateService, UpdateError, User, UserID, Workout, WorkoutID,
    WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn request_session(&self, user_id: UserID) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.request_session(user_id),
            ReadError,
            "request",
            "session"
        )
    }

    async fn get_session(&self) -> Result<User, ReadError> {
        log_on_error!(
            self.repository.initialize_session(),
            ReadError,
            "get",
            "session"
        )
    }

    async fn delete_session(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_session(),
            DeleteError,
            "delete",
            "session"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self, limit: usize) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(limit),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn create_workout(
        &self,
        template_id: Option<TemplateID>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        exercises: Vec<ExerciseEntry>,
    ) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository
                .create_workout(template_id, started_at, completed_at, exercises),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: TemplateRepository> TemplateService for Service<R> {
    async fn get_templates(&self) -> Result<Vec<Template>, ReadError> {
        log_on_error!(
            self.repository.read_templates(),
            ReadError,
            "get",
            "templates"
        )
    }

    async fn create_template(
        &self,
        name: Name,
        exercises: Vec<TemplateExercise>,
    ) -> Result<Template, CreateError> {
        log_on_error!(
            self.repository.create_template(name, exercises),
            CreateError,
            "create",
            "template"
        )
    }

    async fn modify_template(
        &self,
        id: TemplateID,
        name: Option<Name>,
        exercises: Option<Vec<TemplateExercise>>,
    ) -> Result<Template, UpdateError> {
        log_on_error!(
            self.repository.modify_template(id, name, exercises),
            UpdateError,
            "modify",
            "template"
        )
    }

    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError> {
        log_on_error!(
            self.repository.delete_template(id),
            DeleteError,
            "delete",
            "template"
        )
    }
}

impl<R: CustomExerciseRepository> CustomExerciseService for Service<R> {
    async fn get_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError> {
        log_on_error!(
            self.repository.read_custom_exercises(),
            ReadError,
            "get",
            "custom exercises"
        )
    }

    async fn add_custom_exercise(
        &self,
        name: Name,
        exercise_type: ExerciseType,
    ) -> Result<CustomExercise, CreateError> {
        log_on_error!(
            self.repository.create_custom_exercise(name, exercise_type),
            CreateError,
            "create",
            "custom exercise"
        )
    }
}

impl<R: ExerciseCatalogRepository> ExerciseCatalogService for Service<R> {
    async fn search_exercises(&self, query: &str) -> Result<Vec<CatalogExercise>, ReadError> {
        log_on_error!(
            self.repository.search_exercises(query),
            ReadError,
            "search",
            "exercise catalog"
        )
    }
}
