use std::{collections::VecDeque, sync::Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use liftlog_app::{Settings, SettingsRepository, log};
use liftlog_domain::{
    CatalogExercise, CreateError, CustomExercise, CustomExerciseRepository, DeleteError,
    ExerciseCatalogRepository, ExerciseEntry, ExerciseType, Name, ReadError, SessionRepository,
    StorageError, Template, TemplateExercise, TemplateID, TemplateRepository, UpdateError, User,
    UserID, Workout, WorkoutID, WorkoutRepository,
};

#[derive(Default)]
struct State {
    user: Option<User>,
    workouts: Vec<Workout>,
    templates: Vec<Template>,
    custom_exercises: Vec<CustomExercise>,
    catalog: Vec<CatalogExercise>,
    settings: Settings,
    log_entries: VecDeque<log::Entry>,
}

/// In-memory counterpart of [`FileStore`]: the same repository surface
/// without a filesystem. Used by tests and demo setups.
///
/// [`FileStore`]: crate::FileStore
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user(&self, user: User) {
        self.state.lock().unwrap().user = Some(user);
    }

    pub fn add_workout(&self, workout: Workout) {
        self.state.lock().unwrap().workouts.push(workout);
    }

    pub fn add_catalog_exercise(&self, exercise: CatalogExercise) {
        self.state.lock().unwrap().catalog.push(exercise);
    }
}

impl WorkoutRepository for MemoryStore {
    async fn read_workouts(&self, limit: usize) -> Result<Vec<Workout>, ReadError> {
        let state = self.state.lock().unwrap();
        let mut workouts = state.workouts.clone();
        workouts.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        workouts.truncate(limit);
        Ok(workouts)
    }

    async fn create_workout(
        &self,
        template_id: Option<TemplateID>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        exercises: Vec<ExerciseEntry>,
    ) -> Result<Workout, CreateError> {
        let workout = Workout {
            id: Uuid::new_v4().into(),
            template_id,
            started_at,
            completed_at,
            exercises,
        };
        self.state.lock().unwrap().workouts.push(workout.clone());
        Ok(workout)
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        let mut state = self.state.lock().unwrap();
        let len = state.workouts.len();
        state.workouts.retain(|workout| workout.id != id);
        if state.workouts.len() == len {
            return Err(DeleteError::NotFound);
        }
        Ok(id)
    }
}

impl TemplateRepository for MemoryStore {
    async fn read_templates(&self) -> Result<Vec<Template>, ReadError> {
        let state = self.state.lock().unwrap();
        let mut templates = state.templates.clone();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(templates)
    }

    async fn create_template(
        &self,
        name: Name,
        exercises: Vec<TemplateExercise>,
    ) -> Result<Template, CreateError> {
        let template = Template {
            id: Uuid::new_v4().into(),
            name,
            created_at: Utc::now(),
            exercises,
        };
        self.state.lock().unwrap().templates.push(template.clone());
        Ok(template)
    }

    async fn modify_template(
        &self,
        id: TemplateID,
        name: Option<Name>,
        exercises: Option<Vec<TemplateExercise>>,
    ) -> Result<Template, UpdateError> {
        let mut state = self.state.lock().unwrap();
        let Some(template) = state.templates.iter_mut().find(|t| t.id == id) else {
            return Err(UpdateError::NotFound);
        };
        if let Some(name) = name {
            template.name = name;
        }
        if let Some(exercises) = exercises {
            template.exercises = exercises;
        }
        Ok(template.clone())
    }

    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError> {
        let mut state = self.state.lock().unwrap();
        let len = state.templates.len();
        state.templates.retain(|template| template.id != id);
        if state.templates.len() == len {
            return Err(DeleteError::NotFound);
        }
        Ok(id)
    }
}

impl CustomExerciseRepository for MemoryStore {
    async fn read_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError> {
        let state = self.state.lock().unwrap();
        let mut exercises = state.custom_exercises.clone();
        exercises.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(exercises)
    }

    async fn create_custom_exercise(
        &self,
        name: Name,
        exercise_type: ExerciseType,
    ) -> Result<CustomExercise, CreateError> {
        let exercise = CustomExercise {
            id: Uuid::new_v4().into(),
            name,
            exercise_type,
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .custom_exercises
            .push(exercise.clone());
        Ok(exercise)
    }
}

impl SessionRepository for MemoryStore {
    async fn request_session(&self, user_id: UserID) -> Result<User, ReadError> {
        self.state
            .lock()
            .unwrap()
            .user
            .clone()
            .filter(|user| user.id == user_id)
            .ok_or(ReadError::NotFound)
    }

    async fn initialize_session(&self) -> Result<User, ReadError> {
        self.state
            .lock()
            .unwrap()
            .user
            .clone()
            .ok_or(ReadError::Storage(StorageError::NoSession))
    }

    async fn delete_session(&self) -> Result<(), DeleteError> {
        self.state.lock().unwrap().user = None;
        Ok(())
    }
}

impl ExerciseCatalogRepository for MemoryStore {
    async fn search_exercises(&self, query: &str) -> Result<Vec<CatalogExercise>, ReadError> {
        let query = query.trim().to_lowercase();
        Ok(self
            .state
            .lock()
            .unwrap()
            .catalog
            .iter()
            .filter(|exercise| exercise.name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }
}

impl SettingsRepository for MemoryStore {
    async fn read_settings(&self) -> Result<Settings, String> {
        Ok(self.state.lock().unwrap().settings)
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        self.state.lock().unwrap().settings = settings;
        Ok(())
    }
}

impl log::Repository for MemoryStore {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        Ok(self.state.lock().unwrap().log_entries.clone())
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| log::Error::Unknown(err.to_string()))?;
        state.log_entries.push_front(entry);
        state.log_entries.truncate(log::MAX_ENTRIES);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use liftlog_app::SettingsService;
    use liftlog_domain::{
        CustomExerciseService, ExerciseCatalogService, Service, SessionService, ValidationError,
        WorkoutService,
    };

    use super::*;

    fn name(name: &str) -> Name {
        Name::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_workout_service_roundtrip() {
        let service = Service::new(MemoryStore::new());

        let started_at = Utc::now() - Duration::hours(1);
        let workout = service
            .create_workout(
                None,
                started_at,
                Utc::now(),
                vec![ExerciseEntry {
                    name: name("Squat"),
                    exercise_type: ExerciseType::Barbell,
                    sets: vec![liftlog_domain::SetEntry::empty()],
                }],
            )
            .await
            .unwrap();

        assert_eq!(service.get_workouts(10).await.unwrap(), vec![workout.clone()]);

        service.delete_workout(workout.id).await.unwrap();
        assert_eq!(service.get_workouts(10).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_custom_exercise_name_dedup_is_case_insensitive() {
        let service = Service::new(MemoryStore::new());

        service
            .add_custom_exercise(name("Bench Press"), ExerciseType::Barbell)
            .await
            .unwrap();

        assert!(matches!(
            service.validate_new_name("bench press").await,
            Err(ValidationError::Conflict(_))
        ));
        assert_eq!(
            service.validate_new_name("Incline Bench Press").await.unwrap(),
            name("Incline Bench Press")
        );
        assert!(matches!(
            service.validate_new_name("  ").await,
            Err(ValidationError::Other(_))
        ));
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = MemoryStore::new();
        let user = User {
            id: 1.into(),
            name: name("Alice"),
        };
        store.set_user(user.clone());
        let service = Service::new(store);

        assert_eq!(service.get_session().await.unwrap(), user);
        assert_eq!(service.request_session(1.into()).await.unwrap(), user);
        assert!(matches!(
            service.request_session(2.into()).await,
            Err(ReadError::NotFound)
        ));

        service.delete_session().await.unwrap();
        assert!(matches!(
            service.get_session().await,
            Err(ReadError::Storage(StorageError::NoSession))
        ));
    }

    #[tokio::test]
    async fn test_catalog_search_matches_substrings() {
        let store = MemoryStore::new();
        store.add_catalog_exercise(CatalogExercise {
            name: "Barbell Bench Press".to_string(),
            muscle_group: "chest".to_string(),
            difficulty: "intermediate".to_string(),
            equipment: vec!["barbell".to_string()],
        });
        let service = Service::new(store);

        let results = service.search_exercises("bench").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].exercise_type(), ExerciseType::Barbell);
        assert_eq!(service.search_exercises("row").await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_settings_service_roundtrip() {
        let service = liftlog_app::Service::new(MemoryStore::new());

        let mut settings = service.get_settings().await.unwrap();
        assert_eq!(settings, Settings::default());

        settings.beep_volume = 0;
        service.set_settings(settings).await.unwrap();
        assert_eq!(service.get_settings().await.unwrap(), settings);
    }

    #[test]
    fn test_log_ring_buffer_is_bounded() {
        use liftlog_app::log::{Entry, Service};

        let service = liftlog_app::Service::new(MemoryStore::new());

        for i in 0..(log::MAX_ENTRIES + 5) {
            service
                .add_log_entry(Entry {
                    time: "Mar 01 17:00:00".to_string(),
                    level: ::log::Level::Info,
                    message: format!("entry {i}"),
                })
                .unwrap();
        }

        let entries = service.get_log_entries().unwrap();
        assert_eq!(entries.len(), log::MAX_ENTRIES);
        // newest first
        assert_eq!(entries[0].message, format!("entry {}", log::MAX_ENTRIES + 4));
    }
}
