use std::{fs, io, path::PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use liftlog_app::{Settings, SettingsRepository};
use liftlog_domain::{
    CreateError, CustomExercise, CustomExerciseRepository, DeleteError, ExerciseEntry,
    ExerciseType, Name, ReadError, Reps, SetEntry, StorageError, Template, TemplateExercise,
    TemplateID, TemplateRepository, UpdateError, Weight, Workout, WorkoutID, WorkoutRepository,
};

const WORKOUTS_FILE: &str = "workouts.json";
const TEMPLATES_FILE: &str = "templates.json";
const CUSTOM_EXERCISES_FILE: &str = "custom_exercises.json";
const SETTINGS_FILE: &str = "settings.json";

/// Local-first persistence: one JSON document per collection below a
/// root directory. Domain types are converted to serde documents at this
/// boundary; the domain crates stay serde-free.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StorageError> {
        let data = match fs::read_to_string(self.root.join(file)) {
            Ok(data) => data,
            // a collection that was never written is empty, not an error
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(corrupt(err)),
        };
        serde_json::from_str(&data).map_err(corrupt)
    }

    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(corrupt)?;
        let data = serde_json::to_string_pretty(items).map_err(corrupt)?;
        fs::write(self.root.join(file), data).map_err(corrupt)
    }
}

fn corrupt(err: impl std::error::Error + 'static) -> StorageError {
    StorageError::Other(Box::new(err))
}

impl WorkoutRepository for FileStore {
    async fn read_workouts(&self, limit: usize) -> Result<Vec<Workout>, ReadError> {
        let mut docs: Vec<WorkoutDoc> = self.read_collection(WORKOUTS_FILE)?;
        docs.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        docs.truncate(limit);
        docs.into_iter()
            .map(|doc| Workout::try_from(doc).map_err(ReadError::from))
            .collect()
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
        let mut docs: Vec<WorkoutDoc> = self.read_collection(WORKOUTS_FILE)?;
        docs.push(WorkoutDoc::from(&workout));
        self.write_collection(WORKOUTS_FILE, &docs)?;
        Ok(workout)
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        let mut docs: Vec<WorkoutDoc> = self.read_collection(WORKOUTS_FILE)?;
        let len = docs.len();
        docs.retain(|doc| doc.id != *id);
        if docs.len() == len {
            return Err(DeleteError::NotFound);
        }
        self.write_collection(WORKOUTS_FILE, &docs)?;
        Ok(id)
    }
}

impl TemplateRepository for FileStore {
    async fn read_templates(&self) -> Result<Vec<Template>, ReadError> {
        let mut docs: Vec<TemplateDoc> = self.read_collection(TEMPLATES_FILE)?;
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        docs.into_iter()
            .map(|doc| Template::try_from(doc).map_err(ReadError::from))
            .collect()
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
        let mut docs: Vec<TemplateDoc> = self.read_collection(TEMPLATES_FILE)?;
        docs.push(TemplateDoc::from(&template));
        self.write_collection(TEMPLATES_FILE, &docs)?;
        Ok(template)
    }

    async fn modify_template(
        &self,
        id: TemplateID,
        name: Option<Name>,
        exercises: Option<Vec<TemplateExercise>>,
    ) -> Result<Template, UpdateError> {
        let mut docs: Vec<TemplateDoc> = self.read_collection(TEMPLATES_FILE)?;
        let Some(doc) = docs.iter_mut().find(|doc| doc.id == *id) else {
            return Err(UpdateError::NotFound);
        };
        if let Some(name) = name {
            doc.name = name.to_string();
        }
        if let Some(exercises) = exercises {
            doc.exercises = exercises.iter().map(TemplateExerciseDoc::from).collect();
        }
        let template = Template::try_from(doc.clone()).map_err(UpdateError::from)?;
        self.write_collection(TEMPLATES_FILE, &docs)?;
        Ok(template)
    }

    async fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError> {
        let mut docs: Vec<TemplateDoc> = self.read_collection(TEMPLATES_FILE)?;
        let len = docs.len();
        docs.retain(|doc| doc.id != *id);
        if docs.len() == len {
            return Err(DeleteError::NotFound);
        }
        self.write_collection(TEMPLATES_FILE, &docs)?;
        Ok(id)
    }
}

impl CustomExerciseRepository for FileStore {
    async fn read_custom_exercises(&self) -> Result<Vec<CustomExercise>, ReadError> {
        let mut docs: Vec<CustomExerciseDoc> = self.read_collection(CUSTOM_EXERCISES_FILE)?;
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        docs.into_iter()
            .map(|doc| CustomExercise::try_from(doc).map_err(ReadError::from))
            .collect()
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
        let mut docs: Vec<CustomExerciseDoc> = self.read_collection(CUSTOM_EXERCISES_FILE)?;
        docs.push(CustomExerciseDoc::from(&exercise));
        self.write_collection(CUSTOM_EXERCISES_FILE, &docs)?;
        Ok(exercise)
    }
}

impl SettingsRepository for FileStore {
    async fn read_settings(&self) -> Result<Settings, String> {
        let data = match fs::read_to_string(self.root.join(SETTINGS_FILE)) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(err) => return Err(err.to_string()),
        };
        serde_json::from_str(&data).map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        fs::create_dir_all(&self.root).map_err(|err| err.to_string())?;
        let data = serde_json::to_string_pretty(&settings).map_err(|err| err.to_string())?;
        fs::write(self.root.join(SETTINGS_FILE), data).map_err(|err| err.to_string())
    }
}

#[derive(Serialize, Deserialize, Clone)]
struct WorkoutDoc {
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    template_id: Option<Uuid>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    exercises: Vec<ExerciseDoc>,
}

#[derive(Serialize, Deserialize, Clone)]
struct ExerciseDoc {
    name: String,
    #[serde(rename = "type")]
    exercise_type: String,
    sets: Vec<SetDoc>,
}

#[derive(Serialize, Deserialize, Clone, Copy)]
struct SetDoc {
    weight: f32,
    reps: u32,
    completed: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct TemplateDoc {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    exercises: Vec<TemplateExerciseDoc>,
}

#[derive(Serialize, Deserialize, Clone)]
struct TemplateExerciseDoc {
    name: String,
    #[serde(rename = "type")]
    exercise_type: String,
    default_sets: u32,
    default_reps: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct CustomExerciseDoc {
    id: Uuid,
    name: String,
    #[serde(rename = "type")]
    exercise_type: String,
    created_at: DateTime<Utc>,
}

impl From<&Workout> for WorkoutDoc {
    fn from(workout: &Workout) -> Self {
        Self {
            id: *workout.id,
            template_id: workout.template_id.map(|id| *id),
            started_at: workout.started_at,
            completed_at: workout.completed_at,
            exercises: workout.exercises.iter().map(ExerciseDoc::from).collect(),
        }
    }
}

impl TryFrom<WorkoutDoc> for Workout {
    type Error = StorageError;

    fn try_from(doc: WorkoutDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            id: doc.id.into(),
            template_id: doc.template_id.map(Into::into),
            started_at: doc.started_at,
            completed_at: doc.completed_at,
            exercises: doc
                .exercises
                .into_iter()
                .map(ExerciseEntry::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<&ExerciseEntry> for ExerciseDoc {
    fn from(entry: &ExerciseEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            exercise_type: entry.exercise_type.to_string(),
            sets: entry.sets.iter().map(SetDoc::from).collect(),
        }
    }
}

impl TryFrom<ExerciseDoc> for ExerciseEntry {
    type Error = StorageError;

    fn try_from(doc: ExerciseDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            name: Name::new(&doc.name).map_err(corrupt)?,
            exercise_type: ExerciseType::try_from(doc.exercise_type.as_str()).map_err(corrupt)?,
            sets: doc
                .sets
                .into_iter()
                .map(SetEntry::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<&SetEntry> for SetDoc {
    fn from(set: &SetEntry) -> Self {
        Self {
            weight: f32::from(set.weight),
            reps: u32::from(set.reps),
            completed: set.completed,
        }
    }
}

impl TryFrom<SetDoc> for SetEntry {
    type Error = StorageError;

    fn try_from(doc: SetDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: Weight::new(doc.weight).map_err(corrupt)?,
            reps: Reps::new(doc.reps).map_err(corrupt)?,
            completed: doc.completed,
        })
    }
}

impl From<&Template> for TemplateDoc {
    fn from(template: &Template) -> Self {
        Self {
            id: *template.id,
            name: template.name.to_string(),
            created_at: template.created_at,
            exercises: template
                .exercises
                .iter()
                .map(TemplateExerciseDoc::from)
                .collect(),
        }
    }
}

impl TryFrom<TemplateDoc> for Template {
    type Error = StorageError;

    fn try_from(doc: TemplateDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            id: doc.id.into(),
            name: Name::new(&doc.name).map_err(corrupt)?,
            created_at: doc.created_at,
            exercises: doc
                .exercises
                .into_iter()
                .map(TemplateExercise::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<&TemplateExercise> for TemplateExerciseDoc {
    fn from(exercise: &TemplateExercise) -> Self {
        Self {
            name: exercise.name.to_string(),
            exercise_type: exercise.exercise_type.to_string(),
            default_sets: exercise.default_sets,
            default_reps: u32::from(exercise.default_reps),
        }
    }
}

impl TryFrom<TemplateExerciseDoc> for TemplateExercise {
    type Error = StorageError;

    fn try_from(doc: TemplateExerciseDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            name: Name::new(&doc.name).map_err(corrupt)?,
            exercise_type: ExerciseType::try_from(doc.exercise_type.as_str()).map_err(corrupt)?,
            default_sets: doc.default_sets,
            default_reps: Reps::new(doc.default_reps).map_err(corrupt)?,
        })
    }
}

impl From<&CustomExercise> for CustomExerciseDoc {
    fn from(exercise: &CustomExercise) -> Self {
        Self {
            id: *exercise.id,
            name: exercise.name.to_string(),
            exercise_type: exercise.exercise_type.to_string(),
            created_at: exercise.created_at,
        }
    }
}

impl TryFrom<CustomExerciseDoc> for CustomExercise {
    type Error = StorageError;

    fn try_from(doc: CustomExerciseDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            id: doc.id.into(),
            name: Name::new(&doc.name).map_err(corrupt)?,
            exercise_type: ExerciseType::try_from(doc.exercise_type.as_str()).map_err(corrupt)?,
            created_at: doc.created_at,
        })
    }
}
