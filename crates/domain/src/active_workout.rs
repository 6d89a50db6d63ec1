use chrono::{DateTime, Utc};

use crate::{
    ExerciseType, Name, SetEntry, SetUpdate, Template, TemplateID, workout::ExerciseEntry,
};

/// The in-progress workout session.
///
/// A single value owned by exactly one writer (the UI event loop); every
/// transition takes `&mut self` and leaves the session in a valid state.
/// Out-of-range indices are ignored rather than rejected, as they can only
/// result from coordination bugs upstream, never from user input. Blank
/// exercise names are unrepresentable here because [`Name`] validates at
/// the input boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveWorkout {
    exercises: Vec<ExerciseEntry>,
    started_at: DateTime<Utc>,
    template_id: Option<TemplateID>,
}

impl ActiveWorkout {
    #[must_use]
    pub fn new() -> Self {
        Self {
            exercises: Vec::new(),
            started_at: Utc::now(),
            template_id: None,
        }
    }

    #[must_use]
    pub fn exercises(&self) -> &[ExerciseEntry] {
        &self.exercises
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn template_id(&self) -> Option<TemplateID> {
        self.template_id
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Names of all exercises in display order. Repeats are retained.
    #[must_use]
    pub fn exercise_names(&self) -> Vec<Name> {
        self.exercises.iter().map(|e| e.name.clone()).collect()
    }

    /// Appends an exercise with a single empty set. Repeats of a name
    /// already in the session are permitted.
    pub fn add_exercise(&mut self, name: Name, exercise_type: ExerciseType) {
        self.exercises.push(ExerciseEntry {
            name,
            exercise_type,
            sets: vec![SetEntry::empty()],
        });
    }

    pub fn remove_exercise(&mut self, exercise: usize) {
        if exercise < self.exercises.len() {
            self.exercises.remove(exercise);
        }
    }

    pub fn add_set(&mut self, exercise: usize) {
        if let Some(entry) = self.exercises.get_mut(exercise) {
            entry.sets.push(SetEntry::empty());
        }
    }

    /// Removes a set unless it is the exercise's last one. An exercise
    /// must never be left with zero sets; remove the exercise instead.
    pub fn remove_set(&mut self, exercise: usize, set: usize) {
        if let Some(entry) = self.exercises.get_mut(exercise) {
            if entry.sets.len() > 1 && set < entry.sets.len() {
                entry.sets.remove(set);
            }
        }
    }

    pub fn update_set(&mut self, exercise: usize, set: usize, update: SetUpdate) {
        if let Some(entry) = self.set_mut(exercise, set) {
            if let Some(weight) = update.weight {
                entry.weight = weight;
            }
            if let Some(reps) = update.reps {
                entry.reps = reps;
            }
            if let Some(completed) = update.completed {
                entry.completed = completed;
            }
        }
    }

    pub fn toggle_set_complete(&mut self, exercise: usize, set: usize) {
        if let Some(entry) = self.set_mut(exercise, set) {
            entry.completed = !entry.completed;
        }
    }

    /// Replaces the whole session with one seeded from a template: every
    /// template exercise expands into its default number of empty sets
    /// (at least one), the start time is taken anew and the template is
    /// recorded for the eventual history entry.
    pub fn init_from_template(&mut self, template: &Template) {
        self.exercises = template
            .exercises
            .iter()
            .map(|e| ExerciseEntry {
                name: e.name.clone(),
                exercise_type: e.exercise_type,
                sets: (0..e.default_sets.max(1)).map(|_| SetEntry::empty()).collect(),
            })
            .collect();
        self.started_at = Utc::now();
        self.template_id = Some(template.id);
    }

    /// Returns to the empty initial state with a fresh start time.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn set_mut(&mut self, exercise: usize, set: usize) -> Option<&mut SetEntry> {
        self.exercises
            .get_mut(exercise)
            .and_then(|e| e.sets.get_mut(set))
    }
}

impl Default for ActiveWorkout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Reps, TemplateExercise, Weight};

    use super::*;

    fn name(name: &str) -> Name {
        Name::new(name).unwrap()
    }

    fn workout_with(names: &[&str]) -> ActiveWorkout {
        let mut workout = ActiveWorkout::new();
        for n in names {
            workout.add_exercise(name(n), ExerciseType::Barbell);
        }
        workout
    }

    #[test]
    fn test_add_exercise() {
        let workout = workout_with(&["Squat", "Bench Press", "Squat"]);
        assert_eq!(
            workout.exercise_names(),
            vec![name("Squat"), name("Bench Press"), name("Squat")]
        );
        assert!(workout.exercises().iter().all(|e| e.sets.len() == 1));
        assert_eq!(workout.template_id(), None);
    }

    #[rstest]
    #[case(0, &["Bench Press", "Deadlift"])]
    #[case(1, &["Squat", "Deadlift"])]
    #[case(2, &["Squat", "Bench Press"])]
    #[case(3, &["Squat", "Bench Press", "Deadlift"])]
    fn test_remove_exercise_preserves_order(#[case] index: usize, #[case] expected: &[&str]) {
        let mut workout = workout_with(&["Squat", "Bench Press", "Deadlift"]);
        workout.remove_exercise(index);
        assert_eq!(
            workout.exercise_names(),
            expected.iter().map(|n| name(n)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_add_set() {
        let mut workout = workout_with(&["Squat"]);
        workout.add_set(0);
        workout.add_set(0);
        workout.add_set(7);
        assert_eq!(workout.exercises()[0].sets.len(), 3);
    }

    #[test]
    fn test_remove_set_keeps_last_set() {
        let mut workout = workout_with(&["Squat"]);
        workout.remove_set(0, 0);
        assert_eq!(workout.exercises()[0].sets.len(), 1);

        workout.add_set(0);
        workout.remove_set(0, 1);
        assert_eq!(workout.exercises()[0].sets.len(), 1);
    }

    #[test]
    fn test_remove_set_out_of_range() {
        let mut workout = workout_with(&["Squat"]);
        workout.add_set(0);
        workout.remove_set(0, 2);
        workout.remove_set(1, 0);
        assert_eq!(workout.exercises()[0].sets.len(), 2);
    }

    #[test]
    fn test_update_set_merges_fields() {
        let mut workout = workout_with(&["Squat"]);
        workout.update_set(
            0,
            0,
            SetUpdate {
                weight: Some(Weight::new(100.0).unwrap()),
                reps: None,
                completed: None,
            },
        );
        workout.update_set(
            0,
            0,
            SetUpdate {
                weight: None,
                reps: Some(Reps::new(5).unwrap()),
                completed: None,
            },
        );

        let set = workout.exercises()[0].sets[0];
        assert_eq!(set.weight, Weight::new(100.0).unwrap());
        assert_eq!(set.reps, Reps::new(5).unwrap());
        assert!(!set.completed);

        workout.update_set(0, 9, SetUpdate::default());
        workout.update_set(9, 0, SetUpdate::default());
        assert_eq!(workout.exercises()[0].sets.len(), 1);
    }

    #[test]
    fn test_toggle_set_complete_is_involution() {
        let mut workout = workout_with(&["Squat"]);
        let before = workout.clone();

        workout.toggle_set_complete(0, 0);
        assert!(workout.exercises()[0].sets[0].completed);

        workout.toggle_set_complete(0, 0);
        assert_eq!(workout, before);
    }

    #[test]
    fn test_init_from_template() {
        let template = Template {
            id: 1.into(),
            name: name("Push Day"),
            created_at: Utc::now(),
            exercises: vec![
                TemplateExercise {
                    name: name("Squat"),
                    exercise_type: ExerciseType::Barbell,
                    default_sets: 3,
                    default_reps: Reps::new(5).unwrap(),
                },
                TemplateExercise {
                    name: name("Plank"),
                    exercise_type: ExerciseType::Bodyweight,
                    default_sets: 0,
                    default_reps: Reps::default(),
                },
            ],
        };

        let mut workout = workout_with(&["Leftover"]);
        workout.init_from_template(&template);

        assert_eq!(workout.template_id(), Some(1.into()));
        assert_eq!(workout.exercise_names(), vec![name("Squat"), name("Plank")]);
        assert_eq!(workout.exercises()[0].sets, vec![SetEntry::empty(); 3]);
        // a zero-set template exercise still yields one set
        assert_eq!(workout.exercises()[1].sets, vec![SetEntry::empty()]);
    }

    #[test]
    fn test_reset() {
        let mut workout = workout_with(&["Squat"]);
        workout.toggle_set_complete(0, 0);
        workout.reset();
        assert!(workout.is_empty());
        assert_eq!(workout.template_id(), None);
    }
}
