use std::collections::BTreeMap;

use crate::{Name, SetEntry, Workout};

/// Number of recent workouts scanned when resolving previous performance.
/// A cap on the fetch, not a semantic guarantee: an exercise last
/// performed before the window reports no history.
pub const PREVIOUS_WORKOUT_LIMIT: usize = 20;

/// Sets of the most recent prior workout per exercise, keyed by the
/// lowercased exercise name.
pub type PreviousSets = BTreeMap<String, Vec<SetEntry>>;

/// Resolves the latest completed set list for every requested exercise
/// name. `workouts` must be ordered most recent first; the first workout
/// containing a case-insensitive match wins. Names without any match in
/// the scanned window are absent from the result.
#[must_use]
pub fn previous_sets(workouts: &[Workout], names: &[Name]) -> PreviousSets {
    resolve(workouts, names.iter().map(Name::key))
}

fn resolve(workouts: &[Workout], keys: impl Iterator<Item = String>) -> PreviousSets {
    let mut result = PreviousSets::new();
    for key in keys {
        if result.contains_key(&key) {
            continue;
        }
        let latest = workouts
            .iter()
            .find_map(|w| w.exercises.iter().find(|e| e.name.key() == key));
        if let Some(exercise) = latest {
            result.insert(key, exercise.sets.clone());
        }
    }
    result
}

/// Ticket identifying one history fetch. Completions carrying an
/// outdated ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Holder for the resolved previous-performance mapping.
///
/// The underlying history fetch is asynchronous; the session stays fully
/// interactive while it is in flight. Only the newest fetch may publish
/// its result: starting another refresh or clearing the holder
/// invalidates every earlier ticket, so late completions cannot clobber
/// newer data or resurrect state after the session view is gone.
#[derive(Debug, Default)]
pub struct PreviousPerformance {
    keys: Vec<String>,
    sets: PreviousSets,
    generation: u64,
}

impl PreviousPerformance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `names` differ by content from the last requested names.
    /// Changes to set values alone never trigger a refresh.
    #[must_use]
    pub fn needs_refresh(&self, names: &[Name]) -> bool {
        let keys = names.iter().map(Name::key).collect::<Vec<_>>();
        keys != self.keys
    }

    pub fn begin_refresh(&mut self, names: &[Name]) -> FetchTicket {
        self.keys = names.iter().map(Name::key).collect();
        self.generation += 1;
        FetchTicket(self.generation)
    }

    /// Publishes the resolution for the fetched workouts, unless a newer
    /// refresh was started in the interim.
    pub fn complete(&mut self, ticket: FetchTicket, workouts: &[Workout]) {
        if ticket.0 != self.generation {
            return;
        }
        self.sets = resolve(workouts, self.keys.iter().cloned());
    }

    #[must_use]
    pub fn sets_for(&self, name: &Name) -> Option<&[SetEntry]> {
        self.sets.get(&name.key()).map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.keys.clear();
        self.sets.clear();
    }
}
