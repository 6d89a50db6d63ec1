use chrono::Utc;
use liftlog_domain::{
    ActiveWorkout, CreateError, Name, PREVIOUS_WORKOUT_LIMIT, PreviousPerformance, RestTimer,
    SetEntry, TickToken, TimerTick, WorkoutID, WorkoutService,
};
use log::debug;

use crate::alert::{AlertDevice, Alerter};

/// Wires the active workout, the app-wide rest timer and the
/// previous-performance lookup together and hands finished sessions to
/// the workout service.
///
/// Exactly one session is active at a time; the orchestrator is created
/// at application start and lives for the process. The rest timer is
/// deliberately independent of the workout value: it keeps counting
/// across exercise mutations, session resets and navigation.
pub struct SessionOrchestrator<S, D> {
    service: S,
    workout: ActiveWorkout,
    rest_timer: RestTimer,
    previous: PreviousPerformance,
    alerter: Alerter<D>,
    saving: bool,
}

impl<S: WorkoutService, D: AlertDevice> SessionOrchestrator<S, D> {
    pub fn new(service: S, alerter: Alerter<D>) -> Self {
        Self {
            service,
            workout: ActiveWorkout::new(),
            rest_timer: RestTimer::new(),
            previous: PreviousPerformance::new(),
            alerter,
            saving: false,
        }
    }

    #[must_use]
    pub fn workout(&self) -> &ActiveWorkout {
        &self.workout
    }

    /// The session is mutated directly on the model. Callers must not
    /// mutate while [`finish`] is in flight (disable input while saving).
    ///
    /// [`finish`]: SessionOrchestrator::finish
    pub fn workout_mut(&mut self) -> &mut ActiveWorkout {
        &mut self.workout
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Saves the session and resets the model. An empty session or a
    /// finish already in flight is a no-op reported as `Ok(None)`. On
    /// failure the accumulated session is preserved and the saving flag
    /// cleared, so the caller can retry without re-entering data.
    pub async fn finish(&mut self) -> Result<Option<WorkoutID>, CreateError> {
        if self.workout.is_empty() || self.saving {
            return Ok(None);
        }

        self.saving = true;
        let result = self
            .service
            .create_workout(
                self.workout.template_id(),
                self.workout.started_at(),
                Utc::now(),
                self.workout.exercises().to_vec(),
            )
            .await;
        self.saving = false;

        match result {
            Ok(workout) => {
                self.workout.reset();
                self.previous.clear();
                Ok(Some(workout.id))
            }
            Err(err) => Err(err),
        }
    }

    /// Abandons the session without saving.
    pub fn discard(&mut self) {
        self.workout.reset();
        self.previous.clear();
    }

    /// Sets of the most recent prior workout containing `name`, used as
    /// dimmed placeholders next to the inputs.
    #[must_use]
    pub fn previous_sets_for(&self, name: &Name) -> Option<&[SetEntry]> {
        self.previous.sets_for(name)
    }

    /// Re-resolves previous performance when the session's exercise
    /// names changed. Lookup failures leave the current mapping in place;
    /// missing history is not an error.
    pub async fn refresh_previous(&mut self) {
        let names = self.workout.exercise_names();
        if !self.previous.needs_refresh(&names) {
            return;
        }

        let ticket = self.previous.begin_refresh(&names);
        match self.service.get_workouts(PREVIOUS_WORKOUT_LIMIT).await {
            Ok(workouts) => self.previous.complete(ticket, &workouts),
            Err(err) => debug!("previous performance lookup failed: {err}"),
        }
    }

    #[must_use]
    pub fn rest_timer(&self) -> &RestTimer {
        &self.rest_timer
    }

    pub fn start_rest(&mut self, duration: u32) -> TickToken {
        self.rest_timer.start(duration)
    }

    pub fn pause_rest(&mut self) {
        self.rest_timer.pause();
    }

    pub fn resume_rest(&mut self) -> Option<TickToken> {
        self.rest_timer.resume()
    }

    pub fn reset_rest(&mut self) {
        self.rest_timer.reset();
    }

    /// Advances the countdown by one second. Plays the completion alert
    /// when the countdown elapses.
    pub fn tick_rest(&mut self, token: TickToken) -> TimerTick {
        let tick = self.rest_timer.tick(token);
        if tick == TimerTick::Elapsed {
            self.alerter.play();
        }
        tick
    }
}
