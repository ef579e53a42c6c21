//! Client-side mirror of the remote workout list.
//!
//! Every operation is split into a `begin_*` step that records the
//! start-of-attempt state and yields a [`Request`], the request itself
//! (run against a [`WorkoutApi`] anywhere, usually on a worker thread),
//! and [`WorkoutBoard::apply`] which folds the settled [`Outcome`] back in.
//! Outcomes are applied in the order they arrive; nothing is deduplicated.

use tracing::{info, warn};

use crate::api::WorkoutApi;
use crate::error::{ApiError, DraftError, Operation};
use crate::models::{Day, FormDraft, NewWorkout, WorkoutId, WorkoutRecord};

#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Load { day: Option<Day> },
    Create(NewWorkout),
    SetCompleted { id: WorkoutId, completed: bool },
    Delete { id: WorkoutId },
}

#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<Vec<WorkoutRecord>, ApiError>),
    Created(Result<WorkoutRecord, ApiError>),
    Updated {
        id: WorkoutId,
        result: Result<WorkoutRecord, ApiError>,
    },
    Deleted {
        id: WorkoutId,
        result: Result<(), ApiError>,
    },
}

impl Request {
    pub fn execute(self, api: &dyn WorkoutApi) -> Outcome {
        match self {
            Request::Load { day } => Outcome::Loaded(api.list(day)),
            Request::Create(workout) => Outcome::Created(api.create(&workout)),
            Request::SetCompleted { id, completed } => {
                let result = api.set_completed(&id, completed);
                Outcome::Updated { id, result }
            }
            Request::Delete { id } => {
                let result = api.delete(&id);
                Outcome::Deleted { id, result }
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutBoard {
    pub workouts: Vec<WorkoutRecord>,
    pub loading: bool,
    /// Empty means no error.
    pub error: String,
    pub form: FormDraft,
    pub filter_day: Option<Day>,
}

impl WorkoutBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// The first request of a session: an unfiltered load.
    pub fn start(&mut self) -> Request {
        self.begin_load()
    }

    pub fn begin_load(&mut self) -> Request {
        self.loading = true;
        self.error.clear();
        Request::Load {
            day: self.filter_day,
        }
    }

    /// Changing the filter always reloads; re-selecting the same value does not.
    pub fn set_filter(&mut self, day: Option<Day>) -> Option<Request> {
        if self.filter_day == day {
            return None;
        }
        self.filter_day = day;
        Some(self.begin_load())
    }

    pub fn begin_create(&mut self) -> Result<Request, DraftError> {
        let payload = self.form.to_payload()?;
        self.error.clear();
        Ok(Request::Create(payload))
    }

    pub fn begin_toggle(&self, id: &WorkoutId, current: bool) -> Request {
        Request::SetCompleted {
            id: id.clone(),
            completed: !current,
        }
    }

    pub fn begin_remove(&self, id: &WorkoutId) -> Request {
        Request::Delete { id: id.clone() }
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loaded(result) => {
                match result {
                    Ok(workouts) => {
                        info!(count = workouts.len(), day = ?self.filter_day, "workouts loaded");
                        self.workouts = workouts;
                    }
                    Err(err) => self.fail(Operation::Load, &err),
                }
                self.loading = false;
            }
            Outcome::Created(Ok(created)) => {
                info!(id = %created.id, "workout added");
                self.workouts.insert(0, created);
                self.form = FormDraft::default();
            }
            Outcome::Created(Err(err)) => self.fail(Operation::Create, &err),
            Outcome::Updated {
                id,
                result: Ok(updated),
            } => {
                for workout in self.workouts.iter_mut().filter(|w| w.id == id) {
                    *workout = updated.clone();
                }
            }
            Outcome::Updated { result: Err(err), .. } => self.fail(Operation::Update, &err),
            Outcome::Deleted { id, result: Ok(()) } => {
                self.workouts.retain(|w| w.id != id);
            }
            Outcome::Deleted { result: Err(err), .. } => self.fail(Operation::Delete, &err),
        }
    }

    fn fail(&mut self, operation: Operation, err: &ApiError) {
        warn!(?operation, error = %err, "workout request failed");
        self.error = operation.user_message().to_string();
    }

    pub fn load(&mut self, api: &dyn WorkoutApi) {
        let request = self.begin_load();
        self.apply(request.execute(api));
    }

    pub fn create(&mut self, api: &dyn WorkoutApi) -> Result<(), DraftError> {
        let request = self.begin_create()?;
        self.apply(request.execute(api));
        Ok(())
    }

    pub fn toggle_complete(&mut self, api: &dyn WorkoutApi, id: &WorkoutId, current: bool) {
        let request = self.begin_toggle(id, current);
        self.apply(request.execute(api));
    }

    pub fn remove(&mut self, api: &dyn WorkoutApi, id: &WorkoutId) {
        let request = self.begin_remove(id);
        self.apply(request.execute(api));
    }
}
