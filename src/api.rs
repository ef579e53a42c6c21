use reqwest::blocking::{Client, Response};
use reqwest::Url;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{CompletionPatch, Day, NewWorkout, WorkoutId, WorkoutRecord};

/// The remote workout resource.
pub trait WorkoutApi: Send + Sync {
    fn list(&self, day: Option<Day>) -> Result<Vec<WorkoutRecord>, ApiError>;
    fn create(&self, workout: &NewWorkout) -> Result<WorkoutRecord, ApiError>;
    fn set_completed(&self, id: &WorkoutId, completed: bool) -> Result<WorkoutRecord, ApiError>;
    fn delete(&self, id: &WorkoutId) -> Result<(), ApiError>;
}

pub struct HttpWorkoutApi {
    client: Client,
    base: Url,
}

impl HttpWorkoutApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::InvalidBaseUrl(base_url.to_string());
        let base = Url::parse(base_url).map_err(|_| invalid())?;
        if base.cannot_be_a_base() {
            return Err(invalid());
        }
        let client = Client::builder().build().map_err(ApiError::Transport)?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `<base>/api/workouts`, or `<base>/api/workouts/<id>` with the id
    /// percent-encoded as a single path segment.
    fn workouts_url(&self, id: Option<&WorkoutId>) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "workouts"]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status))
    }
}

impl WorkoutApi for HttpWorkoutApi {
    fn list(&self, day: Option<Day>) -> Result<Vec<WorkoutRecord>, ApiError> {
        let mut request = self.client.get(self.workouts_url(None));
        if let Some(day) = day {
            request = request.query(&[("day", day.as_str())]);
        }
        debug!(?day, "GET workouts");
        let response = request.send().map_err(ApiError::Transport)?;
        ensure_success(response)?.json().map_err(ApiError::Decode)
    }

    fn create(&self, workout: &NewWorkout) -> Result<WorkoutRecord, ApiError> {
        debug!(title = %workout.title, "POST workout");
        let response = self
            .client
            .post(self.workouts_url(None))
            .json(workout)
            .send()
            .map_err(ApiError::Transport)?;
        ensure_success(response)?.json().map_err(ApiError::Decode)
    }

    fn set_completed(&self, id: &WorkoutId, completed: bool) -> Result<WorkoutRecord, ApiError> {
        debug!(%id, completed, "PATCH workout");
        let response = self
            .client
            .patch(self.workouts_url(Some(id)))
            .json(&CompletionPatch { completed })
            .send()
            .map_err(ApiError::Transport)?;
        ensure_success(response)?.json().map_err(ApiError::Decode)
    }

    fn delete(&self, id: &WorkoutId) -> Result<(), ApiError> {
        debug!(%id, "DELETE workout");
        let response = self
            .client
            .delete(self.workouts_url(Some(id)))
            .send()
            .map_err(ApiError::Transport)?;
        ensure_success(response)?;
        Ok(())
    }
}
