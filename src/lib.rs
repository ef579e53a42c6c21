pub mod api;
pub mod app;
pub mod board;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod view;

pub use api::{HttpWorkoutApi, WorkoutApi};
pub use board::{Outcome, Request, WorkoutBoard};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::{ApiError, DraftError, Operation};
pub use models::{Day, FormDraft, WorkoutId, WorkoutRecord};
