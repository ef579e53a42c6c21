use crate::board::WorkoutBoard;
use crate::models::WorkoutRecord;

pub const TITLE: &str = "Workout Plan";
pub const TAGLINE: &str =
    "Plan your sessions like a simple to-do list. Add exercises, set reps, and check them off.";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No workouts yet. Add your first one above.";

const SEPARATOR: &str = " · ";

#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Empty,
    Items(&'a [WorkoutRecord]),
}

/// Loading wins over the empty message.
pub fn list_view(board: &WorkoutBoard) -> ListView<'_> {
    if board.loading {
        ListView::Loading
    } else if board.workouts.is_empty() {
        ListView::Empty
    } else {
        ListView::Items(&board.workouts)
    }
}

/// "3 sets · 10 reps · Mon", built from whichever parts are present.
pub fn summary_line(workout: &WorkoutRecord) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(sets) = workout.sets.filter(|n| *n > 0) {
        parts.push(format!("{sets} sets"));
    }
    if let Some(reps) = workout.reps.filter(|n| *n > 0) {
        parts.push(format!("{reps} reps"));
    }
    if let Some(day) = workout.day {
        parts.push(day.to_string());
    }
    parts.join(SEPARATOR)
}

pub fn notes_line(workout: &WorkoutRecord) -> Option<&str> {
    workout.notes.as_deref().filter(|notes| !notes.is_empty())
}
