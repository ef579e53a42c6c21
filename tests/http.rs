use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use workout_board::{
    ApiError, Day, Dispatcher, FormDraft, HttpWorkoutApi, WorkoutApi, WorkoutBoard, WorkoutId,
};

#[derive(Default)]
struct Backend {
    workouts: Vec<Value>,
    next_id: u64,
    queries: Vec<Option<String>>,
    bodies: Vec<Value>,
    status: Option<StatusCode>,
    garbage: bool,
}

type Shared = Arc<Mutex<Backend>>;

struct StubServer {
    base_url: String,
    backend: Shared,
}

impl StubServer {
    fn api(&self) -> HttpWorkoutApi {
        HttpWorkoutApi::new(&self.base_url).expect("valid stub url")
    }

    fn backend(&self) -> std::sync::MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }
}

async fn list(State(backend): State<Shared>, RawQuery(query): RawQuery) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.queries.push(query.clone());
    if let Some(status) = backend.status {
        return status.into_response();
    }
    if backend.garbage {
        return (StatusCode::OK, "definitely not json").into_response();
    }
    let day = query.as_deref().and_then(|q| q.strip_prefix("day="));
    let items: Vec<Value> = backend
        .workouts
        .iter()
        .filter(|w| day.map_or(true, |d| w["day"] == d))
        .cloned()
        .collect();
    Json(Value::Array(items)).into_response()
}

async fn create(State(backend): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.bodies.push(body.clone());
    if let Some(status) = backend.status {
        return status.into_response();
    }
    backend.next_id += 1;
    let mut created = body;
    created["id"] = json!(backend.next_id.to_string());
    backend.workouts.insert(0, created.clone());
    Json(created).into_response()
}

async fn update(
    State(backend): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.bodies.push(body.clone());
    if let Some(status) = backend.status {
        return status.into_response();
    }
    match backend.workouts.iter_mut().find(|w| w["id"] == id.as_str()) {
        Some(workout) => {
            workout["completed"] = body["completed"].clone();
            Json(workout.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn remove(State(backend): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut backend = backend.lock().unwrap();
    if let Some(status) = backend.status {
        return status;
    }
    let before = backend.workouts.len();
    backend.workouts.retain(|w| w["id"] != id.as_str());
    if backend.workouts.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

fn spawn_stub(seed: Vec<Value>) -> StubServer {
    let backend = Arc::new(Mutex::new(Backend {
        workouts: seed,
        next_id: 100,
        ..Backend::default()
    }));
    let app = Router::new()
        .route("/api/workouts", get(list).post(create))
        .route("/api/workouts/:id", patch(update).delete(remove))
        .with_state(Arc::clone(&backend));

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let port = listener.local_addr().unwrap().port();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("stub runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("stub server");
        });
    });

    StubServer {
        base_url: format!("http://127.0.0.1:{port}"),
        backend,
    }
}

fn week_plan() -> Vec<Value> {
    vec![
        json!({
            "id": "1", "title": "Squats", "sets": 3, "reps": 10, "day": "Mon",
            "completed": false
        }),
        json!({
            "id": "2", "title": "Bench", "sets": 5, "reps": 5, "day": "Wed",
            "completed": false
        }),
        json!({
            "id": "3", "title": "Deadlift", "sets": 1, "reps": 5, "day": "Mon",
            "completed": true, "notes": "belt"
        }),
    ]
}

fn titles(board: &WorkoutBoard) -> Vec<&str> {
    board.workouts.iter().map(|w| w.title.as_str()).collect()
}

#[test]
fn http_list_keeps_service_order_and_sends_day_query() {
    let server = spawn_stub(week_plan());
    let api = server.api();

    let all = api.list(None).unwrap();
    assert_eq!(
        all.iter().map(|w| w.title.as_str()).collect::<Vec<_>>(),
        vec!["Squats", "Bench", "Deadlift"]
    );

    let monday = api.list(Some(Day::Mon)).unwrap();
    assert_eq!(
        monday.iter().map(|w| w.id.as_str()).collect::<Vec<_>>(),
        vec!["1", "3"]
    );
    assert_eq!(monday[1].notes.as_deref(), Some("belt"));

    assert_eq!(server.backend().queries, vec![None, Some("day=Mon".to_string())]);
}

#[test]
fn http_board_load_follows_filter() {
    let server = spawn_stub(week_plan());
    let api = server.api();
    let mut board = WorkoutBoard::new();

    board.load(&api);
    assert_eq!(titles(&board), vec!["Squats", "Bench", "Deadlift"]);

    let request = board.set_filter(Some(Day::Wed)).unwrap();
    board.apply(request.execute(&api));
    assert_eq!(titles(&board), vec!["Bench"]);
    assert!(!board.loading);
    assert!(!board.has_error());
}

#[test]
fn http_create_sends_only_filled_fields() {
    let server = spawn_stub(Vec::new());
    let api = server.api();
    let mut board = WorkoutBoard::new();
    board.form = FormDraft {
        title: "  Squats ".to_string(),
        sets: "3".to_string(),
        reps: "10".to_string(),
        day: Some(Day::Mon),
        notes: String::new(),
    };

    board.create(&api).unwrap();

    assert_eq!(
        server.backend().bodies,
        vec![json!({ "title": "Squats", "sets": 3, "reps": 10, "day": "Mon", "completed": false })]
    );
    assert_eq!(board.workouts.len(), 1);
    assert_eq!(board.workouts[0].id, WorkoutId::from("101"));
    assert_eq!(board.workouts[0].sets, Some(3));
    assert!(board.form.is_empty());
}

#[test]
fn http_create_prepends_to_loaded_list() {
    let server = spawn_stub(week_plan());
    let api = server.api();
    let mut board = WorkoutBoard::new();
    board.load(&api);
    board.form.title = "Pull-ups".to_string();

    board.create(&api).unwrap();

    assert_eq!(titles(&board), vec!["Pull-ups", "Squats", "Bench", "Deadlift"]);
    assert_eq!(server.backend().bodies[0], json!({ "title": "Pull-ups", "completed": false }));
}

#[test]
fn http_toggle_patches_and_uses_the_returned_record() {
    let server = spawn_stub(week_plan());
    let api = server.api();
    let mut board = WorkoutBoard::new();
    board.load(&api);

    board.toggle_complete(&api, &WorkoutId::from("2"), false);

    assert_eq!(server.backend().bodies, vec![json!({ "completed": true })]);
    assert!(board.workouts[1].completed);
    assert!(!board.workouts[0].completed);
    assert!(board.workouts[2].completed);
    assert_eq!(titles(&board), vec!["Squats", "Bench", "Deadlift"]);
}

#[test]
fn http_remove_deletes_by_id() {
    let server = spawn_stub(week_plan());
    let api = server.api();
    let mut board = WorkoutBoard::new();
    board.load(&api);

    board.remove(&api, &WorkoutId::from("2"));

    assert_eq!(titles(&board), vec!["Squats", "Deadlift"]);
    assert_eq!(server.backend().workouts.len(), 2);
    assert!(!board.has_error());
}

#[test]
fn http_failure_status_maps_to_operation_messages() {
    let server = spawn_stub(week_plan());
    let api = server.api();
    let mut board = WorkoutBoard::new();
    board.load(&api);
    let before = board.workouts.clone();

    server.backend().status = Some(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(
        api.list(None),
        Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    ));

    board.load(&api);
    assert_eq!(board.error, "Could not load workouts");
    assert!(!board.loading);

    board.toggle_complete(&api, &WorkoutId::from("1"), false);
    assert_eq!(board.error, "Update failed");

    board.remove(&api, &WorkoutId::from("1"));
    assert_eq!(board.error, "Delete failed");

    board.form.title = "Lunges".to_string();
    board.create(&api).unwrap();
    assert_eq!(board.error, "Could not add workout");
    assert_eq!(board.form.title, "Lunges");

    assert_eq!(board.workouts, before);
}

#[test]
fn http_missing_record_is_a_delete_failure() {
    let server = spawn_stub(week_plan());
    let api = server.api();
    let mut board = WorkoutBoard::new();
    board.load(&api);

    board.remove(&api, &WorkoutId::from("999"));

    assert_eq!(board.error, "Delete failed");
    assert_eq!(board.workouts.len(), 3);
}

#[test]
fn http_malformed_body_is_a_decode_error() {
    let server = spawn_stub(week_plan());
    server.backend().garbage = true;
    let api = server.api();

    assert!(matches!(api.list(None), Err(ApiError::Decode(_))));

    let mut board = WorkoutBoard::new();
    board.load(&api);
    assert_eq!(board.error, "Could not load workouts");
    assert!(board.workouts.is_empty());
}

#[test]
fn http_unreachable_service_is_a_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
        listener.local_addr().unwrap().port()
    };
    let api = HttpWorkoutApi::new(&format!("http://127.0.0.1:{port}")).unwrap();

    assert!(matches!(api.list(None), Err(ApiError::Transport(_))));

    let mut board = WorkoutBoard::new();
    board.load(&api);
    assert_eq!(board.error, "Could not load workouts");
    assert!(board.workouts.is_empty());
    assert!(!board.loading);
}

#[test]
fn http_dispatcher_round_trip() {
    let server = spawn_stub(week_plan());
    let dispatcher = Dispatcher::new(Arc::new(server.api()), None);
    let mut board = WorkoutBoard::new();

    dispatcher.submit(board.begin_load());
    assert!(board.loading);
    board.apply(dispatcher.wait(Duration::from_secs(5)).expect("load settles"));
    assert!(!board.loading);
    assert_eq!(board.workouts.len(), 3);

    dispatcher.submit(board.begin_toggle(&WorkoutId::from("1"), false));
    dispatcher.submit(board.begin_remove(&WorkoutId::from("2")));
    for _ in 0..2 {
        board.apply(dispatcher.wait(Duration::from_secs(5)).expect("request settles"));
    }

    assert_eq!(titles(&board), vec!["Squats", "Deadlift"]);
    assert!(board.workouts[0].completed);
    assert!(!board.has_error());
}
