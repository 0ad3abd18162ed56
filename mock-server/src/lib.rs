//! Axum servers used to exercise the todo client over real HTTP.
//!
//! `app()` is an in-memory Todo resource; `stub::Stub` answers with scripted
//! responses and records what it received.

pub mod stub;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    pub finished: bool,
}

pub type Db = Arc<RwLock<Vec<Task>>>;

pub fn app() -> Router {
    app_with_tasks(Vec::new())
}

pub fn app_with_tasks(tasks: Vec<Task>) -> Router {
    let db: Db = Arc::new(RwLock::new(tasks));
    Router::new()
        .route("/todos", get(list_tasks).post(create_task))
        .route("/todos/{id}", get(get_task).put(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

/// Serve `router` on a random local port from a background thread.
///
/// The listener is bound before this returns, so blocking clients can
/// connect immediately. The server lives until the process exits.
pub fn spawn(router: Router) -> std::io::Result<SocketAddr> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(error) => {
                tracing::error!(%error, "failed to start mock server runtime");
                return;
            }
        };
        let served = rt.block_on(async move {
            let listener = TcpListener::from_std(std_listener)?;
            run(listener, router).await
        });
        if let Err(error) = served {
            tracing::error!(%error, %addr, "mock server stopped");
        }
    });

    Ok(addr)
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    Json(db.read().await.clone())
}

async fn create_task(State(db): State<Db>, Json(mut task): Json<Task>) -> (StatusCode, Json<Task>) {
    if task.id.is_empty() {
        task.id = Uuid::new_v4().to_string();
    }
    let mut tasks = db.write().await;
    tasks.retain(|t| t.id != task.id);
    tasks.push(task.clone());
    tracing::debug!(id = %task.id, "task created");
    (StatusCode::CREATED, Json(task))
}

async fn get_task(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Task>, StatusCode> {
    let tasks = db.read().await;
    tasks
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Task>,
) -> Result<Json<Task>, StatusCode> {
    let mut tasks = db.write().await;
    let task = tasks.iter_mut().find(|t| t.id == id).ok_or(StatusCode::NOT_FOUND)?;
    *task = Task { id, ..input };
    Ok(Json(task.clone()))
}

/// Answers 200 with an empty body, as the public todo API does.
async fn delete_task(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut tasks = db.write().await;
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == before {
        StatusCode::NOT_FOUND
    } else {
        tracing::debug!(%id, "task deleted");
        StatusCode::OK
    }
}
