//! REST endpoints for the board.
//!
//! Every handler runs exactly one storage operation and answers `200 OK`.
//! Failures of any kind, malformed bodies included, surface as a bare 500.

use actix_web::error::InternalError;
use actix_web::{delete, get, post, put, web, HttpResponse};
use log::{debug, warn};
use serde_json::json;

use crate::app_state::AppState;
use crate::board;
use crate::error::KanbanError;
use crate::logging::{clear_task_context, set_task_context};
use crate::task::{TaskFields, TaskId};

fn success() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true }))
}

/// JSON body extraction that reports every parse failure as a server error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        warn!("Unreadable task body on {} {}: {}", req.method(), req.path(), err);
        InternalError::from_response(
            err,
            HttpResponse::InternalServerError().body("Internal Server Error"),
        )
        .into()
    })
}

#[get("/api/tasks")]
pub async fn list_tasks(app_state: web::Data<AppState>) -> Result<HttpResponse, KanbanError> {
    clear_task_context();
    let tasks = app_state.task_service.list_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[post("/api/tasks")]
pub async fn create_task(
    body: web::Json<TaskFields>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, KanbanError> {
    clear_task_context();
    debug!("Creating task titled {:?}", body.title);
    app_state.task_service.create_task(body.into_inner()).await?;
    Ok(success())
}

#[put("/api/tasks/{id:\\d+}")]
pub async fn update_task(
    path: web::Path<TaskId>,
    body: web::Json<TaskFields>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, KanbanError> {
    let id = path.into_inner();
    set_task_context(id);
    let result = app_state.task_service.update_task(id, body.into_inner()).await;
    clear_task_context();
    result.map(|()| success())
}

#[delete("/api/tasks/{id:\\d+}")]
pub async fn delete_task(
    path: web::Path<TaskId>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, KanbanError> {
    let id = path.into_inner();
    set_task_context(id);
    let result = app_state.task_service.delete_task(id).await;
    clear_task_context();
    result.map(|()| success())
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Register every board route and the JSON extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_tasks)
        .service(create_task)
        .service(update_task)
        .service(delete_task)
        .service(health)
        .service(board::index)
        .service(board::script)
        .service(board::stylesheet);
}
