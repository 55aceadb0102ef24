//! Web API Module
//!
//! Exposes RESTful endpoints for the lab frontend and the instructor panel.
//! All endpoints return JSON and require no authentication (classroom mode).

use crate::config::ServerConfig;
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use lab_core::rubric::coerce_grade_input;
use lab_core::{
    build_career_plan_report, lesson_by_code, lessons, Answers, ExerciseCatalog,
    InMemorySubmissionStore, NewSubmission, RawGrades, StoreError, Submission, SubmissionStore,
    CAPSTONE_EXERCISE_ID,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub exercises: ExerciseCatalog,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>, exercises: ExerciseCatalog) -> Self {
        Self { store, exercises }
    }

    /// State with an empty in-memory store and exercises loaded from `config`
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            Arc::new(InMemorySubmissionStore::new()),
            ExerciseCatalog::load_dir(&config.exercises_dir),
        )
    }
}

// ============================================================
// API REQUEST/RESPONSE TYPES
// ============================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub user_id: Option<String>,
    pub answers: Option<Answers>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GradedExportRequest {
    pub grades: Option<RawGrades>,
}

#[derive(Debug, Serialize)]
pub struct MarkdownExport {
    pub markdown: String,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

const CAPSTONE_NOT_FOUND: &str = "Plano de carreira (Capstone) não encontrado para este usuário";
const LESSON_NOT_FOUND: &str = "Lesson não encontrada";

fn store_failure(e: StoreError) -> HttpResponse {
    log::error!("[SUBMISSIONS] Store error: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::<()>::error(&format!("Storage error: {}", e)))
}

/// Converts grades typed by a person (e.g. "7,5") into numbers.
/// Values that still do not parse are passed through for the scorer to ignore.
pub fn coerce_grades(raw: RawGrades) -> RawGrades {
    raw.into_iter()
        .map(|(key, value)| {
            let coerced = match &value {
                serde_json::Value::String(s) => coerce_grade_input(s)
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number),
                _ => None,
            };
            (key, coerced.unwrap_or(value))
        })
        .collect()
}

// ============================================================
// API HANDLERS
// ============================================================

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Lesson Lab API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List all lessons
async fn list_lessons() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(lessons()))
}

/// Exercises of one lesson (empty when the lesson has none)
async fn lesson_exercises(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let code = path.into_inner();
    HttpResponse::Ok().json(ApiResponse::success(data.exercises.for_lesson(&code)))
}

/// Store a student submission. A missing or non-JSON body counts as `{}`.
async fn submit_exercise(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: Option<web::Json<SubmitRequest>>,
) -> impl Responder {
    let exercise_id = path.into_inner();
    let req = req.map(|r| r.into_inner()).unwrap_or_default();
    let submission = NewSubmission::new(&exercise_id, req.user_id.as_deref(), req.answers);

    match data.store.append(submission) {
        Ok(stored) => {
            log::info!(
                "[SUBMISSIONS] #{} received for {} from {}",
                stored.id,
                stored.exercise_id,
                stored.user_id
            );
            HttpResponse::Created().json(ApiResponse::success(stored))
        }
        Err(e) => store_failure(e),
    }
}

/// All submissions of one user
async fn user_submissions(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();
    match data.store.by_user(&user_id) {
        Ok(subs) => HttpResponse::Ok().json(ApiResponse::success(subs)),
        Err(e) => store_failure(e),
    }
}

/// All submissions for the exercises of one lesson
async fn lesson_submissions(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let code = path.into_inner();
    if lesson_by_code(&code).is_none() {
        return HttpResponse::NotFound().json(ApiResponse::<()>::error(LESSON_NOT_FOUND));
    }

    let ids = data.exercises.exercise_ids(&code);
    match data.store.by_exercises(&ids) {
        Ok(subs) => HttpResponse::Ok().json(ApiResponse::success(subs)),
        Err(e) => store_failure(e),
    }
}

fn latest_career_plan(state: &AppState, user_id: &str) -> Result<Submission, HttpResponse> {
    match state.store.latest_for(user_id, CAPSTONE_EXERCISE_ID) {
        Ok(Some(sub)) => Ok(sub),
        Ok(None) => {
            log::info!("[CAPSTONE] No career plan for {}", user_id);
            Err(HttpResponse::NotFound().json(ApiResponse::<()>::error(CAPSTONE_NOT_FOUND)))
        }
        Err(e) => Err(store_failure(e)),
    }
}

/// Ungraded Markdown template of the latest career plan
async fn export_career_plan(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();
    let submission = match latest_career_plan(&data, &user_id) {
        Ok(sub) => sub,
        Err(resp) => return resp,
    };

    let report = build_career_plan_report(&submission, None);
    HttpResponse::Ok().json(ApiResponse::success(MarkdownExport {
        markdown: report.markdown,
    }))
}

/// Graded Markdown of the latest career plan, with the suggested final score
async fn export_career_plan_graded(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: Option<web::Json<GradedExportRequest>>,
) -> impl Responder {
    let user_id = path.into_inner();
    let submission = match latest_career_plan(&data, &user_id) {
        Ok(sub) => sub,
        Err(resp) => return resp,
    };

    let grades = coerce_grades(
        req.and_then(|r| r.into_inner().grades)
            .unwrap_or_default(),
    );
    let report = build_career_plan_report(&submission, Some(&grades));
    log::info!(
        "[CAPSTONE] Graded plan #{} for {}: final score {:?}",
        submission.id,
        user_id,
        report.final_score
    );

    HttpResponse::Ok().json(ApiResponse::success(report))
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Route table, shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/api/lessons", web::get().to(list_lessons))
        .route("/api/lessons/{code}/exercises", web::get().to(lesson_exercises))
        .route("/api/lessons/{code}/submissions", web::get().to(lesson_submissions))
        .route("/api/exercises/{id}/submissions", web::post().to(submit_exercise))
        .route("/api/users/{user_id}/submissions", web::get().to(user_submissions))
        .route("/api/capstone/{user_id}/export-md", web::get().to(export_career_plan))
        .route(
            "/api/capstone/{user_id}/export-md-graded",
            web::post().to(export_career_plan_graded),
        );
}

/// Configure and run the API server
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::from_config(&config));

    log::info!("[SERVER] Lesson Lab API starting at http://{}:{}", config.host, config.port);
    log::info!("[SERVER] API Endpoints:");
    log::info!("[SERVER]    GET  /api/lessons                          - List lessons");
    log::info!("[SERVER]    GET  /api/lessons/:code/exercises          - Lesson exercises");
    log::info!("[SERVER]    GET  /api/lessons/:code/submissions        - Lesson submissions");
    log::info!("[SERVER]    POST /api/exercises/:id/submissions        - Submit answers");
    log::info!("[SERVER]    GET  /api/users/:id/submissions            - User submissions");
    log::info!("[SERVER]    GET  /api/capstone/:id/export-md           - Career plan template");
    log::info!("[SERVER]    POST /api/capstone/:id/export-md-graded    - Graded career plan");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_grades() {
        let raw: RawGrades = serde_json::from_value(json!({
            "contexto_atual": "7,5",
            "visao_futuro": 9,
            "forcas": "abc",
            "gaps": "",
        }))
        .unwrap();
        let coerced = coerce_grades(raw);
        assert_eq!(coerced["contexto_atual"], json!(7.5));
        assert_eq!(coerced["visao_futuro"], json!(9));
        assert_eq!(coerced["forcas"], json!("abc"));
        assert_eq!(coerced["gaps"], json!(""));
    }
}
