use actix_web::{web, HttpResponse, Responder};
use crate::core::{CheckReport, Checker};
use crate::models::{Checkin, CheckinPush, ErrorResponse, HealthResponse, User};
use std::sync::Arc;
use tracing::Instrument;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<Checker>,
    /// Foursquare push secret; pushes carrying another secret are rejected
    pub push_secret: Option<String>,
}

/// Configure webhook and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/hooks/foursquare", web::post().to(foursquare_webhook));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Foursquare push endpoint
///
/// POST /hooks/foursquare
///
/// Form fields `checkin` and `user` hold JSON documents. The check-in is
/// processed in the background; the response only acknowledges receipt.
async fn foursquare_webhook(
    state: web::Data<AppState>,
    form: web::Form<CheckinPush>,
) -> impl Responder {
    if let Some(expected) = &state.push_secret {
        if form.secret.as_deref() != Some(expected.as_str()) {
            tracing::warn!("Rejected push with a bad secret");
            return HttpResponse::Forbidden().json(ErrorResponse {
                error: "invalid_secret".to_string(),
                message: "Push secret does not match".to_string(),
                status_code: 403,
            });
        }
    }

    let checkin: Checkin = match serde_json::from_str(&form.checkin) {
        Ok(checkin) => checkin,
        Err(e) => return bad_request("invalid_checkin", format!("Invalid checkin JSON: {}", e)),
    };
    let user: User = match serde_json::from_str(&form.user) {
        Ok(user) => user,
        Err(e) => return bad_request("invalid_user", format!("Invalid user JSON: {}", e)),
    };

    dispatch(state.checker.clone(), checkin, user);

    HttpResponse::Ok().body("OK")
}

/// Run the pipeline for one check-in as a background job.
///
/// Failures are only logged; the pusher has already been answered.
pub fn dispatch(checker: Arc<Checker>, checkin: Checkin, user: User) -> tokio::task::JoinHandle<()> {
    let job_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("checkin_job", %job_id, checkin_id = %checkin.id);

    tracing::info!(%job_id, "Enqueued a webhook from a user");

    tokio::spawn(
        async move {
            match checker.process(&checkin, &user).await {
                Ok(CheckReport::Skipped(reason)) => tracing::debug!("Job finished, skipped: {}", reason),
                Ok(CheckReport::Classified { outcome, notified }) => {
                    tracing::debug!("Job finished: {} (notified: {})", outcome.label(), notified)
                }
                Err(e) => tracing::error!("Job failed: {}", e),
            }
        }
        .instrument(span),
    )
}
