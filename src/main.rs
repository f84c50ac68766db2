use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use checkin_checker::config::Settings;
use checkin_checker::core::Checker;
use checkin_checker::routes::{self, webhook::AppState};
use checkin_checker::services::{MailgunClient, OverpassClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for form payload errors
#[derive(Debug, serde::Serialize)]
pub struct FormError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for FormError {}

impl error::ResponseError for FormError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle form payload errors
pub fn handle_form_payload_error(err: error::UrlencodedError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);
    FormError {
        error: "invalid_form".to_string(),
        message: format!("Invalid form: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "text" => subscriber.init(),
        _ => subscriber.json().init(),
    }

    info!("Starting Checkin Checker...");

    let overpass = OverpassClient::new(settings.overpass.url.clone(), settings.overpass.timeout_secs)
        .map_err(|e| {
            error!("Failed to create Overpass client: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;

    info!("Overpass client initialized ({})", overpass.url());

    let mailgun = MailgunClient::new(
        settings.mailgun.base_url.clone(),
        settings.mailgun.domain.clone(),
        settings.mailgun.api_key.clone(),
        settings.mailgun.from.clone(),
    )
    .map_err(|e| {
        error!("Failed to create Mailgun client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Mailgun client initialized for {}", settings.mailgun.domain);

    let checker_settings = settings.checker_settings();
    info!(
        "Checker initialized (radius: {}m, timeout: {}s, tags: {:?})",
        checker_settings.radius_meters, checker_settings.timeout_secs, checker_settings.name_tags
    );

    let app_state = AppState {
        checker: Arc::new(Checker::new(Arc::new(overpass), Arc::new(mailgun), checker_settings)),
        push_secret: settings.server.push_secret.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::FormConfig::default().error_handler(handle_form_payload_error))
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
