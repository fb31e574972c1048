use axum::{
    routing::{get, post},
    Router,
    extract::{rejection::JsonRejection, Form, Json, State},
    response::{Html, IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::api::models::{DownloadRequest, SummarizeForm, SummarizeRequestBody, SummarizeResponse};
use crate::api::page::{self, PageResult};
use crate::api::response;
use crate::error::AppError;
use crate::extract::Language;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(summarize_form_handler))
        .route("/api/summarize", post(summarize_api_handler))
        .route("/api/download", post(download_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn index_handler() -> Html<String> {
    Html(page::render("", Language::default(), PageResult::Empty))
}

async fn summarize_form_handler(
    State(state): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> Html<String> {
    // The select only offers known labels; anything else falls back to English.
    let language = Language::from_label(&form.language).unwrap_or_default();

    let start_time = std::time::Instant::now();
    let result = state.pipeline.run(&form.url, language).await;
    tracing::info!(elapsed = ?start_time.elapsed(), ok = result.is_ok(), "Form request processed");

    let body = match &result {
        Ok(outcome) => page::render(&form.url, language, PageResult::Summarized(outcome)),
        Err(err) => {
            log_failure(&form.url, err);
            page::render(&form.url, language, PageResult::Failed(err))
        }
    };

    Html(body)
}

async fn summarize_api_handler(
    State(state): State<AppState>,
    body: Result<Json<SummarizeRequestBody>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };

    // Without a key every attempt is refused, whatever else the body holds.
    if !state.pipeline.can_summarize() {
        log_failure(&req.url, &AppError::MissingApiKey);
        return AppError::MissingApiKey.into_response();
    }

    let language = match req.language.as_deref() {
        Some(label) => match Language::from_label(label) {
            Ok(language) => language,
            Err(err) => return err.into_response(),
        },
        None => Language::default(),
    };

    let start_time = std::time::Instant::now();
    let result = state.pipeline.run(&req.url, language).await;
    tracing::info!(elapsed = ?start_time.elapsed(), ok = result.is_ok(), "API request processed");

    match result {
        Ok(outcome) => response::success(SummarizeResponse::from(outcome)).into_response(),
        Err(err) => {
            log_failure(&req.url, &err);
            err.into_response()
        }
    }
}

async fn download_handler(body: Result<Json<DownloadRequest>, JsonRejection>) -> Response {
    match body {
        Ok(Json(req)) => response::summary_attachment(req.summary),
        Err(rejection) => rejection_response(rejection),
    }
}

/// Malformed bodies get the same envelope as every other API error.
fn rejection_response(rejection: JsonRejection) -> Response {
    tracing::info!(error = %rejection.body_text(), "Rejected JSON body");
    response::error::<()>(rejection.status(), rejection.body_text()).into_response()
}

fn log_failure(url: &str, err: &AppError) {
    match err {
        AppError::MissingApiKey
        | AppError::EmptyUrl
        | AppError::InvalidUrl(_)
        | AppError::UnsupportedLanguage(_) => {
            tracing::info!(url, error = %err, "Request rejected");
        }
        _ => tracing::warn!(url, error = %err, "Summarize run failed"),
    }
}
