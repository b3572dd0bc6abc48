use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use report_core::sample::{sample_invoice, sample_users};
use report_core::{render_invoice, render_user_report, RenderOptions};
use serde_json::json;

use crate::error::Result;
use crate::state::AppState;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// The sample user roster as an inline PDF.
pub async fn users_report(State(state): State<AppState>) -> Result<Response> {
    let started = Instant::now();
    let options = state.render_options(RenderOptions::user_report());
    let count = state.settings.reports.user_count;
    let filename = options.filename.clone();

    // Rendering is CPU-bound; keep it off the async workers.
    let report = tokio::task::spawn_blocking(move || {
        let users = sample_users(count);
        render_user_report(&options, &users)
    })
    .await??;

    tracing::info!(
        "users report: {} rows, {} pages, {} bytes in {} ms",
        count,
        report.pages,
        report.bytes.len(),
        started.elapsed().as_millis()
    );
    Ok(pdf_response(&filename, report.bytes))
}

/// The sample invoice as an inline PDF, with the logo when it can be fetched.
pub async fn invoice(State(state): State<AppState>) -> Result<Response> {
    let started = Instant::now();
    let options = state.render_options(RenderOptions::invoice());
    let items = state.settings.reports.invoice_items;
    let filename = options.filename.clone();

    let logo = match &state.logo {
        Some(fetcher) => fetcher.fetch_or_skip().await,
        None => None,
    };

    let report = tokio::task::spawn_blocking(move || {
        let invoice = sample_invoice(items);
        render_invoice(&options, &invoice, logo.as_deref())
    })
    .await??;

    tracing::info!(
        "invoice: {} items, {} pages, {} bytes in {} ms",
        items,
        report.pages,
        report.bytes.len(),
        started.elapsed().as_millis()
    );
    Ok(pdf_response(&filename, report.bytes))
}

fn pdf_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, format!("inline; filename=\"{}\"", filename)),
        ],
        bytes,
    )
        .into_response()
}
