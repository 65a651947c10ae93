use std::sync::Arc;

use axum::{response::IntoResponse, Extension, Json};
use validator::Validate;

use crate::{
    db::leaddb::PortfolioRequestExt,
    dtos::leaddtos::{PortfolioRequestDto, SubmitPortfolioResponse},
    error::HttpError,
    mail::mails::{send_portfolio_notification, send_portfolio_thank_you},
    AppState,
};

/// Lead capture. Validation failures are the only hard errors; once the
/// submission is well-formed, persistence and both emails are each
/// best-effort and independent. The submitter always gets success, with
/// partial failures reported in `warnings`.
pub async fn submit_portfolio_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<PortfolioRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let mut warnings: Vec<String> = Vec::new();

    let lead_id = match app_state.db_client.create_portfolio_request(&body).await {
        Ok(lead) => Some(lead.id),
        Err(e) => {
            tracing::error!("failed to store portfolio request from {}: {}", body.email, e);
            warnings.push("Your request could not be stored; our team has been notified.".to_string());
            None
        }
    };

    if let Err(e) = send_portfolio_thank_you(
        &app_state.env,
        &body.email,
        &body.name,
        body.locale.as_deref(),
    )
    .await
    {
        tracing::warn!("thank-you email to {} failed: {}", body.email, e);
        warnings.push("The confirmation email could not be sent.".to_string());
    }

    if let Err(e) = send_portfolio_notification(&app_state.env, &body).await {
        tracing::warn!("internal notification email failed: {}", e);
        warnings.push("The internal notification could not be sent.".to_string());
    }

    Ok(Json(SubmitPortfolioResponse {
        success: true,
        id: lead_id,
        warnings,
    }))
}
