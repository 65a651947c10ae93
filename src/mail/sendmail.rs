use std::fs;

use serde_json::json;

use crate::config::Config;

/// Render a template and hand it to the email API. Transient failures are
/// the caller's problem: there is no retry here, a lead submission must
/// not stall on a slow email provider.
pub async fn send_email(
    config: &Config,
    to_email: &str,
    subject: &str,
    template_path: &str,
    placeholders: &[(String, String)],
) -> Result<(), Box<dyn std::error::Error>> {
    // Validate inputs
    if to_email.is_empty() {
        return Err("Email recipient cannot be empty".into());
    }
    if !to_email.contains('@') {
        return Err(format!("Invalid email address: {}", to_email).into());
    }

    let mut html_template = match fs::read_to_string(template_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("Failed to read email template {}: {}", template_path, e);
            return Err(format!("Template not found: {}", template_path).into());
        }
    };

    for (key, value) in placeholders {
        html_template = html_template.replace(key, value);
    }

    let email_id = send_via_resend(config, to_email, subject, &html_template).await?;
    tracing::info!("✓ Email sent to {} (id: {})", to_email, email_id);

    Ok(())
}

async fn send_via_resend(
    config: &Config,
    to_email: &str,
    subject: &str,
    html_body: &str,
) -> Result<String, String> {
    let client = reqwest::Client::new();
    let request_body = json!({
        "from": config.from_email,
        "to": to_email,
        "subject": subject,
        "html": html_body,
    });

    let response = client
        .post("https://api.resend.com/emails")
        .header("Authorization", format!("Bearer {}", config.resend_api_key))
        .header("Content-Type", "application/json")
        .json(&request_body)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .unwrap_or_else(|_| "No response body".to_string());

    if status.is_success() {
        // Extract email ID from response
        if let Ok(body) = serde_json::from_str::<serde_json::Value>(&response_text) {
            if let Some(id) = body.get("id").and_then(|v| v.as_str()) {
                return Ok(id.to_string());
            }
        }
        Ok("success".to_string())
    } else {
        Err(format!(
            "Email API error ({}): {}",
            status.as_u16(),
            response_text
        ))
    }
}
