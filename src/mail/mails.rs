use super::sendmail::send_email;
use crate::{config::Config, dtos::leaddtos::PortfolioRequestDto};

/// Thank-you confirmation to the person who submitted the portfolio form.
pub async fn send_portfolio_thank_you(
    config: &Config,
    to_email: &str,
    name: &str,
    locale: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = thank_you_subject(locale);
    let template_path = "src/mail/templates/PortfolioThankYou-email.html";

    // The email provider's test domain only delivers to the account
    // owner, so until a sending domain is verified the confirmation goes
    // to the admin inbox for manual forwarding.
    let deliver_to = if is_test_domain_sender(&config.from_email) {
        tracing::warn!(
            "from address is on the test domain; thank-you for {} rerouted to {}",
            to_email,
            config.admin_email
        );
        config.admin_email.as_str()
    } else {
        to_email
    };

    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{recipient_email}}".to_string(), to_email.to_string()),
    ];

    send_email(config, deliver_to, subject, template_path, &placeholders).await
}

/// Internal notification so the sales team can follow up on a new lead.
pub async fn send_portfolio_notification(
    config: &Config,
    lead: &PortfolioRequestDto,
) -> Result<(), Box<dyn std::error::Error>> {
    let subject = format!("New portfolio request from {}", lead.name);
    let template_path = "src/mail/templates/PortfolioNotification-email.html";

    let optional = |value: &Option<String>| -> String {
        value.clone().unwrap_or_else(|| "Not provided".to_string())
    };

    let placeholders = vec![
        ("{{name}}".to_string(), lead.name.clone()),
        ("{{email}}".to_string(), lead.email.clone()),
        ("{{phone}}".to_string(), optional(&lead.phone)),
        ("{{buyer_or_seller}}".to_string(), lead.buyer_or_seller.clone()),
        ("{{budget}}".to_string(), optional(&lead.budget)),
        ("{{preferred_areas}}".to_string(), optional(&lead.preferred_areas)),
        ("{{type_of_home}}".to_string(), optional(&lead.type_of_home)),
        ("{{timeline}}".to_string(), optional(&lead.timeline)),
        ("{{locale}}".to_string(), optional(&lead.locale)),
    ];

    send_email(
        config,
        &config.admin_email,
        &subject,
        template_path,
        &placeholders,
    )
    .await
}

fn thank_you_subject(locale: Option<&str>) -> &'static str {
    match locale {
        Some("de") => "Vielen Dank für Ihre Anfrage",
        Some("es") => "Gracias por su solicitud",
        _ => "Thank you for your enquiry",
    }
}

fn is_test_domain_sender(from_email: &str) -> bool {
    from_email.contains("@resend.dev")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thank_you_subject_locales() {
        assert_eq!(thank_you_subject(Some("de")), "Vielen Dank für Ihre Anfrage");
        assert_eq!(thank_you_subject(Some("es")), "Gracias por su solicitud");
        assert_eq!(thank_you_subject(Some("en")), "Thank you for your enquiry");
        assert_eq!(thank_you_subject(Some("fr")), "Thank you for your enquiry");
        assert_eq!(thank_you_subject(None), "Thank you for your enquiry");
    }

    #[test]
    fn test_test_domain_detection() {
        assert!(is_test_domain_sender("Casavela <onboarding@resend.dev>"));
        assert!(!is_test_domain_sender("Casavela <hello@casavela.com>"));
    }
}
