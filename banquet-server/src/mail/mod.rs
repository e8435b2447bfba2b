//! Contact-lead mail notifications
//!
//! Best effort by design: the lead is already persisted by the time a
//! notification is attempted, and a delivery failure is logged and
//! swallowed; it must never fail the submission.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::core::Config;
use crate::db::models::ContactLead;
use crate::documents::html;

/// Operator notification sender
pub struct ContactNotifier {
    settings: Option<MailSettings>,
}

struct MailSettings {
    host: String,
    username: String,
    password: String,
    from: Mailbox,
    to: Mailbox,
}

impl ContactNotifier {
    /// Build from config; notification stays disabled unless the SMTP host,
    /// credentials and both addresses are present and parse.
    pub fn from_config(config: &Config) -> Self {
        let mail = &config.mail;
        let settings = match (
            &mail.smtp_host,
            &mail.smtp_username,
            &mail.smtp_password,
            &mail.from_address,
            &mail.notify_to,
        ) {
            (Some(host), Some(username), Some(password), Some(from), Some(to)) => {
                match (from.parse::<Mailbox>(), to.parse::<Mailbox>()) {
                    (Ok(from), Ok(to)) => Some(MailSettings {
                        host: host.clone(),
                        username: username.clone(),
                        password: password.clone(),
                        from,
                        to,
                    }),
                    _ => {
                        tracing::warn!(
                            "Invalid MAIL_FROM / MAIL_NOTIFY_TO address, mail notifications disabled"
                        );
                        None
                    }
                }
            }
            _ => None,
        };

        if settings.is_none() {
            tracing::info!("Mail notifications disabled (SMTP settings incomplete)");
        }

        Self { settings }
    }

    /// Notify the operator about a new lead. Never fails the caller.
    pub async fn notify_new_lead(&self, lead: &ContactLead) {
        let Some(settings) = &self.settings else {
            tracing::debug!("Skipping lead notification, mail disabled");
            return;
        };

        match send_notification(settings, lead).await {
            Ok(()) => tracing::info!(lead = %lead.name, "Lead notification sent"),
            Err(e) => tracing::warn!(error = %e, "Failed to send lead notification"),
        }
    }
}

async fn send_notification(settings: &MailSettings, lead: &ContactLead) -> anyhow::Result<()> {
    let email = Message::builder()
        .from(settings.from.clone())
        .to(settings.to.clone())
        .subject(format!(
            "New Catering Inquiry: {} - {}",
            lead.event_type, lead.name
        ))
        .header(ContentType::TEXT_HTML)
        .body(notification_body(lead))?;

    let mailer: AsyncSmtpTransport<Tokio1Executor> =
        AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

    mailer.send(email).await?;
    Ok(())
}

fn notification_body(lead: &ContactLead) -> String {
    let row = |label: &str, value: &str| {
        format!(
            "<tr><td style=\"padding:8px;color:#6b7280;font-weight:bold;width:140px;\">{label}</td>\
             <td style=\"padding:8px;color:#111827;\">{}</td></tr>",
            html::escape(value)
        )
    };

    let mut rows = String::new();
    rows.push_str(&row("Name:", &lead.name));
    rows.push_str(&row("Email:", &lead.email));
    rows.push_str(&row("Phone:", &lead.phone));
    rows.push_str(&row("Event Type:", &lead.event_type));
    if !lead.event_date.is_empty() {
        rows.push_str(&row("Event Date:", &lead.event_date));
    }
    if !lead.guest_count.is_empty() {
        rows.push_str(&row("Guest Count:", &lead.guest_count));
    }

    let message = html::escape(&lead.message).replace('\n', "<br>");

    format!(
        "<div style=\"font-family:sans-serif;max-width:600px;margin:0 auto;\">\
         <h1 style=\"background:#c62828;color:#fff;padding:16px;text-align:center;\">New Catering Inquiry</h1>\
         <p>A new inquiry arrived from the website contact form:</p>\
         <table style=\"width:100%;border-collapse:collapse;\">{rows}</table>\
         <p style=\"color:#6b7280;font-weight:bold;\">Message:</p>\
         <div style=\"background:#f9fafb;padding:12px;border:1px solid #e5e7eb;\">{message}</div>\
         </div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ContactStatus;

    #[test]
    fn body_escapes_user_content() {
        let lead = ContactLead {
            id: None,
            name: "<b>Asha</b>".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 90000 00000".to_string(),
            event_type: "Wedding".to_string(),
            event_date: String::new(),
            guest_count: String::new(),
            message: "line one\nline two".to_string(),
            status: ContactStatus::New,
            response: String::new(),
            created_at: 0,
            updated_at: 0,
        };

        let body = notification_body(&lead);
        assert!(body.contains("&lt;b&gt;Asha&lt;/b&gt;"));
        assert!(body.contains("line one<br>line two"));
    }
}
