//! SMTP report mailer
//!
//! Sends plain-text reports through the fixed STARTTLS relay, authenticating
//! with the settings username plus the keyring password. There is no retry:
//! a transport failure propagates to the caller, and a failed login check is
//! fatal for the invocation.

use craftstats_core::constants::{SMTP_PORT, SMTP_RELAY};
use craftstats_core::{EmailSettings, Error, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// SMTP client bound to a configured recipient list
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipients: Vec<Mailbox>,
}

impl Mailer {
    /// Build a mailer from settings plus the keyring password
    ///
    /// The transport connects lazily; nothing talks to the relay until
    /// [`Mailer::test_login`] or [`Mailer::send`].
    pub fn new(settings: &EmailSettings, password: &str) -> Result<Self> {
        let from: Mailbox = settings
            .username
            .parse()
            .map_err(|e| Error::Address(format!("{}: {}", settings.username, e)))?;
        let recipients = parse_recipients(&settings.send_alert_to)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_RELAY)
            .map_err(|e| Error::connection(e.to_string()))?
            .port(SMTP_PORT)
            .credentials(Credentials::new(
                settings.username.clone(),
                password.to_string(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            recipients,
        })
    }

    /// Open a session, authenticate, close; run at startup before report mode
    pub async fn test_login(&self) -> Result<()> {
        debug!("Testing SMTP login");
        self.transport
            .test_connection()
            .await
            .map_err(|e| Error::SmtpAuth(e.to_string()))?;
        debug!("SMTP login ok");
        Ok(())
    }

    /// Send one plain-text message to the full configured recipient list
    pub async fn send(&self, subject: &str, body: &str) -> Result<()> {
        let message = build_message(&self.from, &self.recipients, subject, body)?;

        info!("Sending email to {} recipient(s)", self.recipients.len());
        self.transport
            .send(message)
            .await
            .map_err(|e| Error::SmtpSend(e.to_string()))?;
        info!("Message sent");
        Ok(())
    }
}

fn parse_recipients(addresses: &[String]) -> Result<Vec<Mailbox>> {
    if addresses.is_empty() {
        return Err(Error::config("no report recipients configured"));
    }
    addresses
        .iter()
        .map(|addr| {
            addr.parse()
                .map_err(|e| Error::Address(format!("{}: {}", addr, e)))
        })
        .collect()
}

fn build_message(
    from: &Mailbox,
    recipients: &[Mailbox],
    subject: &str,
    body: &str,
) -> Result<Message> {
    let mut builder = Message::builder().from(from.clone()).subject(subject);
    for recipient in recipients {
        builder = builder.to(recipient.clone());
    }
    builder
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())
        .map_err(|e| Error::SmtpSend(format!("failed to build message: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipients() {
        let parsed = parse_recipients(&[
            "ops@example.com".to_string(),
            "Admin <admin@example.com>".to_string(),
        ])
        .unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_parse_recipients_rejects_invalid_address() {
        let result = parse_recipients(&["not-an-email".to_string()]);
        assert!(matches!(result, Err(Error::Address(_))));
    }

    #[test]
    fn test_parse_recipients_rejects_empty_list() {
        let result = parse_recipients(&[]);
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_build_message_headers() {
        let from: Mailbox = "reports@example.com".parse().unwrap();
        let recipients = parse_recipients(&[
            "ops@example.com".to_string(),
            "admin@example.com".to_string(),
        ])
        .unwrap();

        let message = build_message(&from, &recipients, "Server Usage Report", "body").unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("From: reports@example.com"));
        assert!(formatted.contains("Subject: Server Usage Report"));
        // Both recipients land in the To header
        assert!(formatted.contains("ops@example.com"));
        assert!(formatted.contains("admin@example.com"));
    }

    #[test]
    fn test_mailer_new_rejects_bad_sender() {
        let settings = EmailSettings {
            send_alert_to: vec!["ops@example.com".to_string()],
            username: "not an address".to_string(),
        };
        let result = Mailer::new(&settings, "secret");
        assert!(matches!(result, Err(Error::Address(_))));
    }
}
