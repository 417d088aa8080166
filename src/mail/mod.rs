//! Outbound mail delivery abstractions.
//!
//! Delivery is synchronous within the request that triggers it, the handler
//! blocks until the transport accepts or rejects the message. The sender
//! decides how to deliver: SMTP against the configured relay, or a log-only
//! stub when no credentials are configured.
use anyhow::{Context, Result};
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, Message, SmtpTransport,
    Transport,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery abstraction used by the password recovery handler.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error.
    ///
    /// # Errors
    /// Returns an error if the recipient address cannot be parsed or the
    /// transport rejects the message.
    fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogSender;

impl EmailSender for LogSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to_email = %message.to_email,
            subject = %message.subject,
            "email send stub"
        );
        Ok(())
    }
}

/// SMTP sender, STARTTLS against the configured relay.
pub struct SmtpSender {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpSender {
    /// # Errors
    /// Returns an error if the relay hostname or the sender address is invalid.
    pub fn new(
        server: &str,
        port: u16,
        from: String,
        username: String,
        password: SecretString,
    ) -> Result<Self> {
        let from: Mailbox = from.parse().context("invalid sender address")?;

        let transport = SmtpTransport::starttls_relay(server)
            .context("invalid SMTP relay")?
            .port(port)
            .credentials(Credentials::new(
                username,
                password.expose_secret().to_string(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

impl EmailSender for SmtpSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(message
                .to_email
                .parse()
                .context("invalid recipient address")?)
            .subject(message.subject.clone())
            .body(message.body.clone())
            .context("error building message")?;

        self.transport
            .send(&email)
            .context("error sending message")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sender_accepts_message() {
        let sender = LogSender;
        let message = EmailMessage {
            to_email: "test@test.com".to_string(),
            subject: "planetary API password recovery".to_string(),
            body: "your planetary API password is pw".to_string(),
        };

        assert!(sender.send(&message).is_ok());
    }

    #[test]
    fn test_smtp_sender_rejects_bad_from() {
        let sender = SmtpSender::new(
            "sandbox.smtp.mailtrap.io",
            2525,
            "not an address".to_string(),
            "user".to_string(),
            SecretString::from("pass"),
        );

        assert!(sender.is_err());
    }
}
