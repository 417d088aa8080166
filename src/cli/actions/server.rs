use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::mail::{EmailSender, LogSender, SmtpSender};
use crate::planetary;
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub token_secret: SecretString,
    pub mail: MailArgs,
}

#[derive(Debug)]
pub struct MailArgs {
    pub server: String,
    pub port: u16,
    pub from: String,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

/// Handle the server action
/// # Errors
/// Returns an error if the mail transport or the server cannot be set up
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => {
            let globals = GlobalArgs::new(args.token_secret);

            // Without SMTP credentials mail is logged instead of sent
            let mailer: Arc<dyn EmailSender> = match (args.mail.username, args.mail.password) {
                (Some(username), Some(password)) => Arc::new(SmtpSender::new(
                    &args.mail.server,
                    args.mail.port,
                    args.mail.from,
                    username,
                    password,
                )?),
                _ => {
                    info!("MAIL_USERNAME/MAIL_PASSWORD not set, logging outbound mail");
                    Arc::new(LogSender)
                }
            };

            planetary::new(args.port, &args.dsn, globals, mailer).await?;
        }
        Action::Db(_) => unreachable!("db actions are handled by actions::db"),
    }

    Ok(())
}
