use crate::cli::actions::{db, server, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    if let Some(("db", sub)) = matches.subcommand() {
        let op = match sub.subcommand_name() {
            Some("create") => db::Op::Create,
            Some("drop") => db::Op::Drop,
            Some("seed") => db::Op::Seed,
            _ => anyhow::bail!("missing db operation: create, drop or seed"),
        };

        return Ok(Action::Db(db::Args { op, dsn }));
    }

    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let token_secret = matches
        .get_one::<String>("token-secret")
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --token-secret")?;

    let mail = server::MailArgs {
        server: matches
            .get_one::<String>("mail-server")
            .cloned()
            .context("missing required argument: --mail-server")?,
        port: matches.get_one::<u16>("mail-port").copied().unwrap_or(2525),
        from: matches
            .get_one::<String>("mail-from")
            .cloned()
            .context("missing required argument: --mail-from")?,
        username: matches.get_one::<String>("mail-username").cloned(),
        password: matches
            .get_one::<String>("mail-password")
            .cloned()
            .map(SecretString::from),
    };

    Ok(Action::Server(server::Args {
        port,
        dsn,
        token_secret,
        mail,
    }))
}
