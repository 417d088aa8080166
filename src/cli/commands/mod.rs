use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!(
            "{} - {}",
            env!("CARGO_PKG_VERSION"),
            crate::planetary::GIT_COMMIT_HASH
        )
        .into_boxed_str(),
    );

    Command::new("planetary")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PLANETARY_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("dsn")
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .default_value("sqlite://planets.db")
                .env("PLANETARY_DSN"),
        )
        .arg(
            Arg::new("token-secret")
                .long("token-secret")
                .help("Secret used to sign and verify access tokens")
                .default_value("SECRET")
                .env("PLANETARY_TOKEN_SECRET")
                .hide_env_values(true),
        )
        .arg(
            Arg::new("mail-server")
                .long("mail-server")
                .help("SMTP relay used for password recovery mail")
                .default_value("sandbox.smtp.mailtrap.io")
                .env("MAIL_SERVER"),
        )
        .arg(
            Arg::new("mail-port")
                .long("mail-port")
                .help("SMTP relay port")
                .default_value("2525")
                .env("MAIL_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("mail-from")
                .long("mail-from")
                .help("Sender address for outbound mail")
                .default_value("admin@planetary.com")
                .env("MAIL_FROM"),
        )
        .arg(
            Arg::new("mail-username")
                .long("mail-username")
                .help("SMTP username, mail is logged instead of sent when unset")
                .env("MAIL_USERNAME"),
        )
        .arg(
            Arg::new("mail-password")
                .long("mail-password")
                .help("SMTP password")
                .env("MAIL_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PLANETARY_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("db")
                .about("Database bootstrap operations")
                .subcommand_required(true)
                .subcommand(Command::new("create").about("Create the schema"))
                .subcommand(Command::new("drop").about("Drop the schema"))
                .subcommand(
                    Command::new("seed").about("Insert the sample planets and test user"),
                ),
        )
}
