use secrecy::SecretString;

/// Per-request context shared with every handler via an axum `Extension`,
/// built once at startup.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub token_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(token_secret: SecretString) -> Self {
        Self { token_secret }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("SECRET"));
        assert_eq!(args.token_secret.expose_secret(), "SECRET");
    }
}
