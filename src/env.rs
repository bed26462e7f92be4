type EnvError = Box<dyn std::error::Error + Send + Sync>;
type EnvResult<T> = Result<T, EnvError>;

/// Gets the Discord bot token from environment
pub fn discord_token() -> EnvResult<String> {
    dotenvy::var("DISCORD_TOKEN").map_err(|e| Box::new(e) as EnvError)
}

/// Reads an optional setting; an unset variable is `None`, anything else unreadable is an error
pub fn optional(key: &str) -> Result<Option<String>, dotenvy::Error> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(e) => Err(e),
    }
}
