use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),

    #[error("DATABASE_URL must not be empty")]
    EmptyDatabaseUrl,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

pub fn load_config() -> Result<Config, ConfigError> {
    from_vars(std::env::vars())
}

fn from_vars<I>(vars: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let config: Config = envy::from_iter(vars)?;

    if config.database_url.trim().is_empty() {
        return Err(ConfigError::EmptyDatabaseUrl);
    }

    Ok(config)
}
