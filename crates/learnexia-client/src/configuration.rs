use anyhow::Context as _;
use learnexia_shared::{
    const_config::client::CLIENT_DEFAULT_SERVER_ADDRESS, telemetry::TraceSettings,
};
use std::{
    convert::{TryFrom, TryInto},
    path::{Path, PathBuf},
};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub logging: TraceSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ServerSettings {
    /// Prefixed to every request path, no trailing slash
    pub base_url: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct StorageSettings {
    /// Folder that holds the session token and the cached user
    pub session_dir: PathBuf,
}

const DEFAULT_SESSION_DIR: &str = ".learnexia";
const DEFAULT_TRACE_FOLDER: &str = "traces";
const DEFAULT_TRACE_LEVEL: &str = "info";

pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)
        .context("failed to parse APP_ENVIRONMENT")?;
    load_configuration(&configuration_directory, &environment)
}

/// Layers the built in defaults, `base.toml`, the environment file and `APP_`
/// environment variables in that order. Missing files are skipped
pub fn load_configuration(
    configuration_directory: &Path,
    environment: &Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .set_default("server.base_url", CLIENT_DEFAULT_SERVER_ADDRESS)?
        .set_default("storage.session_dir", DEFAULT_SESSION_DIR)?
        .set_default("logging.folder", DEFAULT_TRACE_FOLDER)?
        .set_default("logging.level", DEFAULT_TRACE_LEVEL)?
        .add_source(config::File::from(configuration_directory.join("base.toml")).required(false))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_SERVER__BASE_URL=http://10.0.0.2:5000 would set `Settings.server.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("failed to build configuration")?;

    let mut result = settings
        .try_deserialize::<Configuration>()
        .context("failed to deserialize configuration")?;
    result.server.base_url = result.server.base_url.trim_end_matches('/').to_string();
    Ok(result)
}

/// The possible runtime environment for our application.
#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
