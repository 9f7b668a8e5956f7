// Configuration definitions, functions and tests
//

use derive_more::Display;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string as de_num;

static ENV_PREFIX: &str = "SRV";

// One variable to rule all
static GLOBAL_ENV: &str = "SPIRAL_ENV";

fn prefixed_env(suffix: &str) -> String {
    format!("{}__{}", ENV_PREFIX, suffix)
}

#[derive(thiserror::Error, Debug)]
pub enum ConfError {
    #[error("{0} is not a supported environment. Use either `local` or `prod`.")]
    UnknownEnv(String),
    #[error("cannot locate configuration directory: {0}")]
    ConfDir(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

#[derive(Clone, Debug)]
pub struct Conf {
    pub env_conf: EnvConf,
    pub env: Env,
}

impl Conf {
    pub fn current() -> Result<Self, ConfError> {
        let env = Env::current()?;
        let env_conf = EnvConf::current(env)?;
        Ok(Self { env_conf, env })
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnvConf {
    #[serde(deserialize_with = "de_num")]
    pub port: u16,
    pub host: String,
    pub log: Log,
    pub lobby: LobbyConf,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub pretty: bool,
    #[serde(default = "Log::default_filter")]
    pub filter: String,
}

impl Log {
    fn default_filter() -> String {
        "info".into()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LobbyConf {
    #[serde(deserialize_with = "de_num")]
    pub eviction_grace_ms: u64,
}

impl LobbyConf {
    pub fn eviction_grace(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.eviction_grace_ms)
    }
}

impl EnvConf {
    /// Layers `default`, then the `env` specific file, then `SRV__*` variables
    pub fn current(env: Env) -> Result<Self, ConfError> {
        fn join_filename(conf_dir: &std::path::Path, filename: &str) -> String {
            conf_dir.join(filename).to_string_lossy().into_owned()
        }

        let conf_dir = match std::env::var(prefixed_env("CONF_DIR")) {
            Ok(dir) => std::path::PathBuf::from(dir),
            Err(_) => std::env::current_dir()?.join("conf"),
        };

        let conf = config::Config::builder()
            .add_source(
                config::File::with_name(&join_filename(&conf_dir, "default")).required(true),
            )
            .add_source(
                config::File::with_name(&join_filename(&conf_dir, env.as_ref())).required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(conf.try_deserialize()?)
    }

    #[allow(unused)] // used by tests
    pub fn test_default() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".into(),
            log: Log {
                pretty: false,
                filter: Log::default_filter(),
            },
            lobby: LobbyConf {
                eviction_grace_ms: 200,
            },
        }
    }
}

#[derive(Debug, PartialEq, Display, Clone, Copy)]
pub enum Env {
    #[display(fmt = "local")]
    Local,
    #[display(fmt = "prod")]
    Prod,
}

#[allow(unused)]
impl Env {
    pub fn current() -> Result<Self, ConfError> {
        let global_env = std::env::var(GLOBAL_ENV).unwrap_or_else(|_| "local".into());

        // Or set a more specific per executable
        std::env::var(prefixed_env("ENV"))
            .unwrap_or(global_env)
            .try_into()
    }

    pub fn local(&self) -> bool {
        matches!(self, Self::Local)
    }

    pub fn prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

impl AsRef<str> for Env {
    fn as_ref(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Env {
    type Error = ConfError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "prod" => Ok(Self::Prod),
            _ => Err(ConfError::UnknownEnv(s)),
        }
    }
}
