//! Reading the deployment environment.

use std::fmt;

/// Deployment environment, selected through the `RUN_ENV` variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Resolve the environment from `RUN_ENV`, defaulting to development.
    pub fn current() -> Self {
        std::env::var("RUN_ENV")
            .map(|value| Self::from(value.as_str()))
            .unwrap_or_default()
    }

    /// Name of the per-environment config file overlay.
    pub fn config_file_name(self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Sandbox => "Sandbox",
            Self::Production => "Production",
        }
    }
}

impl From<&str> for Env {
    fn from(env: &str) -> Self {
        match env {
            "Sandbox" | "sandbox" => Self::Sandbox,
            "Production" | "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_file_name())
    }
}
