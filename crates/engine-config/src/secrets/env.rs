use crate::{error::SecretError, secrets::SecretProvider};
use std::{collections::HashMap, fs, path::Path};
use tracing::debug;

pub const DEFAULT_PREFIX: &str = "TABLOAD";

/// Secrets taken from the process environment, optionally overlaid with a
/// `.env` file.
///
/// A secret named `server-name` is looked up as `<PREFIX>_SERVER_NAME`
/// first, then as plain `SERVER_NAME`.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    vars: HashMap<String, String>,
    prefix: Option<String>,
}

impl EnvSecretProvider {
    /// Snapshot of the current process environment.
    pub fn new() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            prefix: Some(DEFAULT_PREFIX.to_string()),
        }
    }

    /// Use `prefix` instead of the default; an empty prefix disables it.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim().trim_end_matches('_');
        self.prefix = (!prefix.is_empty()).then(|| prefix.to_uppercase());
        self
    }

    /// Load variables from a .env file. File values override the environment.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SecretError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SecretError::EnvFileRead {
            path: path.display().to_string(),
            source,
        })?;

        self.parse_env_content(&content)?;
        debug!("Loaded secrets from {}", path.display());
        Ok(())
    }

    /// `server-name` -> `SERVER_NAME`
    pub fn env_key(name: &str) -> String {
        name.trim().replace(['-', '.', ' '], "_").to_uppercase()
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), SecretError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            // Parse KEY=VALUE format
            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim();
                let value = line[eq_pos + 1..].trim();

                if key.is_empty() {
                    return Err(SecretError::EnvFileFormat(format!(
                        "empty key at line {}",
                        line_num + 1
                    )));
                }

                self.vars.insert(key.to_string(), Self::unquote_value(value));
            } else {
                return Err(SecretError::EnvFileFormat(format!(
                    "malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            }
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn secret(&self, name: &str) -> Option<String> {
        let key = Self::env_key(name);
        self.prefix
            .as_ref()
            .and_then(|prefix| self.vars.get(&format!("{prefix}_{key}")))
            .or_else(|| self.vars.get(&key))
            .cloned()
    }
}
