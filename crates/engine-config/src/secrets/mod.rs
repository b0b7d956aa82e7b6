//! Named secret lookup. The flow resolves every secret once, at start-up,
//! through this seam; nothing reads secrets from ambient global state.

pub mod env;
pub mod fixed;

pub use env::EnvSecretProvider;
pub use fixed::StaticSecrets;

pub trait SecretProvider: Send + Sync {
    /// Returns the secret stored under `name` (e.g. `server-name`), if any.
    fn secret(&self, name: &str) -> Option<String>;
}
