mod crypto;
mod env_overrides;
mod loader;
pub mod schema;
#[cfg(test)]
mod test_env;

pub use schema::{
    AccountsConfig, CalendarConfig, Config, MediaConfig, SecretsConfig, StorageConfig,
    StylistConfig,
};
