//! Bot configuration: [`Settings`] loaded from a JSON file, and the credential providers that
//! turn it into [`Credentials`] (static values or a remote secret store).

mod credentials;
mod settings;


pub use credentials::{
    credential_provider, split_key_path, CredentialProvider, Credentials, InfisicalCredentials,
    StaticCredentials, DEFAULT_INFISICAL_API_URL,
};
pub use settings::{InfisicalSettings, Settings, DEFAULT_REQUEST_TIMEOUT_SECS};
