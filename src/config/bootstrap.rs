use crate::error::{Error, Result};

/// Environment variable overriding the invite token of the bootstrap
/// administrator.
pub const ADMIN_INVITE_TOKEN_ENV: &str = "SSHPORTAL_DEFAULT_ADMIN_INVITE_TOKEN";

const DEFAULT_KEY_TYPE: &str = "rsa";
const DEFAULT_KEY_BITS: u32 = 2048;
const DEFAULT_INVITE_TOKEN_LENGTH: usize = 16;

/// Settings for the baseline records created on first start.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Used verbatim as the administrator invite token when set.
    pub admin_invite_token: Option<String>,
    pub key_type: String,
    pub key_bits: u32,
    pub invite_token_length: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_invite_token: None,
            key_type: DEFAULT_KEY_TYPE.to_string(),
            key_bits: DEFAULT_KEY_BITS,
            invite_token_length: DEFAULT_INVITE_TOKEN_LENGTH,
        }
    }
}

impl BootstrapConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_admin_invite_token(lookup(ADMIN_INVITE_TOKEN_ENV))
    }

    #[must_use]
    pub fn with_admin_invite_token(mut self, token: Option<String>) -> Self {
        self.admin_invite_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_type.is_empty() {
            return Err(Error::Config("key type cannot be empty".to_string()));
        }
        if self.key_bits == 0 {
            return Err(Error::Config("key bits must be positive".to_string()));
        }
        if self.invite_token_length == 0 {
            return Err(Error::Config(
                "invite token length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
