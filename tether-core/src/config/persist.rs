//! Flash persistence for [`LinkConfig`]
//!
//! The stored record is the config wrapped with a magic number and layout
//! version, postcard-encoded.

use serde::{Deserialize, Serialize};

use super::{ConfigError, LinkConfig};

/// Magic number to identify a stored link config
pub const LINK_CONFIG_MAGIC: u32 = 0x544C_4E4B; // "TLNK"

/// Current stored layout version
pub const LINK_CONFIG_VERSION: u8 = 1;

/// Upper bound on the encoded size
pub const MAX_STORED_SIZE: usize = 24;

#[derive(Serialize, Deserialize)]
struct StoredConfig {
    magic: u32,
    version: u8,
    config: LinkConfig,
}

impl LinkConfig {
    /// Serialize into `buf` for storage, returning the used prefix
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        self.validate()?;
        let stored = StoredConfig {
            magic: LINK_CONFIG_MAGIC,
            version: LINK_CONFIG_VERSION,
            config: *self,
        };
        postcard::to_slice(&stored, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Load a config written by [`LinkConfig::to_slice`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let stored: StoredConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if stored.magic != LINK_CONFIG_MAGIC {
            return Err(ConfigError::Deserialize);
        }
        if stored.version != LINK_CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        stored.config.validate()?;

        #[cfg(feature = "defmt")]
        defmt::info!("link config loaded: {}", stored.config);

        Ok(stored.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollBudget;

    #[test]
    fn test_store_and_load() {
        let config = LinkConfig::default()
            .with_spi_poll_budget(PollBudget::new(4_000))
            .with_resync_threshold(5);

        let mut buf = [0u8; MAX_STORED_SIZE];
        let used = config.to_slice(&mut buf).unwrap().len();
        assert!(used <= MAX_STORED_SIZE);

        assert_eq!(LinkConfig::from_bytes(&buf[..used]), Ok(config));
    }

    #[test]
    fn test_max_budgets_fit() {
        let config = LinkConfig::default()
            .with_spi_poll_budget(PollBudget::new(u32::MAX))
            .with_uart_poll_budget(PollBudget::new(u32::MAX))
            .with_resync_threshold(u8::MAX);
        let mut buf = [0u8; MAX_STORED_SIZE];
        assert!(config.to_slice(&mut buf).is_ok());
    }

    #[test]
    fn test_invalid_config_not_stored() {
        let config = LinkConfig::default().with_resync_threshold(0);
        let mut buf = [0u8; MAX_STORED_SIZE];
        assert_eq!(config.to_slice(&mut buf), Err(ConfigError::InvalidThreshold));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(
            LinkConfig::default().to_slice(&mut buf),
            Err(ConfigError::Serialize)
        );
    }

    #[test]
    fn test_erased_flash_rejected() {
        assert!(LinkConfig::from_bytes(&[0xFF; MAX_STORED_SIZE]).is_err());
        assert_eq!(LinkConfig::from_bytes(&[]), Err(ConfigError::Deserialize));
    }

    #[test]
    fn test_version_mismatch() {
        let stored = StoredConfig {
            magic: LINK_CONFIG_MAGIC,
            version: LINK_CONFIG_VERSION + 1,
            config: LinkConfig::default(),
        };
        let mut buf = [0u8; MAX_STORED_SIZE];
        let used = postcard::to_slice(&stored, &mut buf).unwrap().len();
        assert_eq!(
            LinkConfig::from_bytes(&buf[..used]),
            Err(ConfigError::VersionMismatch)
        );
    }
}
