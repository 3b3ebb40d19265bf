//! Chain context shared with transaction-building clients
//!
//! Constructed once at process start from configuration and passed by
//! reference through application state. The contract address can be
//! re-pointed at runtime via `set_contract_address`; nothing else mutates.

use crate::config::ChainConfig;
use std::sync::RwLock;

/// Network configuration exposed to clients assembling transactions
pub struct ChainContext {
    network: String,
    contract_address: RwLock<String>,
}

impl ChainContext {
    /// Create a new chain context from configuration
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            network: config.network.clone(),
            contract_address: RwLock::new(config.contract_address.clone()),
        }
    }

    /// The configured network name
    pub fn network(&self) -> &str {
        &self.network
    }

    /// The current contract address
    pub fn contract_address(&self) -> String {
        self.contract_address
            .read()
            .expect("chain context lock poisoned")
            .clone()
    }

    /// Re-point the contract address (e.g. after a redeploy)
    pub fn set_contract_address(&self, address: String) {
        let mut guard = self
            .contract_address
            .write()
            .expect("chain context lock poisoned");
        *guard = address;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_address_can_be_repointed() {
        let ctx = ChainContext::new(&ChainConfig {
            network: "sepolia".into(),
            contract_address: "0xabc".into(),
        });
        assert_eq!(ctx.network(), "sepolia");
        assert_eq!(ctx.contract_address(), "0xabc");

        ctx.set_contract_address("0xdef".into());
        assert_eq!(ctx.contract_address(), "0xdef");
    }
}
