use bitcoin::Network as BitcoinNetwork;

pub const DEFAULT_BWT_URL: &str = "http://127.0.0.1";
pub const DEFAULT_BWT_PORT: u16 = 3060;

/// Connection and network settings for one recovery run. Assembled from CLI
/// arguments; the engine itself never reads process-wide configuration.
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    pub bwt_url: String,
    pub bwt_port: u16,
    pub network: BitcoinNetwork,
}

impl RecoveryConfig {
    pub fn bwt_base(&self) -> String {
        format!("{}:{}", self.bwt_url, self.bwt_port)
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        RecoveryConfig {
            bwt_url: DEFAULT_BWT_URL.to_string(),
            bwt_port: DEFAULT_BWT_PORT,
            network: BitcoinNetwork::Testnet,
        }
    }
}
