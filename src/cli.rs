use clap::{Parser, Subcommand};
use std::path::PathBuf;
use bitcoin::Network as BitcoinNetwork;
use crate::config::{DEFAULT_BWT_PORT, DEFAULT_BWT_URL};
use crate::error::AppError;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build replacement transactions for every fee-bumpable wallet transaction
    Recover {
        /// Address all recovered funds are redirected to
        #[clap(short, long, value_parser)]
        recovery_address: String,

        /// Base URL of the bwt wallet tracker
        #[clap(long, value_parser, default_value = DEFAULT_BWT_URL)]
        bwt_url: String,

        /// Port of the bwt wallet tracker
        #[clap(long, value_parser, default_value_t = DEFAULT_BWT_PORT)]
        bwt_port: u16,

        /// Network to use ("bitcoin", "testnet", "regtest")
        #[clap(short, long, value_parser, default_value = "testnet")]
        network: String,

        /// Seed phrase for a signed recovery (reserved; omit for a dry run)
        #[clap(long, value_parser)]
        seed: Option<String>,

        /// Optional file the unsigned transaction hex lines are saved to
        #[clap(short, long, value_parser)]
        output_file: Option<PathBuf>,
    },

    /// Sign a single-input recovery transaction with a WIF private key
    Sign {
        /// Raw transaction hex to sign
        #[clap(short, long, value_parser)]
        tx_hex: String,

        /// Private key in wallet-import-format
        #[clap(short, long, value_parser)]
        wif: String,

        /// Hex-encoded locking script of the previous output being spent
        #[clap(short, long, value_parser)]
        prev_script_hex: String,

        /// Optional file the signed transaction hex is saved to
        #[clap(short, long, value_parser)]
        output_file: Option<PathBuf>,
    },
}

pub fn parse_network(network_str: &str) -> Result<BitcoinNetwork, AppError> {
    match network_str.to_lowercase().as_str() {
        "bitcoin" | "mainnet" => Ok(BitcoinNetwork::Bitcoin),
        "testnet" => Ok(BitcoinNetwork::Testnet),
        "regtest" => Ok(BitcoinNetwork::Regtest),
        s => Err(AppError::InputValidation(format!("invalid network: {}", s))),
    }
}
