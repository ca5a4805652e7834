use std::fs::File;
use std::io::Write;

use bitcoin::consensus::encode;
use bitcoin::Transaction;
use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod recovery;
mod sign;
mod types;

use cli::{CliArgs, Command, parse_network};
use client::BwtClient;
use config::RecoveryConfig;
use error::AppError;
use recovery::Recovery;

fn main() -> Result<(), AppError> {
    env_logger::init();

    let args = CliArgs::parse();
    log::debug!("starting with arguments: {:?}", args);

    match args.command {
        Command::Recover {
            recovery_address,
            bwt_url,
            bwt_port,
            network,
            seed,
            output_file,
        } => {
            let config = RecoveryConfig {
                bwt_url,
                bwt_port,
                network: parse_network(&network)?,
            };
            log::info!("recovering on {:?} via {}", config.network, config.bwt_base());

            let client = BwtClient::connect(&config)?;
            let engine = Recovery::new(client, config.network);

            let recovered = engine.recover(&recovery_address, seed.as_deref().unwrap_or(""))?;
            log::info!("built {} recovery transaction(s)", recovered.len());

            println!("Unsigned recovery transactions:");
            for tx_hex in &recovered {
                println!("{}", tx_hex);
            }

            if let Some(path) = output_file {
                let mut file = File::create(&path).map_err(|e| {
                    log::error!("failed to create output file {:?}", path);
                    AppError::Io(e)
                })?;
                for tx_hex in &recovered {
                    writeln!(file, "{}", tx_hex)?;
                }
                log::info!("saved recovery transactions to {:?}", path);
            }
        }

        Command::Sign {
            tx_hex,
            wif,
            prev_script_hex,
            output_file,
        } => {
            let unsigned: Transaction = encode::deserialize(&hex::decode(tx_hex.trim())?)?;

            let signed_hex = sign::sign_transaction(&wif, &prev_script_hex, &unsigned)?;
            log::info!("signed transaction input 0");

            println!("{}", signed_hex);

            if let Some(path) = output_file {
                let mut file = File::create(&path).map_err(|e| {
                    log::error!("failed to create output file {:?}", path);
                    AppError::Io(e)
                })?;
                file.write_all(signed_hex.as_bytes())?;
                log::info!("saved signed transaction to {:?}", path);
            }
        }
    }

    Ok(())
}
