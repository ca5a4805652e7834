use std::str::FromStr;

use bitcoin::transaction::Version;
use bitcoin::{
    absolute::LockTime, consensus::encode, Address, Amount, Network as BitcoinNetwork, OutPoint,
    ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness,
};

use crate::client::WalletData;
use crate::error::AppError;
use crate::types::{PrevInputInfo, WalletTransaction};

// Bitcoin Core's default dust threshold for P2PKH/P2WPKH outputs.
const DUST_THRESHOLD_SATS: u64 = 546;

/// The recovery engine. Finds fee-bumpable wallet transactions and builds
/// replacements that redirect their full value, minus a strictly higher fee,
/// to a recovery address.
pub struct Recovery<C> {
    client: C,
    network: BitcoinNetwork,
}

/// Keeps the transactions flagged as BIP-125 replaceable, in original order.
/// An empty result is the distinguished "no transactions replaceable"
/// condition; callers must stop the recovery flow on it.
pub fn filter_replaceable(
    txs: Vec<WalletTransaction>,
) -> Result<Vec<WalletTransaction>, AppError> {
    let replaceable: Vec<WalletTransaction> =
        txs.into_iter().filter(|tx| tx.bip125_replaceable).collect();

    if replaceable.is_empty() {
        return Err(AppError::NoReplaceableTransactions);
    }

    Ok(replaceable)
}

/// Splits a `"txid:index"` prevout reference into its two components.
fn parse_prevout(prevout: &str) -> Result<(&str, u32), AppError> {
    let parts: Vec<&str> = prevout.split(':').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(AppError::MalformedPrevout(prevout.to_string()));
    }

    let index = parts[1]
        .parse::<u32>()
        .map_err(|source| AppError::PrevoutIndex {
            prevout: prevout.to_string(),
            source,
        })?;

    Ok((parts[0], index))
}

/// Projects the final serialized size of `unsigned` (inputs only so far)
/// plus a single output paying `destination_script`, and derives a fee one
/// sat/vB above the replaced transaction's own feerate.
///
/// The projection is taken before any signature script exists, so the signed
/// transaction ends up slightly larger and the effective feerate slightly
/// lower than targeted. Known approximation, kept as-is.
fn projected_fee(
    unsigned: &Transaction,
    total_amount: u64,
    destination_script: &ScriptBuf,
    replaced_feerate: f64,
) -> u64 {
    let base_size = encode::serialize(unsigned).len();

    let placeholder_out = TxOut {
        value: Amount::from_sat(total_amount),
        script_pubkey: destination_script.clone(),
    };
    let output_size = encode::serialize(&placeholder_out).len();

    let projected_size = (base_size + output_size) as u64;
    // Just needs to be 1 sat/vB bigger than the transaction it replaces.
    let bumped_feerate = replaced_feerate as u64 + 1;

    log::debug!(
        "projected size: {} B, bumped feerate: {} sat/vB",
        projected_size,
        bumped_feerate
    );

    bumped_feerate * projected_size
}

impl<C: WalletData> Recovery<C> {
    pub fn new(client: C, network: BitcoinNetwork) -> Self {
        Recovery { client, network }
    }

    /// Queries the wallet source for fee-bumpable transactions and builds a
    /// replacement for each, returned as raw transaction hex.
    ///
    /// With an empty `seed` only unsigned transactions are produced (dry
    /// run). A non-empty seed selects a signing flow that is not implemented
    /// yet and is rejected outright.
    ///
    /// A build failure on one transaction does not abort the others; it is
    /// logged and the run continues. If every build fails, the first error
    /// is returned so the failure is never silent.
    pub fn recover(&self, address: &str, seed: &str) -> Result<Vec<String>, AppError> {
        if !seed.is_empty() {
            return Err(AppError::SeedSigningUnavailable);
        }

        let txs = self.client.list_transactions()?;
        log::info!("wallet source reported {} transactions", txs.len());

        let replaceable = filter_replaceable(txs)?;
        log::info!("{} transactions are replaceable", replaceable.len());

        let mut recovered = Vec::new();
        let mut first_failure: Option<AppError> = None;

        for replaceable_tx in &replaceable {
            match self.build_recovery_tx(address, replaceable_tx) {
                Ok(recovery_tx) => {
                    recovered.push(encode::serialize_hex(&recovery_tx));
                }
                Err(e) => {
                    log::error!("skipping transaction {}: {}", replaceable_tx.txid, e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }

        if recovered.is_empty() {
            if let Some(e) = first_failure {
                return Err(e);
            }
        }

        Ok(recovered)
    }

    /// Builds the unsigned replacement for one replaceable transaction: its
    /// previous outputs re-spent into a single output paying `destination`.
    pub fn build_recovery_tx(
        &self,
        destination: &str,
        replaceable: &WalletTransaction,
    ) -> Result<Transaction, AppError> {
        let prev_inputs = self.previous_input_info(replaceable)?;

        let destination_addr =
            Address::from_str(destination).and_then(|addr| addr.require_network(self.network))?;
        let destination_script = destination_addr.script_pubkey();

        let mut recovery_tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: Vec::new(),
            output: Vec::new(),
        };

        let mut total_amount = 0u64;
        for prev_input in &prev_inputs {
            let prev_txid = Txid::from_str(&prev_input.txid).map_err(|e| {
                AppError::InputValidation(format!(
                    "invalid txid in prevout ({}): {}",
                    prev_input.txid, e
                ))
            })?;

            recovery_tx.input.push(TxIn {
                previous_output: OutPoint::new(prev_txid, prev_input.index),
                script_sig: ScriptBuf::new(),
                // The recovery transaction itself must not be fee-bumpable.
                sequence: Sequence::MAX,
                witness: Witness::new(),
            });

            total_amount += prev_input.amount;
        }

        let total_fee = projected_fee(
            &recovery_tx,
            total_amount,
            &destination_script,
            replaceable.own_feerate,
        );
        if total_fee >= total_amount {
            return Err(AppError::InsufficientFunds {
                available: total_amount,
                fee: total_fee,
            });
        }

        let recovered_amount = total_amount - total_fee;
        if recovered_amount < DUST_THRESHOLD_SATS {
            log::warn!(
                "recovered amount {} sats is below the dust threshold {} sats",
                recovered_amount,
                DUST_THRESHOLD_SATS
            );
        }

        recovery_tx.output.push(TxOut {
            value: Amount::from_sat(recovered_amount),
            script_pubkey: destination_script,
        });

        log::debug!(
            "built recovery transaction for {}: {} sats in, {} sats fee",
            replaceable.txid,
            total_amount,
            total_fee
        );

        Ok(recovery_tx)
    }

    /// Resolves every Spending entry of `tx` into a [`PrevInputInfo`], in
    /// Spending order. One wallet-source round trip per entry. Any failure
    /// aborts the whole batch; no partial result is returned.
    fn previous_input_info(
        &self,
        tx: &WalletTransaction,
    ) -> Result<Vec<PrevInputInfo>, AppError> {
        let mut previous_inputs = Vec::with_capacity(tx.spending.len());

        for spend in &tx.spending {
            let (txid, index) = parse_prevout(&spend.prevout)?;

            let raw_tx = self.client.raw_transaction(txid)?;
            if raw_tx.vout.len() <= index as usize {
                return Err(AppError::MissingOutput {
                    txid: txid.to_string(),
                    index,
                });
            }

            previous_inputs.push(PrevInputInfo {
                txid: txid.to_string(),
                index,
                pk_script: raw_tx.vout[index as usize].script_pub_key.hex.clone(),
                // The wallet reports the amount authoritatively; it is not
                // re-derived from the raw output.
                amount: spend.amount,
            });
        }

        Ok(previous_inputs)
    }
}
