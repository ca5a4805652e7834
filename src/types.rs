use serde::Deserialize;

/// One wallet transaction as reported by the bwt `/txs` endpoint.
///
/// Decoding is lenient: bwt omits zero-valued fields, so every field falls
/// back to its default rather than failing the whole payload.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct WalletTransaction {
    pub txid: String,
    /// Confirmation height, 0 while unconfirmed.
    pub block_height: u32,
    /// Wallet-owned outputs of this transaction.
    pub funding: Vec<Funding>,
    /// Wallet-owned inputs of this transaction.
    pub spending: Vec<Spending>,
    pub balance_change: i64,
    /// Feerate of this transaction alone, in sat/vB.
    pub own_feerate: f64,
    /// Feerate including unconfirmed ancestors, in sat/vB.
    pub effective_feerate: f64,
    pub bip125_replaceable: bool,
    pub has_unconfirmed_parents: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Funding {
    pub vout: u32,
    pub address: String,
    pub scripthash: String,
    pub origin: String,
    pub desc: String,
    pub bip32_origins: Vec<String>,
    /// Amount in satoshis.
    pub amount: u64,
    /// `"txid:vin"` of the transaction spending this output, if any.
    pub spent_by: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Spending {
    pub vin: u32,
    pub address: String,
    pub scripthash: String,
    pub origin: String,
    pub desc: String,
    pub bip32_origins: Vec<String>,
    /// Amount in satoshis.
    pub amount: u64,
    /// `"txid:index"` of the output this input consumes.
    pub prevout: String,
}

/// Decoded transaction detail from the bwt `/tx/<txid>/verbose` endpoint.
/// Only `vout` is consulted by the engine (to resolve locking scripts);
/// the rest mirrors the endpoint for completeness.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawTransaction {
    pub txid: String,
    pub hash: String,
    pub hex: String,
    pub version: i32,
    pub locktime: u32,
    pub size: u32,
    pub vsize: u32,
    pub weight: u32,
    pub vin: Vec<Vin>,
    pub vout: Vec<Vout>,
    pub blockhash: String,
    pub blocktime: u64,
    pub time: u64,
    pub confirmations: u32,
    pub in_active_chain: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Vout {
    pub n: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
    /// Value in BTC, as bitcoind reports it.
    pub value: f64,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScriptPubKey {
    pub asm: String,
    pub hex: String,
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(rename = "reqSigs")]
    pub req_sigs: u32,
    pub addresses: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Vin {
    pub txid: String,
    pub vout: u32,
    #[serde(rename = "scriptSig")]
    pub script_sig: ScriptSig,
    pub sequence: u32,
    pub txinwitness: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScriptSig {
    pub asm: String,
    pub hex: String,
}

/// Resolved detail for one previous output being re-spent. Built per input
/// while constructing a recovery transaction, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct PrevInputInfo {
    pub txid: String,
    pub index: u32,
    /// Hex-encoded locking script of the previous output.
    pub pk_script: String,
    /// Amount in satoshis, as reported by the wallet's Spending entry.
    pub amount: u64,
}
