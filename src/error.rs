use bitcoin::address::ParseError as BitcoinAddressError;
use bitcoin::consensus::encode::Error as BitcoinEncodeError;
use bitcoin::key::FromWifError as BitcoinKeyError;
use bitcoin::secp256k1::Error as SecpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wallet source request failed: {0}")]
    SourceRequest(#[from] reqwest::Error),

    #[error("received an error from the wallet source: {0}")]
    SourceStatus(reqwest::StatusCode),

    #[error("malformed payload from the wallet source: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("no transactions replaceable")]
    NoReplaceableTransactions,

    #[error("unexpected prevout: {0}")]
    MalformedPrevout(String),

    #[error("invalid prevout index in {prevout}: {source}")]
    PrevoutIndex {
        prevout: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("transaction {txid} has no output at index {index}")]
    MissingOutput { txid: String, index: u32 },

    #[error("bitcoin address error: {0}")]
    BitcoinAddress(#[from] BitcoinAddressError),

    #[error("bitcoin consensus encoding error: {0}")]
    BitcoinConsensus(#[from] BitcoinEncodeError),

    #[error("private key (WIF) error: {0}")]
    BitcoinKey(#[from] BitcoinKeyError),

    #[error("hex decoding error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("secp256k1 error: {0}")]
    Secp256k1(#[from] SecpError),

    #[error("sighash computation failed for input {input_index}: {message}")]
    Sighash { input_index: usize, message: String },

    #[error("insufficient funds: {available} sats of input, {fee} sats of fee required")]
    InsufficientFunds { available: u64, fee: u64 },

    #[error("input validation error: {0}")]
    InputValidation(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("seed-based signing is not implemented; omit the seed for a dry run")]
    SeedSigningUnavailable,

    #[error("internal error: {0}")]
    Internal(String),
}
