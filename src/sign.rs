use bitcoin::consensus::encode;
use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::secp256k1::{Message, Secp256k1};
use bitcoin::sighash::{EcdsaSighashType, SighashCache};
use bitcoin::{PrivateKey, ScriptBuf, Transaction};

use crate::error::AppError;

/// Signs input 0 of a single-input recovery transaction and returns the
/// signed transaction as raw hex. The caller's transaction is never mutated.
///
/// `pk_script_hex` is the locking script of the previous output being spent.
/// SIGHASH_ALL only; the public key pushed into the signature script follows
/// the compressed flag embedded in the WIF key. Multi-input transactions are
/// rejected rather than half-signed.
pub fn sign_transaction(
    private_key_wif: &str,
    pk_script_hex: &str,
    unsigned_tx: &Transaction,
) -> Result<String, AppError> {
    if unsigned_tx.input.len() != 1 {
        return Err(AppError::Signing(format!(
            "expected exactly one input to sign, transaction has {}",
            unsigned_tx.input.len()
        )));
    }

    let private_key = PrivateKey::from_wif(private_key_wif)?;
    let source_pk_script = ScriptBuf::from_bytes(hex::decode(pk_script_hex)?);

    let secp = Secp256k1::new();
    let public_key = private_key.public_key(&secp);

    let mut signed_tx = unsigned_tx.clone();

    let sighash = SighashCache::new(&signed_tx)
        .legacy_signature_hash(0, &source_pk_script, EcdsaSighashType::All.to_u32())
        .map_err(|e| AppError::Sighash {
            input_index: 0,
            message: e.to_string(),
        })?;
    let message = Message::from_digest_slice(sighash.as_ref())?;

    let signature = bitcoin::ecdsa::Signature {
        signature: secp.sign_ecdsa(&message, &private_key.inner),
        sighash_type: EcdsaSighashType::All,
    };

    let signature_push = PushBytesBuf::try_from(signature.to_vec())
        .map_err(|_| AppError::Internal("signature does not fit a script push".to_string()))?;
    signed_tx.input[0].script_sig = Builder::new()
        .push_slice(signature_push)
        .push_key(&public_key)
        .into_script();

    log::debug!("signed input 0 with a {}-byte signature script", signed_tx.input[0].script_sig.len());

    Ok(encode::serialize_hex(&signed_tx))
}
