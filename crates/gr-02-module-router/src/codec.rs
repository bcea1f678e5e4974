//! # Call Encoding
//!
//! Calldata is `selector ‖ bincode(args)`; return data is `bincode(output)`.
//! Multiple arguments travel as a tuple, a single argument as itself.

use crate::domain::FacetError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Selector;

/// Build calldata for `selector` with `args`.
pub fn encode_call<A: Serialize + ?Sized>(selector: Selector, args: &A) -> Result<Vec<u8>, FacetError> {
    let encoded = bincode::serialize(args).map_err(|e| FacetError::Encode(e.to_string()))?;
    let mut calldata = Vec::with_capacity(4 + encoded.len());
    calldata.extend_from_slice(selector.as_bytes());
    calldata.extend_from_slice(&encoded);
    Ok(calldata)
}

/// Split calldata into selector and argument bytes.
#[must_use]
pub fn split_selector(calldata: &[u8]) -> Option<(Selector, &[u8])> {
    if calldata.len() < 4 {
        return None;
    }
    let (head, rest) = calldata.split_at(4);
    Some((Selector::new([head[0], head[1], head[2], head[3]]), rest))
}

/// Decode call arguments.
pub fn decode_args<A: DeserializeOwned>(args: &[u8]) -> Result<A, FacetError> {
    bincode::deserialize(args).map_err(|e| FacetError::Decode(e.to_string()))
}

/// Encode a return value.
pub fn encode_output<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, FacetError> {
    bincode::serialize(value).map_err(|e| FacetError::Encode(e.to_string()))
}

/// Decode a return value.
pub fn decode_output<T: DeserializeOwned>(output: &[u8]) -> Result<T, FacetError> {
    bincode::deserialize(output).map_err(|e| FacetError::Decode(e.to_string()))
}
