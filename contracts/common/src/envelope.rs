//! Versioned binary envelope carried by the `vote(proposal_id, bytes)` entry point.
//!
//! ```text
//! offset  len  field
//! 0       1    version (= ENVELOPE_VERSION)
//! 1       8    proposal_id, big-endian
//! 9       32   merkle root
//! 41      32   nullifier
//! 73      1    choice (0 = For, 1 = Against)
//! 74      4    proof length N, big-endian
//! 78      N    proof bytes
//! ```
//!
//! Decoding is strict: trailing bytes, unknown versions and unknown choice
//! bytes are errors, so a loosely-formed payload never reaches a verifier.

use soroban_sdk::{Bytes, BytesN, Env};

use crate::statement::{VoteChoice, VoteProof, VoteStatement};

pub const ENVELOPE_VERSION: u8 = 1;
pub const HEADER_LEN: u32 = 78;
pub const MAX_PROOF_LEN: u32 = 1024;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EnvelopeError {
    Truncated,
    UnsupportedVersion,
    UnknownChoice,
    EmptyProof,
    ProofTooLarge,
    LengthMismatch,
}

fn read_array<const N: usize>(bytes: &Bytes, offset: u32) -> [u8; N] {
    let mut out = [0u8; N];
    bytes
        .slice(offset..offset + N as u32)
        .copy_into_slice(&mut out);
    out
}

/// A proof must carry `1..=MAX_PROOF_LEN` bytes.
pub fn check_proof_len(len: u32) -> Result<(), EnvelopeError> {
    if len == 0 {
        return Err(EnvelopeError::EmptyProof);
    }
    if len > MAX_PROOF_LEN {
        return Err(EnvelopeError::ProofTooLarge);
    }
    Ok(())
}

impl VoteProof {
    pub fn encode(&self, env: &Env) -> Result<Bytes, EnvelopeError> {
        let proof_len = self.proof.len();
        check_proof_len(proof_len)?;

        let mut out = Bytes::new(env);
        out.push_back(ENVELOPE_VERSION);
        out.append(&self.statement.to_bytes(env));
        out.extend_from_array(&proof_len.to_be_bytes());
        out.append(&self.proof);
        Ok(out)
    }

    pub fn decode(env: &Env, bytes: &Bytes) -> Result<Self, EnvelopeError> {
        if bytes.len() < HEADER_LEN {
            return Err(EnvelopeError::Truncated);
        }
        if bytes.get(0) != Some(ENVELOPE_VERSION) {
            return Err(EnvelopeError::UnsupportedVersion);
        }

        let proposal_id = u64::from_be_bytes(read_array::<8>(bytes, 1));
        let root = BytesN::from_array(env, &read_array::<32>(bytes, 9));
        let nullifier = BytesN::from_array(env, &read_array::<32>(bytes, 41));
        let choice = bytes
            .get(73)
            .and_then(VoteChoice::from_byte)
            .ok_or(EnvelopeError::UnknownChoice)?;

        let proof_len = u32::from_be_bytes(read_array::<4>(bytes, 74));
        check_proof_len(proof_len)?;
        if bytes.len() - HEADER_LEN != proof_len {
            return Err(EnvelopeError::LengthMismatch);
        }

        Ok(VoteProof {
            statement: VoteStatement {
                proposal_id,
                root,
                nullifier,
                choice,
            },
            proof: bytes.slice(HEADER_LEN..),
        })
    }
}
