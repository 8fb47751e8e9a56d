use common::{is_zero, VoteStatement};
use soroban_sdk::{Bytes, BytesN, Env};

/// Shared trait for vote proof backends.
/// A production proving system (Groth16, PLONK, a zkVM receipt) plugs in here
/// without touching the voting engine, which only sees the contract interface.
pub trait ZkVerifier {
    /// Structural checks on the public inputs and proof bytes, run before any
    /// cryptographic work.
    fn validate_proof_components(
        statement: &VoteStatement,
        proof: &Bytes,
    ) -> Result<(), ProofValidationError>;

    /// Verifies `proof` for `statement` under the circuit identified by
    /// `circuit_id`. Must be deterministic and side-effect-free.
    fn verify(env: &Env, circuit_id: &BytesN<32>, statement: &VoteStatement, proof: &Bytes)
        -> bool;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProofValidationError {
    EmptyProof,
    WrongProofLength,
    ZeroedRoot,
    ZeroedNullifier,
    ZeroedProof,
}

pub const ATTESTATION_DOMAIN: &[u8] = b"zkv:attest";

/// Development backend standing in for the opaque proof system.
///
/// The proof is `sha256("zkv:attest" ‖ circuit_id ‖ statement)`. It binds
/// every public input (changing the choice, root, nullifier or proposal
/// invalidates it) but it is NOT zero-knowledge sound: anyone holding the
/// public circuit id can produce it. The prover SDK only emits it after
/// checking membership and nullifier derivation locally.
pub struct AttestationVerifier;

impl AttestationVerifier {
    pub const PROOF_LEN: u32 = 32;

    pub fn attest(env: &Env, circuit_id: &BytesN<32>, statement: &VoteStatement) -> BytesN<32> {
        let mut data = Bytes::from_slice(env, ATTESTATION_DOMAIN);
        data.extend_from_array(&circuit_id.to_array());
        data.append(&statement.to_bytes(env));
        env.crypto().sha256(&data).into()
    }
}

impl ZkVerifier for AttestationVerifier {
    fn validate_proof_components(
        statement: &VoteStatement,
        proof: &Bytes,
    ) -> Result<(), ProofValidationError> {
        if proof.is_empty() {
            return Err(ProofValidationError::EmptyProof);
        }
        if proof.len() != Self::PROOF_LEN {
            return Err(ProofValidationError::WrongProofLength);
        }
        if proof.iter().all(|b| b == 0) {
            return Err(ProofValidationError::ZeroedProof);
        }
        if is_zero(&statement.root) {
            return Err(ProofValidationError::ZeroedRoot);
        }
        if is_zero(&statement.nullifier) {
            return Err(ProofValidationError::ZeroedNullifier);
        }
        Ok(())
    }

    fn verify(
        env: &Env,
        circuit_id: &BytesN<32>,
        statement: &VoteStatement,
        proof: &Bytes,
    ) -> bool {
        if Self::validate_proof_components(statement, proof).is_err() {
            return false;
        }
        let expected = Self::attest(env, circuit_id, statement);
        Bytes::from_array(env, &expected.to_array()) == *proof
    }
}
