//! Client-side prover for anonymous votes.
//!
//! A voter keeps a [`VoterIdentity`] off-chain, registers its leaf with the
//! voting contract, then asks a [`VoteProver`] to turn a membership path into
//! a [`VoteProof`] (or its binary envelope) for a given proposal and choice.
//!
//! The prover checks everything it can locally before producing output: the
//! path must recompute to the root the proof will claim. Proofs come from the
//! same backend the verifier contract runs, so [`VoteProver::verify_locally`]
//! agrees with on-chain verification for a matching circuit id.

use common::{
    compute_root, derive_nullifier, voter_leaf, EnvelopeError, MerkleProof, VoteChoice,
    VoteProof, VoteStatement, MAX_TREE_DEPTH,
};
use soroban_sdk::{Bytes, BytesN, Env};
use zk_verifier::{AttestationVerifier, ZkVerifier};

const SECRET_DOMAIN: &[u8] = b"zkv:secret";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProverError {
    /// The membership path does not lead from this identity's leaf to the root.
    RootMismatch,
    PathTooLong,
    Envelope(EnvelopeError),
}

impl From<EnvelopeError> for ProverError {
    fn from(err: EnvelopeError) -> Self {
        ProverError::Envelope(err)
    }
}

/// A voter's secret. Never leaves the client.
#[derive(Clone, Debug)]
pub struct VoterIdentity {
    secret: BytesN<32>,
}

impl VoterIdentity {
    pub fn from_secret(secret: BytesN<32>) -> Self {
        Self { secret }
    }

    /// Derive a secret from caller-supplied randomness.
    pub fn from_entropy(env: &Env, entropy: &[u8]) -> Self {
        let mut data = Bytes::from_slice(env, SECRET_DOMAIN);
        data.extend_from_slice(entropy);
        Self {
            secret: env.crypto().sha256(&data).into(),
        }
    }

    pub fn secret(&self) -> &BytesN<32> {
        &self.secret
    }

    /// The value to submit to `register_voter`.
    pub fn leaf(&self, env: &Env) -> BytesN<32> {
        voter_leaf(env, &self.secret)
    }

    pub fn nullifier(&self, env: &Env, proposal_id: u64) -> BytesN<32> {
        derive_nullifier(env, &self.secret, proposal_id)
    }
}

pub struct VoteProver {
    env: Env,
    circuit_id: BytesN<32>,
}

impl VoteProver {
    /// `circuit_id` must match the one configured on the verifier contract.
    pub fn new(env: &Env, circuit_id: BytesN<32>) -> Self {
        Self {
            env: env.clone(),
            circuit_id,
        }
    }

    pub fn circuit_id(&self) -> &BytesN<32> {
        &self.circuit_id
    }

    /// Build a proof that `identity` is a member under `root` and votes
    /// `choice` on `proposal_id`.
    pub fn prove(
        &self,
        identity: &VoterIdentity,
        proposal_id: u64,
        choice: VoteChoice,
        root: &BytesN<32>,
        membership: &MerkleProof,
    ) -> Result<VoteProof, ProverError> {
        if membership.path.len() > MAX_TREE_DEPTH {
            return Err(ProverError::PathTooLong);
        }
        let leaf = identity.leaf(&self.env);
        if compute_root(&self.env, &leaf, &membership.path) != *root {
            return Err(ProverError::RootMismatch);
        }

        let statement = VoteStatement {
            proposal_id,
            root: root.clone(),
            nullifier: identity.nullifier(&self.env, proposal_id),
            choice,
        };
        let digest = AttestationVerifier::attest(&self.env, &self.circuit_id, &statement);
        Ok(VoteProof {
            statement,
            proof: Bytes::from_array(&self.env, &digest.to_array()),
        })
    }

    /// Same as [`prove`](Self::prove), encoded for the contract's `vote` entry point.
    pub fn prove_envelope(
        &self,
        identity: &VoterIdentity,
        proposal_id: u64,
        choice: VoteChoice,
        root: &BytesN<32>,
        membership: &MerkleProof,
    ) -> Result<Bytes, ProverError> {
        let proof = self.prove(identity, proposal_id, choice, root, membership)?;
        Ok(proof.encode(&self.env)?)
    }

    pub fn verify_locally(&self, proof: &VoteProof) -> bool {
        AttestationVerifier::verify(&self.env, &self.circuit_id, &proof.statement, &proof.proof)
    }
}
