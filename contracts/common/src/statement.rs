//! Public inputs of a vote proof.

use soroban_sdk::{contracttype, Bytes, BytesN, Env};

/// Closed set of ballot options.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoteChoice {
    For,
    Against,
}

impl VoteChoice {
    pub fn to_byte(self) -> u8 {
        match self {
            VoteChoice::For => 0,
            VoteChoice::Against => 1,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(VoteChoice::For),
            1 => Some(VoteChoice::Against),
            _ => None,
        }
    }
}

/// What a proof claims: "a secret under `root` derives `nullifier` for
/// `proposal_id` and votes `choice`".
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteStatement {
    pub proposal_id: u64,
    pub root: BytesN<32>,
    pub nullifier: BytesN<32>,
    pub choice: VoteChoice,
}

/// Encoded length of a statement: id (8) + root (32) + nullifier (32) + choice (1).
pub const STATEMENT_LEN: u32 = 73;

impl VoteStatement {
    /// Canonical byte form, shared by the envelope and proof backends.
    pub fn to_bytes(&self, env: &Env) -> Bytes {
        let mut out = Bytes::new(env);
        out.extend_from_array(&self.proposal_id.to_be_bytes());
        out.extend_from_array(&self.root.to_array());
        out.extend_from_array(&self.nullifier.to_array());
        out.push_back(self.choice.to_byte());
        out
    }

    /// The same claim re-anchored at another registry root.
    pub fn with_root(&self, root: BytesN<32>) -> Self {
        VoteStatement {
            proposal_id: self.proposal_id,
            root,
            nullifier: self.nullifier.clone(),
            choice: self.choice,
        }
    }
}

/// A proof together with the public inputs it was generated for.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteProof {
    pub statement: VoteStatement,
    /// Opaque proof-system output; only the verifier interprets it.
    pub proof: Bytes,
}
