//! Cross-contract surface of a proof verifier.

use soroban_sdk::{Bytes, Env};

use crate::statement::VoteStatement;

/// Any contract deployed as the voting engine's verifier exposes this call.
///
/// Implementations must be deterministic and must not write storage or emit
/// events: the engine may call them any number of times for the same input.
#[soroban_sdk::contractclient(name = "VoteVerifierClient")]
pub trait VoteVerifierInterface {
    fn verify_vote(env: Env, statement: VoteStatement, proof: Bytes) -> bool;
}
