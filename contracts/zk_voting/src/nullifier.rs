//! Per-proposal ledger of spent nullifiers.

use soroban_sdk::{log, BytesN, Env};

use crate::ballot::{set_persistent, ContractError, DataKey, ProposalId};

pub fn is_consumed(env: &Env, proposal_id: ProposalId, nullifier: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Nullifier(proposal_id, nullifier.clone()))
}

/// Check-and-insert. On `AlreadyVoted` nothing is written.
pub(crate) fn consume(
    env: &Env,
    proposal_id: ProposalId,
    nullifier: &BytesN<32>,
) -> Result<(), ContractError> {
    if is_consumed(env, proposal_id, nullifier) {
        log!(env, "nullifier already spent", proposal_id);
        return Err(ContractError::AlreadyVoted);
    }
    set_persistent(
        env,
        &DataKey::Nullifier(proposal_id, nullifier.clone()),
        &true,
    );
    Ok(())
}
