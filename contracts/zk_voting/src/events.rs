//! Structured event publishing for the voting contract.
//!
//! Vote events carry the nullifier only. No address or secret ever reaches
//! the event stream from `cast_vote`.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

use crate::merkle::RegistryVersion;
use crate::proposal::Proposal;

pub fn publish_proposal_created(env: &Env, proposal: &Proposal) {
    env.events().publish(
        (symbol_short!("PROP_NEW"), proposal.id),
        (proposal.title.clone(), proposal.description.clone()),
    );
}

pub fn publish_voter_registered(env: &Env, voter: &Address, version: &RegistryVersion) {
    env.events().publish(
        (symbol_short!("VOTER_REG"), voter.clone()),
        version.clone(),
    );
}

pub fn publish_vote_cast(env: &Env, proposal_id: u64, nullifier: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("VOTE_CAST"), proposal_id), nullifier.clone());
}

pub fn publish_quorum_reached(env: &Env, proposal: &Proposal) {
    env.events().publish(
        (symbol_short!("QUORUM"), proposal.id),
        proposal.total_votes(),
    );
}
