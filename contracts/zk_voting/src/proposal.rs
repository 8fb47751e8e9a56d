//! Proposal types, storage, and tally/quorum bookkeeping.

use common::VoteChoice;
use soroban_sdk::{contracttype, Env, String, Vec};

use crate::ballot::{set_persistent, ContractError, DataKey, ProposalId};

/// The full on-chain proposal record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub for_count: u64,
    pub against_count: u64,
    /// Latched: once quorum is reached it stays reached.
    pub quorum_reached: bool,
    pub created_at: u64,
}

/// What view functions return to clients.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalView {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub for_count: u64,
    pub against_count: u64,
    pub quorum_reached: bool,
}

impl Proposal {
    pub fn total_votes(&self) -> u64 {
        self.for_count.saturating_add(self.against_count)
    }

    pub fn view(&self) -> ProposalView {
        ProposalView {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            for_count: self.for_count,
            against_count: self.against_count,
            quorum_reached: self.quorum_reached,
        }
    }
}

/// Result of `record_vote`.
pub(crate) struct VoteOutcome {
    pub proposal: Proposal,
    /// True only on the vote that moved the proposal into quorum.
    pub quorum_newly_reached: bool,
}

// ── Quorum ───────────────────────────────────────────────────────────────────

/// `total_votes * 100 >= registered_voters * threshold`, in u128 so neither
/// side can overflow.
pub fn quorum_met(total_votes: u64, registered_voters: u64, threshold: u32) -> bool {
    (total_votes as u128) * 100 >= (registered_voters as u128) * (threshold as u128)
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub fn count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProposalCount)
        .unwrap_or(0u64)
}

pub fn exists(env: &Env, id: ProposalId) -> bool {
    id < count(env)
}

pub fn load(env: &Env, id: ProposalId) -> Result<Proposal, ContractError> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(id))
        .ok_or(ContractError::UnknownProposal)
}

fn store(env: &Env, proposal: &Proposal) {
    set_persistent(env, &DataKey::Proposal(proposal.id), proposal);
}

/// Append a proposal with zero counts. Ids are sequential from 0.
///
/// The quorum flag starts as `quorum_met(0, ..)`, which holds for a zero
/// threshold or an empty registry.
pub(crate) fn create(
    env: &Env,
    title: String,
    description: String,
    registered_voters: u64,
    threshold: u32,
) -> Proposal {
    let id = count(env);
    let proposal = Proposal {
        id,
        title,
        description,
        for_count: 0,
        against_count: 0,
        quorum_reached: quorum_met(0, registered_voters, threshold),
        created_at: env.ledger().timestamp(),
    };
    store(env, &proposal);
    env.storage()
        .instance()
        .set(&DataKey::ProposalCount, &id.saturating_add(1));
    proposal
}

pub(crate) fn record_vote(
    env: &Env,
    id: ProposalId,
    choice: VoteChoice,
    registered_voters: u64,
    threshold: u32,
) -> Result<VoteOutcome, ContractError> {
    let mut proposal = load(env, id)?;
    match choice {
        VoteChoice::For => proposal.for_count = proposal.for_count.saturating_add(1),
        VoteChoice::Against => {
            proposal.against_count = proposal.against_count.saturating_add(1)
        }
    }

    let was_reached = proposal.quorum_reached;
    proposal.quorum_reached =
        was_reached || quorum_met(proposal.total_votes(), registered_voters, threshold);
    store(env, &proposal);

    Ok(VoteOutcome {
        quorum_newly_reached: proposal.quorum_reached && !was_reached,
        proposal,
    })
}

/// Every proposal in creation order. A fresh read on each call.
pub fn list_all(env: &Env) -> Vec<ProposalView> {
    let mut out = Vec::new(env);
    for id in 0..count(env) {
        if let Ok(p) = load(env, id) {
            out.push_back(p.view());
        }
    }
    out
}
