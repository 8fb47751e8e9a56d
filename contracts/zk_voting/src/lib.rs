#![no_std]

//! # Anonymous Voting
//!
//! Governance voting where eligibility is proven, not shown:
//!
//! - **Voter registry**: each voter commits a leaf hash into a fixed-depth
//!   Merkle tree held in contract storage.
//! - **Proof-gated ballots**: a vote carries a proof that its author knows a
//!   secret under the current root, checked by a separate verifier contract.
//! - **Nullifiers**: one per (voter, proposal), spent on first use, so a
//!   second vote on the same proposal is rejected without learning who voted.
//! - **Quorum**: participation against the registered-voter count, latched
//!   the first time it is met.

pub mod ballot;
pub mod events;
pub mod merkle;
pub mod nullifier;
pub mod proposal;


use common::{check_proof_len, MerkleProof, VoteProof, VoteVerifierClient, MAX_TREE_DEPTH};
use soroban_sdk::{contract, contractimpl, log, Address, Bytes, BytesN, Env, String, Vec};

pub use ballot::{ContractError, DataKey, ProposalId, VotingConfig};
pub use merkle::RegistryVersion;
pub use proposal::{quorum_met, Proposal, ProposalView};

use ballot::{extend_instance_ttl, load_config, set_persistent};

#[contract]
pub struct ZkVotingContract;

#[contractimpl]
impl ZkVotingContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `verifier`         : contract implementing `VoteVerifierInterface`.
    /// * `quorum_threshold` : participation percentage, 0 to 100.
    /// * `tree_depth`       : registry depth; capacity is `2^tree_depth`.
    pub fn initialize(
        env: Env,
        owner: Address,
        verifier: Address,
        quorum_threshold: u32,
        tree_depth: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(ContractError::AlreadyInitialized);
        }
        if quorum_threshold > 100 || tree_depth == 0 || tree_depth > MAX_TREE_DEPTH {
            return Err(ContractError::InvalidConfig);
        }
        owner.require_auth();

        let config = VotingConfig {
            owner,
            verifier,
            quorum_threshold,
            tree_depth,
        };
        merkle::init(&env, tree_depth)?;
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::Initialized, &true);
        extend_instance_ttl(&env);

        Ok(())
    }

    // ── Proposals ─────────────────────────────────────────────────────────────

    /// Open a new proposal. Owner only. Returns the new id.
    pub fn create_proposal(
        env: Env,
        caller: Address,
        title: String,
        description: String,
    ) -> Result<ProposalId, ContractError> {
        let config = load_config(&env)?;
        caller.require_auth();
        if caller != config.owner {
            return Err(ContractError::Unauthorized);
        }
        extend_instance_ttl(&env);

        let proposal = proposal::create(
            &env,
            title,
            description,
            merkle::voter_count(&env),
            config.quorum_threshold,
        );
        events::publish_proposal_created(&env, &proposal);
        if proposal.quorum_reached {
            events::publish_quorum_reached(&env, &proposal);
        }
        Ok(proposal.id)
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Commit `leaf` into the registry on behalf of `voter`.
    ///
    /// The address map only answers `is_voter_registered`; vote checks never
    /// consult it.
    pub fn register_voter(
        env: Env,
        voter: Address,
        leaf: BytesN<32>,
    ) -> Result<RegistryVersion, ContractError> {
        let config = load_config(&env)?;
        voter.require_auth();

        // An all-zero leaf is the empty-slot default and would leave the root unchanged.
        if common::is_zero(&leaf) {
            return Err(ContractError::InvalidLeaf);
        }
        let registered = DataKey::Registered(voter.clone());
        if env.storage().persistent().has(&registered) {
            return Err(ContractError::AlreadyRegistered);
        }

        let version = merkle::insert(&env, config.tree_depth, &leaf)?;
        set_persistent(&env, &registered, &true);
        extend_instance_ttl(&env);

        events::publish_voter_registered(&env, &voter, &version);
        Ok(version)
    }

    // ── Voting ────────────────────────────────────────────────────────────────

    /// Cast a vote from its binary envelope.
    ///
    /// Any envelope that fails to decode, or whose embedded proposal id is
    /// not `proposal_id`, is rejected as `InvalidProof`.
    pub fn vote(env: Env, proposal_id: ProposalId, zk_proof: Bytes) -> Result<ProposalView, ContractError> {
        let config = load_config(&env)?;
        Self::require_proposal(&env, proposal_id)?;

        let proof = VoteProof::decode(&env, &zk_proof).map_err(|_| {
            log!(&env, "malformed vote envelope", proposal_id);
            ContractError::InvalidProof
        })?;
        Self::cast(&env, &config, proposal_id, proof)
    }

    /// Cast a vote from its decoded form.
    ///
    /// The proof is held to the same length bounds as an envelope's.
    pub fn cast_vote(
        env: Env,
        proposal_id: ProposalId,
        proof: VoteProof,
    ) -> Result<ProposalView, ContractError> {
        let config = load_config(&env)?;
        Self::require_proposal(&env, proposal_id)?;
        check_proof_len(proof.proof.len()).map_err(|_| {
            log!(&env, "vote proof length out of bounds", proposal_id, proof.proof.len());
            ContractError::InvalidProof
        })?;
        Self::cast(&env, &config, proposal_id, proof)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn get_proposals(env: Env) -> Vec<ProposalView> {
        proposal::list_all(&env)
    }

    pub fn get_proposal(env: Env, proposal_id: ProposalId) -> Result<ProposalView, ContractError> {
        proposal::load(&env, proposal_id).map(|p| p.view())
    }

    pub fn get_proposal_count(env: Env) -> u64 {
        proposal::count(&env)
    }

    pub fn total_voters(env: Env) -> u64 {
        merkle::voter_count(&env)
    }

    pub fn is_voter_registered(env: Env, voter: Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Registered(voter))
    }

    pub fn voter_merkle_root(env: Env) -> Result<BytesN<32>, ContractError> {
        merkle::current_root(&env)
    }

    pub fn quorum_threshold(env: Env) -> Result<u32, ContractError> {
        load_config(&env).map(|c| c.quorum_threshold)
    }

    /// Whether `total_votes` would meet quorum against today's voter count.
    pub fn check_quorum(env: Env, total_votes: u64) -> Result<bool, ContractError> {
        let config = load_config(&env)?;
        Ok(quorum_met(
            total_votes,
            merkle::voter_count(&env),
            config.quorum_threshold,
        ))
    }

    /// Membership path for `leaf` against the current root.
    pub fn prove_membership(env: Env, leaf: BytesN<32>) -> Result<MerkleProof, ContractError> {
        let config = load_config(&env)?;
        merkle::prove_membership(&env, config.tree_depth, &leaf)
    }

    pub fn is_nullifier_used(env: Env, proposal_id: ProposalId, nullifier: BytesN<32>) -> bool {
        nullifier::is_consumed(&env, proposal_id, &nullifier)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        load_config(&env).map(|c| c.owner)
    }

    pub fn get_config(env: Env) -> Result<VotingConfig, ContractError> {
        load_config(&env)
    }

    pub fn tree_depth(env: Env) -> Result<u32, ContractError> {
        load_config(&env).map(|c| c.tree_depth)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_proposal(env: &Env, proposal_id: ProposalId) -> Result<(), ContractError> {
        if proposal::exists(env, proposal_id) {
            Ok(())
        } else {
            Err(ContractError::UnknownProposal)
        }
    }

    /// Verify, spend the nullifier, tally. Every check precedes the first write.
    fn cast(
        env: &Env,
        config: &VotingConfig,
        proposal_id: ProposalId,
        proof: VoteProof,
    ) -> Result<ProposalView, ContractError> {
        let statement = proof.statement;
        if statement.proposal_id != proposal_id {
            log!(env, "proof bound to another proposal", proposal_id, statement.proposal_id);
            return Err(ContractError::InvalidProof);
        }
        let root = merkle::current_root(env)?;
        if statement.root != root {
            log!(env, "proof built against a stale root", proposal_id);
            return Err(ContractError::InvalidProof);
        }

        let verifier = VoteVerifierClient::new(env, &config.verifier);
        match verifier.try_verify_vote(&statement, &proof.proof) {
            Ok(Ok(true)) => {}
            _ => {
                log!(env, "vote proof rejected", proposal_id);
                return Err(ContractError::InvalidProof);
            }
        }

        nullifier::consume(env, proposal_id, &statement.nullifier)?;
        let outcome = proposal::record_vote(
            env,
            proposal_id,
            statement.choice,
            merkle::voter_count(env),
            config.quorum_threshold,
        )?;
        extend_instance_ttl(env);

        events::publish_vote_cast(env, proposal_id, &statement.nullifier);
        if outcome.quorum_newly_reached {
            events::publish_quorum_reached(env, &outcome.proposal);
        }
        Ok(outcome.proposal.view())
    }
}
