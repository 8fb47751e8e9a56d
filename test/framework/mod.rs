//! # Anonymous Voting Testing Framework
//!
//! A reusable harness for the voting and verifier contracts supporting
//! property-based testing, invariant checking and state exploration.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             TestEnv, VotingHarness, snapshots
//! ├── generators.rs      proptest strategies for configs and actions
//! ├── invariants.rs      state and transition invariants
//! └── state_explorer.rs  action-sequence execution with invariant checks
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{TestEnv, VotingHarness};
//!
//! let env = TestEnv::new();
//! let harness = VotingHarness::new(&env, 50, 8);
//! let alice = harness.enroll(b"alice").unwrap();
//! let p0 = harness.propose("P0");
//! let proof = harness.ballot(&alice, p0, VoteChoice::For).unwrap();
//! harness.cast(p0, &proof).unwrap();
//! ```

extern crate std;


use core::fmt::Debug;

use common::{VoteChoice, VoteProof};
use soroban_sdk::{
    testutils::Address as _,
    Address, Bytes, BytesN, Env, String,
};
use zk_prover::{VoteProver, VoterIdentity};
use zk_verifier::{ZkVerifierContract, ZkVerifierContractClient};
use zk_voting::{ContractError, ProposalView, RegistryVersion, ZkVotingContract, ZkVotingContractClient};

// ── Core Test Environment ────────────────────────────────────────────────────

/// The Soroban `Env` every harness in a test shares.
pub struct TestEnv {
    pub env: Env,
}

impl TestEnv {
    /// All auth mocked and no CPU budget cap; Merkle paths hash a lot.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        #[allow(deprecated)]
        env.budget().reset_unlimited();
        Self { env }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse a generated `try_*` result into the contract's own error type.
///
/// Conversion and host failures are framework bugs, not contract outcomes,
/// so they panic.
pub fn settle<T, C: Debug, I: Debug>(
    result: Result<Result<T, C>, Result<ContractError, I>>,
) -> Result<T, ContractError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(err)) => Err(err),
        Ok(Err(conv)) => panic!("return value conversion failed: {:?}", conv),
        Err(Err(host)) => panic!("host error: {:?}", host),
    }
}

// ── Voting Harness ───────────────────────────────────────────────────────────

/// A verifier and a voting contract wired together, plus a prover bound to
/// the verifier's circuit id.
pub struct VotingHarness<'a> {
    pub env: &'a TestEnv,
    pub voting: ZkVotingContractClient<'static>,
    pub verifier: ZkVerifierContractClient<'static>,
    pub owner: Address,
    pub verifier_admin: Address,
    pub prover: VoteProver,
}

impl<'a> VotingHarness<'a> {
    pub const CIRCUIT_ID: [u8; 32] = [0xC1; 32];

    pub fn new(env: &'a TestEnv, quorum_threshold: u32, tree_depth: u32) -> Self {
        let e = &env.env;
        let circuit_id = BytesN::from_array(e, &Self::CIRCUIT_ID);

        let verifier_id = e.register(ZkVerifierContract, ());
        let verifier = ZkVerifierContractClient::new(e, &verifier_id);
        let verifier_admin = Address::generate(e);
        verifier.initialize(&verifier_admin, &circuit_id);

        let voting_id = e.register(ZkVotingContract, ());
        let voting = ZkVotingContractClient::new(e, &voting_id);
        let owner = Address::generate(e);
        voting.initialize(&owner, &verifier_id, &quorum_threshold, &tree_depth);

        Self {
            env,
            voting,
            verifier,
            owner,
            verifier_admin,
            prover: VoteProver::new(e, circuit_id),
        }
    }

    pub fn identity(&self, seed: &[u8]) -> VoterIdentity {
        VoterIdentity::from_entropy(&self.env.env, seed)
    }

    /// Register `identity`'s leaf from a fresh address.
    pub fn register(&self, identity: &VoterIdentity) -> Result<RegistryVersion, ContractError> {
        let voter = Address::generate(&self.env.env);
        settle(
            self.voting
                .try_register_voter(&voter, &identity.leaf(&self.env.env)),
        )
    }

    /// Derive an identity from `seed` and register it.
    pub fn enroll(&self, seed: &[u8]) -> Result<VoterIdentity, ContractError> {
        let identity = self.identity(seed);
        self.register(&identity)?;
        Ok(identity)
    }

    pub fn propose(&self, title: &str) -> u64 {
        let e = &self.env.env;
        self.voting.create_proposal(
            &self.owner,
            &String::from_str(e, title),
            &String::from_str(e, ""),
        )
    }

    /// A proof for `identity` against the current root.
    ///
    /// Fails with `NotFound` when the identity is not registered.
    pub fn ballot(
        &self,
        identity: &VoterIdentity,
        proposal_id: u64,
        choice: VoteChoice,
    ) -> Result<VoteProof, ContractError> {
        let e = &self.env.env;
        let path = settle(self.voting.try_prove_membership(&identity.leaf(e)))?;
        let root = self.voting.voter_merkle_root();
        Ok(self
            .prover
            .prove(identity, proposal_id, choice, &root, &path)
            .expect("registry path must recompute to its own root"))
    }

    pub fn cast(&self, proposal_id: u64, proof: &VoteProof) -> Result<ProposalView, ContractError> {
        settle(self.voting.try_cast_vote(&proposal_id, proof))
    }

    pub fn cast_envelope(&self, proposal_id: u64, envelope: &Bytes) -> Result<ProposalView, ContractError> {
        settle(self.voting.try_vote(&proposal_id, envelope))
    }

    /// Snapshot of all observable voting state.
    ///
    /// `probes` lists the (proposal, nullifier) pairs whose spent status is
    /// recorded.
    pub fn snapshot(&self, probes: &[(u64, BytesN<32>)]) -> VotingSnapshot {
        let proposals: std::vec::Vec<ProposalView> = self.voting.get_proposals().iter().collect();
        let spent = probes
            .iter()
            .map(|(id, n)| ((*id, n.clone()), self.voting.is_nullifier_used(id, n)))
            .collect();

        VotingSnapshot {
            voter_count: self.voting.total_voters(),
            root: self.voting.voter_merkle_root(),
            quorum_threshold: self.voting.quorum_threshold(),
            proposals,
            spent,
        }
    }
}

/// Immutable snapshot of voting contract state at a point in time.
#[derive(Debug, Clone)]
pub struct VotingSnapshot {
    pub voter_count: u64,
    pub root: BytesN<32>,
    pub quorum_threshold: u32,
    pub proposals: std::vec::Vec<ProposalView>,
    pub spent: std::vec::Vec<((u64, BytesN<32>), bool)>,
}

impl VotingSnapshot {
    pub fn total_votes(&self, proposal_id: u64) -> u64 {
        self.proposals
            .iter()
            .find(|p| p.id == proposal_id)
            .map(|p| p.for_count + p.against_count)
            .unwrap_or(0)
    }

    /// Spent probes recorded for one proposal.
    pub fn spent_count(&self, proposal_id: u64) -> u64 {
        self.spent
            .iter()
            .filter(|((id, _), used)| *id == proposal_id && *used)
            .count() as u64
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action, used by the state explorer.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Ok,
    /// The contract rejected the action with this error code.
    ExpectedError(u32),
    UnexpectedError(std::string::String),
}

impl ActionOutcome {
    pub fn from_result<T>(result: Result<T, ContractError>) -> Self {
        match result {
            Ok(_) => ActionOutcome::Ok,
            Err(e) => ActionOutcome::ExpectedError(e as u32),
        }
    }
}

/// Counters and violations collected over one exploration run.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    /// Fraction of `total_entry_points` the run touched.
    pub fn entry_point_coverage(&self, total_entry_points: usize) -> f64 {
        if total_entry_points == 0 {
            return 0.0;
        }
        self.entry_points_hit.len() as f64 / total_entry_points as f64
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
