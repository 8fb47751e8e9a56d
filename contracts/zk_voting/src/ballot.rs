use soroban_sdk::{contracterror, contracttype, Address, BytesN, Env};

pub type ProposalId = u64;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Config,
    /// Default subtree hashes, one per level.
    Zeros,
    Root,
    LeafCount,
    /// leaf -> insertion index
    Leaf(BytesN<32>),
    /// (level, index) -> node hash; level 0 holds the leaves
    Node(u32, u64),
    Registered(Address),
    ProposalCount,
    Proposal(ProposalId),
    Nullifier(ProposalId, BytesN<32>),
}

/// Deploy-time configuration. Immutable after `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotingConfig {
    /// The only principal allowed to create proposals.
    pub owner: Address,
    /// Contract implementing `VoteVerifierInterface`.
    pub verifier: Address,
    /// Participation percentage (0–100) needed for quorum.
    pub quorum_threshold: u32,
    pub tree_depth: u32,
}

/// # Code ranges
/// | Range   | Purpose                    |
/// |---------|----------------------------|
/// | 1 – 9   | Lifecycle / configuration  |
/// | 10 – 19 | Authorisation              |
/// | 20 – 29 | Voter registry             |
/// | 30 – 39 | Voting                     |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized     = 1,
    AlreadyInitialized = 2,
    InvalidConfig      = 3,
    Unauthorized       = 10,
    AlreadyRegistered  = 20,
    CapacityExceeded   = 21,
    NotFound           = 22,
    InvalidLeaf        = 23,
    InvalidProof       = 30,
    AlreadyVoted       = 31,
    UnknownProposal    = 32,
}

// TTL: ~60 days at 5s/ledger
pub(crate) const TTL_THRESHOLD: u32 = 1_036_800;
pub(crate) const TTL_EXTEND_TO: u32 = 2_073_600;

pub(crate) fn set_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load_config(env: &Env) -> Result<VotingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}
