//! Voter registry: an append-only, fixed-depth Merkle tree in contract storage.
//!
//! Nodes are stored sparsely under `DataKey::Node(level, index)`. A node that
//! was never written belongs to an empty subtree and reads as the default
//! hash for its level, so the root is defined before the first registration
//! and both insertion and path generation touch exactly `depth` levels.

use common::{hash_pair, sibling_side, zero_hashes, MerkleProof, NodeHash, PathElement};
use soroban_sdk::{contracttype, log, Env, Vec};

use crate::ballot::{set_persistent, ContractError, DataKey};

/// Registry state after a successful registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryVersion {
    pub root: NodeHash,
    pub voter_count: u64,
}

pub fn capacity(depth: u32) -> u64 {
    1u64 << depth
}

/// Seed the default hashes and the empty root. Called once from `initialize`.
pub(crate) fn init(env: &Env, depth: u32) -> Result<(), ContractError> {
    let zeros = zero_hashes(env, depth);
    let empty_root = zeros.last().ok_or(ContractError::InvalidConfig)?;
    env.storage().instance().set(&DataKey::Zeros, &zeros);
    env.storage().instance().set(&DataKey::Root, &empty_root);
    env.storage().instance().set(&DataKey::LeafCount, &0u64);
    Ok(())
}

pub fn current_root(env: &Env) -> Result<NodeHash, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Root)
        .ok_or(ContractError::NotInitialized)
}

pub fn voter_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LeafCount)
        .unwrap_or(0u64)
}

pub fn contains(env: &Env, leaf: &NodeHash) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Leaf(leaf.clone()))
}

fn zeros(env: &Env) -> Result<Vec<NodeHash>, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Zeros)
        .ok_or(ContractError::NotInitialized)
}

fn node(env: &Env, zeros: &Vec<NodeHash>, level: u32, index: u64) -> Result<NodeHash, ContractError> {
    if let Some(hash) = env.storage().persistent().get(&DataKey::Node(level, index)) {
        return Ok(hash);
    }
    zeros.get(level).ok_or(ContractError::NotInitialized)
}

/// Append `leaf` at the next free index and recompute the root bottom-up.
///
/// All checks run before the first write, so a failed call leaves the root
/// and the count untouched.
pub(crate) fn insert(env: &Env, depth: u32, leaf: &NodeHash) -> Result<RegistryVersion, ContractError> {
    if contains(env, leaf) {
        return Err(ContractError::AlreadyRegistered);
    }
    let index = voter_count(env);
    if index >= capacity(depth) {
        log!(env, "registry full", depth, index);
        return Err(ContractError::CapacityExceeded);
    }
    let zeros = zeros(env)?;

    // Collect the new path first; siblings are read from the pre-insert tree.
    let mut updates: Vec<NodeHash> = Vec::new(env);
    let mut current = leaf.clone();
    let mut idx = index;
    for level in 0..depth {
        let sibling = node(env, &zeros, level, idx ^ 1)?;
        current = if idx % 2 == 0 {
            hash_pair(env, &current, &sibling)
        } else {
            hash_pair(env, &sibling, &current)
        };
        updates.push_back(current.clone());
        idx /= 2;
    }

    set_persistent(env, &DataKey::Node(0, index), leaf);
    let mut idx = index;
    for level in 0..depth {
        idx /= 2;
        if let Some(hash) = updates.get(level) {
            set_persistent(env, &DataKey::Node(level + 1, idx), &hash);
        }
    }
    set_persistent(env, &DataKey::Leaf(leaf.clone()), &index);

    let voter_count = index + 1;
    env.storage().instance().set(&DataKey::Root, &current);
    env.storage().instance().set(&DataKey::LeafCount, &voter_count);

    Ok(RegistryVersion {
        root: current,
        voter_count,
    })
}

/// Sibling path for a registered leaf, ordered leaf → root.
pub fn prove_membership(env: &Env, depth: u32, leaf: &NodeHash) -> Result<MerkleProof, ContractError> {
    let leaf_index: u64 = env
        .storage()
        .persistent()
        .get(&DataKey::Leaf(leaf.clone()))
        .ok_or(ContractError::NotFound)?;
    let zeros = zeros(env)?;

    let mut path: Vec<PathElement> = Vec::new(env);
    let mut idx = leaf_index;
    for level in 0..depth {
        path.push_back(PathElement {
            sibling: node(env, &zeros, level, idx ^ 1)?,
            side: sibling_side(idx),
        });
        idx /= 2;
    }

    Ok(MerkleProof { leaf_index, path })
}
