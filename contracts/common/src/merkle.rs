//! Membership paths for the voter registry tree.
//!
//! A [`MerkleProof`] lists one [`PathElement`] per level, ordered from the
//! leaf upwards. `side` records where the sibling sits relative to the node
//! being folded, so recomputation needs no separate index bits.

use soroban_sdk::{contracttype, BytesN, Env, Vec};

use crate::hashing::{hash_pair, NodeHash};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathElement {
    pub sibling: NodeHash,
    pub side: Side,
}

/// Sibling path from a registered leaf to the registry root.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MerkleProof {
    /// Insertion position of the leaf (0-based).
    pub leaf_index: u64,
    pub path: Vec<PathElement>,
}

/// Fold `leaf` up through `path` and return the resulting root.
pub fn compute_root(env: &Env, leaf: &NodeHash, path: &Vec<PathElement>) -> NodeHash {
    let mut current = leaf.clone();
    for element in path.iter() {
        current = match element.side {
            Side::Left => hash_pair(env, &element.sibling, &current),
            Side::Right => hash_pair(env, &current, &element.sibling),
        };
    }
    current
}

pub fn verify_membership(
    env: &Env,
    root: &BytesN<32>,
    leaf: &NodeHash,
    proof: &MerkleProof,
) -> bool {
    &compute_root(env, leaf, &proof.path) == root
}

/// Side bit for the sibling of the node at `index` on any level.
pub fn sibling_side(index: u64) -> Side {
    if index % 2 == 0 {
        Side::Right
    } else {
        Side::Left
    }
}
