//! Domain-separated hashing.
//!
//! | Kind       | Pre-image                                   | Function  |
//! |------------|---------------------------------------------|-----------|
//! | Leaf       | `"zkv:leaf" ‖ secret`                       | SHA-256   |
//! | Nullifier  | `"zkv:nullifier" ‖ secret ‖ proposal_id_be` | SHA-256   |
//! | Node       | `left[32] ‖ right[32]`                      | Keccak256 |
//! | Empty leaf | `[0u8; 32]`                                 | n/a       |
//!
//! Leaves and nullifiers use distinct prefixes so a leaf can never collide
//! with a nullifier derived from the same secret.

use soroban_sdk::{Bytes, BytesN, Env, Vec};

pub const LEAF_DOMAIN: &[u8] = b"zkv:leaf";
pub const NULLIFIER_DOMAIN: &[u8] = b"zkv:nullifier";

pub type NodeHash = BytesN<32>;

/// Commitment to a voter secret; this is what the registry stores.
pub fn voter_leaf(env: &Env, secret: &BytesN<32>) -> NodeHash {
    let mut data = Bytes::from_slice(env, LEAF_DOMAIN);
    data.extend_from_array(&secret.to_array());
    env.crypto().sha256(&data).into()
}

/// One-way tag for `(secret, proposal_id)`.
///
/// Stable for a given pair, so a second vote on the same proposal reproduces
/// it, while votes on other proposals yield unrelated values.
pub fn derive_nullifier(env: &Env, secret: &BytesN<32>, proposal_id: u64) -> BytesN<32> {
    let mut data = Bytes::from_slice(env, NULLIFIER_DOMAIN);
    data.extend_from_array(&secret.to_array());
    data.extend_from_array(&proposal_id.to_be_bytes());
    env.crypto().sha256(&data).into()
}

pub fn hash_pair(env: &Env, left: &NodeHash, right: &NodeHash) -> NodeHash {
    let mut combined = Bytes::new(env);
    combined.extend_from_array(&left.to_array());
    combined.extend_from_array(&right.to_array());
    env.crypto().keccak256(&combined).into()
}

/// Default hash of an empty subtree at every level `0..=depth`.
///
/// `zeros[0]` is the empty leaf and `zeros[depth]` is the root of a tree
/// with no registrations.
pub fn zero_hashes(env: &Env, depth: u32) -> Vec<NodeHash> {
    let mut zeros: Vec<NodeHash> = Vec::new(env);
    let mut current = BytesN::from_array(env, &[0u8; 32]);
    zeros.push_back(current.clone());
    for _ in 0..depth {
        current = hash_pair(env, &current, &current);
        zeros.push_back(current.clone());
    }
    zeros
}

pub fn is_zero(hash: &BytesN<32>) -> bool {
    hash.to_array().iter().all(|&b| b == 0)
}
