//! Shared protocol primitives for the anonymous voting contracts.
//!
//! This crate provides:
//! - [`hashing`]: domain-separated leaf, nullifier and tree-node hashes.
//! - [`merkle`]: membership path types and root recomputation.
//! - [`statement`]: the public inputs a vote proof is checked against.
//! - [`envelope`]: the versioned binary wire format for vote proofs.
//! - [`interface`]: the cross-contract interface every proof verifier exposes.
//!
//! The voting contract, the verifier contract and the client-side prover all
//! build on these definitions so that the three agree byte-for-byte.

#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod envelope;
pub mod hashing;
pub mod interface;
pub mod merkle;
pub mod statement;

pub use envelope::*;
pub use hashing::*;
pub use interface::*;
pub use merkle::*;
pub use statement::*;

/// Deepest tree a registry may be configured with (2^32 voters).
pub const MAX_TREE_DEPTH: u32 = 32;

/// Depth used when a deployment does not pick one (~1M voters).
pub const DEFAULT_TREE_DEPTH: u32 = 20;
