#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

/// Fired once when the verifier is initialised.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifierInitializedEvent {
    pub admin: Address,
    pub circuit_id: BytesN<32>,
    pub timestamp: u64,
}

/// Fired when the admin replaces the circuit id.
/// Proofs generated against `old_circuit_id` stop verifying from here on.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CircuitRotatedEvent {
    pub admin: Address,
    pub old_circuit_id: BytesN<32>,
    pub new_circuit_id: BytesN<32>,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, circuit_id: BytesN<32>) {
    env.events().publish(
        (symbol_short!("VFY_INIT"), admin.clone()),
        VerifierInitializedEvent {
            admin,
            circuit_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_circuit_rotated(
    env: &Env,
    admin: Address,
    old_circuit_id: BytesN<32>,
    new_circuit_id: BytesN<32>,
) {
    env.events().publish(
        (symbol_short!("CIRC_ROT"), admin.clone()),
        CircuitRotatedEvent {
            admin,
            old_circuit_id,
            new_circuit_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}
