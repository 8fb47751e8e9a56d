#![no_std]

pub mod events;
pub mod verifier;

pub use verifier::{AttestationVerifier, ProofValidationError, ZkVerifier};

use common::{is_zero, VoteStatement};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Bytes, BytesN, Env, Symbol};

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CIRCUIT: Symbol = symbol_short!("CIRCUIT");

/// Errors returned by the admin surface. `verify_vote` never errors.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1001,
    NotInitialized = 1002,
    InvalidInput = 1003,
    Unauthorized = 1005,
}

/// The backend this deployment runs.
pub type ActiveBackend = AttestationVerifier;

#[contract]
pub struct ZkVerifierContract;

#[contractimpl]
impl ZkVerifierContract {
    /// Initialize the verifier with its admin and the circuit id proofs are bound to.
    pub fn initialize(env: Env, admin: Address, circuit_id: BytesN<32>) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if is_zero(&circuit_id) {
            return Err(ContractError::InvalidInput);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&CIRCUIT, &circuit_id);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, admin, circuit_id);
        Ok(())
    }

    /// Check a vote proof against its public inputs.
    ///
    /// Read-only: returns `false` for every rejection, including an
    /// uninitialised verifier, so callers never see a partial failure.
    pub fn verify_vote(env: Env, statement: VoteStatement, proof: Bytes) -> bool {
        let circuit_id: Option<BytesN<32>> = env.storage().instance().get(&CIRCUIT);
        match circuit_id {
            Some(circuit_id) => ActiveBackend::verify(&env, &circuit_id, &statement, &proof),
            None => false,
        }
    }

    /// Replace the circuit id. Admin only.
    pub fn set_circuit_id(
        env: Env,
        caller: Address,
        circuit_id: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;
        if is_zero(&circuit_id) {
            return Err(ContractError::InvalidInput);
        }

        let old = Self::get_circuit_id(env.clone())?;
        env.storage().instance().set(&CIRCUIT, &circuit_id);
        events::publish_circuit_rotated(&env, caller, old, circuit_id);
        Ok(())
    }

    pub fn get_circuit_id(env: Env) -> Result<BytesN<32>, ContractError> {
        env.storage()
            .instance()
            .get(&CIRCUIT)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        caller.require_auth();
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }
}
