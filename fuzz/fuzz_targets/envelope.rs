#![no_main]

use common::VoteProof;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{Bytes, Env};

// Any input that decodes must re-encode to exactly the same bytes.
fuzz_target!(|data: &[u8]| {
    let env = Env::default();
    let bytes = Bytes::from_slice(&env, data);
    if let Ok(proof) = VoteProof::decode(&env, &bytes) {
        let encoded = proof.encode(&env).expect("decoded envelope must re-encode");
        assert_eq!(encoded, bytes);
    }
});
