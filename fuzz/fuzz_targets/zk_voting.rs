#![no_main]

use arbitrary::Arbitrary;
use common::VoteChoice;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Bytes, BytesN, Env, String};
use zk_prover::{VoteProver, VoterIdentity};
use zk_verifier::{ZkVerifierContract, ZkVerifierContractClient};
use zk_voting::{quorum_met, ZkVotingContract, ZkVotingContractClient};

const POOL: usize = 6;

/// Actions covering every mutating voting entry point.
///
/// Voter and proposal selectors are reduced modulo small ranges so that most
/// inputs reach the proof and nullifier checks instead of bouncing off lookups.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Register { voter: u8 },
    Propose,
    Vote { voter: u8, proposal: u8, against: bool },
    /// A valid ballot with one proof byte flipped.
    Corrupt { voter: u8, proposal: u8, index: u8 },
    /// Raw bytes straight into `vote`.
    Envelope { proposal: u8, bytes: Vec<u8> },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let circuit = BytesN::from_array(&env, &[0xC1; 32]);
    let verifier_id = env.register(ZkVerifierContract, ());
    ZkVerifierContractClient::new(&env, &verifier_id)
        .initialize(&Address::generate(&env), &circuit);

    let owner = Address::generate(&env);
    let client = ZkVotingContractClient::new(&env, &env.register(ZkVotingContract, ()));
    if client
        .try_initialize(&owner, &verifier_id, &50u32, &3u32)
        .is_err()
    {
        return;
    }

    let prover = VoteProver::new(&env, circuit);
    let pool: Vec<VoterIdentity> = (0..POOL as u8)
        .map(|i| VoterIdentity::from_entropy(&env, &[i]))
        .collect();

    for action in actions {
        let count_before = client.total_voters();
        let root_before = client.voter_merkle_root();
        let proposals = client.get_proposal_count();
        let pick = |raw: u8| (raw as u64) % (proposals + 1);

        match action {
            FuzzAction::Register { voter } => {
                let identity = &pool[voter as usize % POOL];
                let _ = client.try_register_voter(&Address::generate(&env), &identity.leaf(&env));
            }
            FuzzAction::Propose => {
                let _ = client.try_create_proposal(
                    &owner,
                    &String::from_str(&env, "fuzz"),
                    &String::from_str(&env, ""),
                );
            }
            FuzzAction::Vote { voter, proposal, against } => {
                let identity = &pool[voter as usize % POOL];
                let id = pick(proposal);
                let choice = if against { VoteChoice::Against } else { VoteChoice::For };
                if let Ok(Ok(path)) = client.try_prove_membership(&identity.leaf(&env)) {
                    if let Ok(proof) = prover.prove(identity, id, choice, &root_before, &path) {
                        let _ = client.try_cast_vote(&id, &proof);
                    }
                }
            }
            FuzzAction::Corrupt { voter, proposal, index } => {
                let identity = &pool[voter as usize % POOL];
                let id = pick(proposal);
                if let Ok(Ok(path)) = client.try_prove_membership(&identity.leaf(&env)) {
                    if let Ok(mut proof) =
                        prover.prove(identity, id, VoteChoice::For, &root_before, &path)
                    {
                        let at = index as u32 % proof.proof.len();
                        if let Some(byte) = proof.proof.get(at) {
                            proof.proof.set(at, byte ^ 0x01);
                        }
                        assert!(
                            client.try_cast_vote(&id, &proof).is_err(),
                            "INVARIANT VIOLATION: corrupted proof accepted"
                        );
                    }
                }
            }
            FuzzAction::Envelope { proposal, bytes } => {
                let id = pick(proposal);
                let _ = client.try_vote(&id, &Bytes::from_slice(&env, &bytes));
            }
        }

        // ── Post-action invariant checks ──
        let voters = client.total_voters();
        assert!(voters >= count_before, "INVARIANT VIOLATION: voter count decreased");
        assert_eq!(
            voters != count_before,
            client.voter_merkle_root() != root_before,
            "INVARIANT VIOLATION: root moved without a registration or vice versa"
        );

        for view in client.get_proposals().iter() {
            let total = view.for_count + view.against_count;
            assert!(total <= voters, "INVARIANT VIOLATION: tally exceeds electorate");
            if quorum_met(total, voters, 50) {
                assert!(view.quorum_reached, "INVARIANT VIOLATION: quorum flag unset");
            }
        }
    }
});
