// Path: crates/template/src/post/tests/mod.rs
use super::*;
use proptest::prelude::*;
use std::sync::Mutex;
use vesta_api::crypto::SigningKeyPair;
use vesta_api::proof::PostVerifyResponse;
use vesta_crypto::algorithms::hash::sha256;
use vesta_crypto::sign::eddsa::Ed25519KeyPair;
use vesta_types::app::{PostCandidates, PostProof, TxInput};

/// What the engine handed to the verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordedCall {
    sector_size: u64,
    challenge_count: u64,
    randomness: [u8; 32],
    sector_ids: [u8; 8],
    proof_head: u8,
    candidates_head: u8,
}

struct RecordingVerifier {
    response: PostVerifyResponse,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingVerifier {
    fn answering(response: PostVerifyResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl PostVerifier for RecordingVerifier {
    fn verify_post(&self, request: &PostVerifyRequest<'_>) -> PostVerifyResponse {
        self.calls.lock().unwrap().push(RecordedCall {
            sector_size: request.sector_size,
            challenge_count: request.challenge_count,
            randomness: request.randomness.0,
            sector_ids: request.sector_ids.0,
            proof_head: request.proof.0[0],
            candidates_head: request.candidates.0[0],
        });
        self.response.clone()
    }
}

struct Parties {
    business: Ed25519KeyPair,
    customer: Ed25519KeyPair,
}

fn parties() -> Parties {
    Parties {
        business: Ed25519KeyPair::generate().unwrap(),
        customer: Ed25519KeyPair::generate().unwrap(),
    }
}

fn post_base() -> PostBase {
    PostBase {
        sector_ids: SectorIds(42u64.to_le_bytes()),
        comm_r: CommR([0x11; 32]),
        prover_id: ProverId([0x22; 32]),
    }
}

/// begin 100, cycle 50, total 300, price 100: three installments, height_max 250.
fn fixture(parties: &Parties) -> PostTemplate {
    PostTemplate::new(PostParams {
        business: Destination::from_pubkey(parties.business.public_key().to_array()),
        customer: Destination::from_pubkey(parties.customer.public_key().to_array()),
        height_begin: 100,
        height_cycle: 50,
        total: 300,
        price: 100,
        post_base: post_base(),
    })
}

fn with_schedule(height_cycle: u32, total: u64, price: u64) -> PostTemplate {
    PostTemplate::new(PostParams {
        business: Destination::from_pubkey([1; 32]),
        customer: Destination::from_pubkey([2; 32]),
        height_begin: 10,
        height_cycle,
        total,
        price,
        post_base: post_base(),
    })
}

fn spend_tx() -> Transaction {
    let attachment = PostAttachment {
        proof: PostProof([0x33; 384]),
        candidates: PostCandidates([0x44; 160]),
    };
    Transaction {
        inputs: vec![TxInput {
            prev_txid: [9; 32],
            n: 0,
        }],
        amount: 90,
        fee: 10,
        data: attachment.to_tx_data(0x5a),
        ..Default::default()
    }
}

const BLOCK_HASH: Hash32 = [0xab; 32];

#[test]
fn test_encoding_has_canonical_length_and_id() {
    let template = fixture(&parties());
    let bytes = template.canonical_bytes();
    assert_eq!(bytes.len(), POST_TEMPLATE_DATA_LEN);
    assert_eq!(POST_TEMPLATE_DATA_LEN, 164);

    let mut preimage = TemplateType::Post.tag().to_le_bytes().to_vec();
    preimage.extend_from_slice(bytes);
    assert_eq!(template.id().content_hash, sha256(&preimage));
    assert_eq!(template.id().type_tag, 8);
    assert_eq!(&template.address().data[..2], &[8, 0]);
}

#[test]
fn test_decode_round_trips_fields_and_id() {
    let template = fixture(&parties());
    let decoded = PostTemplate::from_bytes(template.canonical_bytes()).unwrap();
    assert_eq!(decoded.params(), template.params());
    assert_eq!(decoded.id(), template.id());
    assert_eq!(decoded, template);
}

#[test]
fn test_decode_ignores_trailing_bytes() {
    let template = fixture(&parties());
    let mut bytes = template.canonical_bytes().to_vec();
    bytes.extend_from_slice(&[1, 2, 3]);

    let decoded = PostTemplate::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.canonical_bytes().len(), POST_TEMPLATE_DATA_LEN);
    assert_eq!(decoded.id(), template.id());
}

#[test]
fn test_decode_rejects_bad_post_base_and_truncation() {
    let template = fixture(&parties());
    let bytes = template.canonical_bytes().to_vec();

    assert!(matches!(
        PostTemplate::from_bytes(&bytes[..POST_TEMPLATE_DATA_LEN - 1]),
        Err(TemplateError::Decode(_))
    ));

    // Compact prefix of the post_base vector sits right after the schedule.
    let prefix_at = POST_TEMPLATE_DATA_LEN - POST_BASE_LEN - 2;
    assert_eq!(&bytes[prefix_at..prefix_at + 2], &[0x21, 0x01]);
    let mut short_base = bytes.clone();
    short_base[prefix_at] = 0x1d; // 71 bytes
    assert!(PostTemplate::from_bytes(&short_base).is_err());

    assert!(PostTemplate::from_bytes(&[]).is_err());
}

#[test]
fn test_set_template_data_is_all_or_nothing() {
    let p = parties();
    let source = fixture(&p);
    let mut target = with_schedule(31, 300, 100);
    let before = target.clone();

    assert!(target.set_template_data(&[0u8; 10]).is_err());
    assert_eq!(target, before);

    target.set_template_data(source.canonical_bytes()).unwrap();
    assert_eq!(target.id(), source.id());
    assert_eq!(target.params(), source.params());
}

#[test]
fn test_validate_params() {
    assert!(!with_schedule(30, 300, 100).validate_params());
    assert!(with_schedule(31, 300, 100).validate_params());
    assert!(!with_schedule(31, 100, 30).validate_params());
    assert!(!with_schedule(31, 0, 100).validate_params());
    assert!(!with_schedule(31, 300, 0).validate_params());
    assert!(fixture(&parties()).validate_params());
}

#[test]
fn test_height_schedule() {
    let template = fixture(&parties());
    let p = template.params();
    assert_eq!(template.height_max(), Some(250));

    assert_eq!(template.select_authorized_party(50), None);
    assert_eq!(template.select_authorized_party(99), None);
    assert_eq!(template.select_authorized_party(100), Some(&p.business));
    assert_eq!(template.select_authorized_party(249), Some(&p.business));
    assert_eq!(template.select_authorized_party(250), Some(&p.customer));
    assert_eq!(template.select_authorized_party(1000), Some(&p.customer));

    assert_eq!(template.phase(50), SchedulePhase::Inactive);
    assert_eq!(template.phase(100), SchedulePhase::BusinessPeriod);
    assert_eq!(template.phase(250), SchedulePhase::CustomerPeriod);
}

#[test]
fn test_selection_is_idempotent() {
    let template = fixture(&parties());
    for height in [0, 100, 249, 250, u32::MAX] {
        assert_eq!(
            template.select_authorized_party(height),
            template.select_authorized_party(height)
        );
    }
}

#[test]
fn test_height_max_does_not_wrap() {
    let template = PostTemplate::new(PostParams {
        height_begin: u32::MAX - 10,
        height_cycle: u32::MAX,
        total: u64::from(u32::MAX) * 4,
        price: 1,
        ..*with_schedule(31, 1, 1).params()
    });
    assert!(template.height_max().unwrap() > u64::from(u32::MAX));
    assert_eq!(
        template.phase(u32::MAX),
        SchedulePhase::BusinessPeriod,
        "a schedule past u32::MAX never hands over"
    );
}

#[test]
fn test_zero_price_is_inactive_without_panicking() {
    let template = with_schedule(31, 300, 0);
    assert_eq!(template.height_max(), None);
    assert_eq!(template.select_authorized_party(1000), None);
    assert!(template.resolve_signers(1000).is_empty());
    assert!(template
        .verify_tx_signature(&[0; 32], &[0; 32], &Destination::default(), &[], 1000)
        .is_err());
}

#[test]
fn test_signatures_follow_the_schedule() {
    let p = parties();
    let template = fixture(&p);
    let digest = [0x42; 32];
    let business_sig = p.business.sign(&digest).unwrap();
    let customer_sig = p.customer.sign(&digest).unwrap();

    assert!(template.verify_signature(&digest, business_sig.as_bytes(), 150));
    assert!(!template.verify_signature(&digest, customer_sig.as_bytes(), 150));
    assert!(template.verify_signature(&digest, customer_sig.as_bytes(), 250));
    assert!(!template.verify_signature(&digest, business_sig.as_bytes(), 250));
    assert!(!template.verify_signature(&digest, business_sig.as_bytes(), 99));

    let anchor = [0; 32];
    let to = Destination::from_pubkey([5; 32]);
    assert_eq!(
        template.verify_tx_signature(&digest, &anchor, &to, business_sig.as_bytes(), 150),
        Ok(true)
    );
    assert_eq!(
        template.verify_tx_signature(&digest, &anchor, &to, business_sig.as_bytes(), 250),
        Ok(false)
    );
}

fn envelope(proof_payload: Vec<u8>, inner: Vec<u8>) -> Vec<u8> {
    let mut raw = vec![0u8; POST_TEMPLATE_DATA_LEN];
    raw.extend((proof_payload, inner).encode());
    raw
}

#[test]
fn test_enveloped_signature() {
    let p = parties();
    let template = fixture(&p);
    let digest = [0x17; 32];
    let sig = p.business.sign(&digest).unwrap().as_bytes().to_vec();

    let other_payload = vec![0x99; POST_BASE_LEN];
    let wrapped = envelope(other_payload.clone(), sig.clone());
    assert!(template.verify_enveloped_signature(&digest, &wrapped, 120));

    // A payload repeating the template's own post_base is refused.
    let own_payload = post_base().to_bytes();
    let self_referencing = envelope(own_payload, sig.clone());
    assert!(!template.verify_enveloped_signature(&digest, &self_referencing, 120));

    // Malformed or truncated envelopes fail quietly.
    assert!(!template.verify_enveloped_signature(&digest, &[0u8; 10], 120));
    let mut garbage = vec![0u8; POST_TEMPLATE_DATA_LEN];
    garbage.push(0xff);
    assert!(!template.verify_enveloped_signature(&digest, &garbage, 120));

    // The inner signature is still checked against the scheduled party.
    assert!(!template.verify_enveloped_signature(&digest, &envelope(other_payload, sig), 300));
}

#[test]
fn test_signer_resolution() {
    let p = parties();
    let template = fixture(&p);
    assert!(template.resolve_signers(99).is_empty());
    assert_eq!(
        template.resolve_signers(100).into_iter().collect::<Vec<_>>(),
        vec![template.params().business]
    );

    let mut tx = spend_tx();
    tx.sig = 260u32.to_le_bytes().to_vec();
    tx.sig.extend_from_slice(&[0xee; 64]);
    let signers = template.sign_destinations(&tx).unwrap();
    assert!(signers.contains(&template.params().customer));
    assert_eq!(signers.len(), 1);

    tx.sig = vec![1, 2, 3];
    assert!(matches!(
        template.sign_destinations(&tx),
        Err(TemplateError::Signature(_))
    ));
}

#[test]
fn test_build_tx_signature_is_passthrough() {
    let template = fixture(&parties());
    assert_eq!(template.build_tx_signature(&[1, 2, 3]), vec![1, 2, 3]);
    assert!(template.build_tx_signature(&[]).is_empty());
}

#[test]
fn test_valid_spend_calls_verifier_once() {
    let template = fixture(&parties());
    let verifier = RecordingVerifier::answering(PostVerifyResponse::accepted());

    assert!(template.verify_transaction(&spend_tx(), &BLOCK_HASH, 150, 200, &verifier));

    let calls = verifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        RecordedCall {
            sector_size: 1024,
            challenge_count: 2,
            randomness: BLOCK_HASH,
            sector_ids: 42u64.to_le_bytes(),
            proof_head: 0x33,
            candidates_head: 0x44,
        }
    );
}

#[test]
fn test_verifier_error_rejects_spend() {
    let template = fixture(&parties());
    let verifier = RecordingVerifier::answering(PostVerifyResponse::failed(3, "bad proof"));
    assert!(!template.verify_transaction(&spend_tx(), &BLOCK_HASH, 150, 200, &verifier));
    assert_eq!(verifier.calls().len(), 1);
}

#[test]
fn test_malformed_spends_never_reach_verifier() {
    let template = fixture(&parties());
    let verifier = RecordingVerifier::answering(PostVerifyResponse::accepted());

    let mut wrong_amount = spend_tx();
    wrong_amount.amount = 91;
    assert!(!template.verify_transaction(&wrong_amount, &BLOCK_HASH, 150, 300, &verifier));

    let mut overflowing = spend_tx();
    overflowing.amount = u64::MAX;
    assert!(!template.verify_transaction(&overflowing, &BLOCK_HASH, 150, 300, &verifier));

    let mut two_inputs = spend_tx();
    two_inputs.inputs.push(TxInput {
        prev_txid: [8; 32],
        n: 1,
    });
    assert!(!template.verify_transaction(&two_inputs, &BLOCK_HASH, 150, 300, &verifier));

    let mut no_inputs = spend_tx();
    no_inputs.inputs.clear();
    assert!(!template.verify_transaction(&no_inputs, &BLOCK_HASH, 150, 300, &verifier));

    for len in [0, 20, 544, 546] {
        let mut bad_proof = spend_tx();
        bad_proof.data = vec![0x33; len];
        assert!(!template.verify_transaction(&bad_proof, &BLOCK_HASH, 150, 300, &verifier));
    }

    assert!(!template.verify_transaction(&spend_tx(), &BLOCK_HASH, 99, 300, &verifier));

    assert!(verifier.calls().is_empty());
}

#[test]
fn test_surplus_uses_whole_cycles() {
    let template = fixture(&parties());
    let verifier = RecordingVerifier::answering(PostVerifyResponse::accepted());
    let tx = spend_tx();

    // One full cycle elapsed: 200 must remain locked.
    assert!(!template.verify_transaction(&tx, &BLOCK_HASH, 199, 199, &verifier));
    assert!(template.verify_transaction(&tx, &BLOCK_HASH, 199, 200, &verifier));
    // Two cycles elapsed: 100 must remain.
    assert!(template.verify_transaction(&tx, &BLOCK_HASH, 200, 100, &verifier));
    // Past the schedule the surplus floors at zero.
    assert!(template.verify_transaction(&tx, &BLOCK_HASH, 10_000, 0, &verifier));
}

#[test]
fn test_verifier_config_is_forwarded() {
    let template = fixture(&parties()).with_verifier_config(PostVerifierConfig {
        sector_size: 2048,
        challenge_count: 5,
    });
    let verifier = RecordingVerifier::answering(PostVerifyResponse::accepted());
    let ctx = SpendContext {
        block_hash: &BLOCK_HASH,
        height: 150,
        value_in: 200,
    };
    assert!(SpendingTemplate::verify_transaction(&template, &spend_tx(), &ctx, &verifier));
    let calls = verifier.calls();
    assert_eq!((calls[0].sector_size, calls[0].challenge_count), (2048, 5));
}

fn request(p: &Parties) -> TemplateRequest {
    TemplateRequest {
        template_type: "post".into(),
        post: fixture(p).template_data(),
    }
}

#[test]
fn test_request_round_trip() {
    let p = parties();
    let expected = fixture(&p);
    let mut template = PostTemplate::default();
    template.set_from_request(&request(&p)).unwrap();
    assert_eq!(template.id(), expected.id());
    assert_eq!(template.template_data(), expected.template_data());

    let json = serde_json::to_value(template.to_response()).unwrap();
    assert_eq!(json["type"], "post");
    assert_eq!(json["post"]["height_cycle"], 50);
    assert_eq!(json["hex"].as_str().unwrap().len(), POST_TEMPLATE_DATA_LEN * 2);
}

#[test]
fn test_request_rejections_leave_template_untouched() {
    let p = parties();
    let mut template = fixture(&p);
    let before = template.clone();

    let mut wrong_type = request(&p);
    wrong_type.template_type = "weighted".into();
    assert!(matches!(
        template.set_from_request(&wrong_type),
        Err(TemplateError::TypeMismatch { .. })
    ));

    let mut null_party = request(&p);
    null_party.post.customer = Destination::default().to_string();
    assert!(template.set_from_request(&null_party).is_err());

    let mut garbled = request(&p);
    garbled.post.business = "not-an-address".into();
    assert!(template.set_from_request(&garbled).is_err());

    let mut bad_hex = request(&p);
    bad_hex.post.post_base = "zz".into();
    assert!(template.set_from_request(&bad_hex).is_err());

    let mut short_base = request(&p);
    short_base.post.post_base = hex::encode([0u8; 71]);
    assert!(matches!(
        template.set_from_request(&short_base),
        Err(TemplateError::InvalidRequest(_))
    ));

    assert_eq!(template, before);
}

fn arb_params() -> impl Strategy<Value = PostParams> {
    (
        (any::<[u8; 32]>(), any::<[u8; 32]>()),
        (any::<u32>(), any::<u32>(), any::<u64>(), any::<u64>()),
        (any::<[u8; 8]>(), any::<[u8; 32]>(), any::<[u8; 32]>()),
    )
        .prop_map(
            |((business, customer), (height_begin, height_cycle, total, price), base)| PostParams {
                business: Destination::from_pubkey(business),
                customer: Destination::from_pubkey(customer),
                height_begin,
                height_cycle,
                total,
                price,
                post_base: PostBase {
                    sector_ids: SectorIds(base.0),
                    comm_r: CommR(base.1),
                    prover_id: ProverId(base.2),
                },
            },
        )
}

proptest! {
    #[test]
    fn test_decode_inverts_encode_for_any_params(params in arb_params()) {
        let template = PostTemplate::new(params);
        prop_assert_eq!(template.canonical_bytes().len(), POST_TEMPLATE_DATA_LEN);
        let decoded = PostTemplate::from_bytes(template.canonical_bytes()).unwrap();
        prop_assert_eq!(decoded.id(), template.id());
        prop_assert_eq!(decoded, template);
    }

    #[test]
    fn test_phase_never_moves_backwards(
        params in arb_params(),
        a in any::<u32>(),
        b in any::<u32>(),
    ) {
        let template = PostTemplate::new(params);
        let (low, high) = (a.min(b), a.max(b));
        prop_assert!(template.phase(low) <= template.phase(high));
    }

    #[test]
    fn test_selection_is_idempotent_for_any_params(
        params in arb_params(),
        height in any::<u32>(),
    ) {
        let template = PostTemplate::new(params);
        prop_assert_eq!(
            template.select_authorized_party(height),
            template.select_authorized_party(height)
        );
        prop_assert_eq!(
            template.select_authorized_party(height).is_some(),
            template.phase(height) != SchedulePhase::Inactive
        );
    }
}
