//! # Payroll Benchmarks
//!
//! | Operation | Cost |
//! |-----------|------|
//! | Tree write | `depth + 1` hashes |
//! | Witness extraction | `depth` node reads |
//! | Claim verification | `3 * (depth + 1)` hashes + slot derivation |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pp_01_commitment_tree::{
    CommitmentTree, HashPathVerifier, MembershipVerifier, SparseMerkleTree, TreeConfig,
};
use pp_02_distribution::{
    verify_claim, DistributionState, PayerAuthorization, PayrollApi, PayrollBook, PayrollConfig,
    PayrollService, SalaryEntry,
};
use shared_crypto::{Blake3Hasher, DomainHasher, IdentitySecret, Keccak256Hasher};
use shared_types::{Epoch, LeafValue, SlotIndex};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Commitment tree
// ============================================================================

fn bench_tree_writes<H: DomainHasher + Default + 'static>(c: &mut Criterion, label: &str) {
    let mut group = c.benchmark_group(format!("tree-write-{label}"));
    group.measurement_time(Duration::from_secs(5));

    for depth in [32usize, 256] {
        group.throughput(Throughput::Elements(100));
        group.bench_with_input(BenchmarkId::new("insert_100", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut tree =
                    SparseMerkleTree::new(Arc::new(H::default()), &TreeConfig::with_depth(depth))
                        .unwrap();
                for i in 0..100u64 {
                    tree.set(
                        SlotIndex::from_u64(i.wrapping_mul(0x9E37_79B9)).truncate(depth),
                        LeafValue::from_amount(i + 1),
                    )
                    .unwrap();
                }
                black_box(tree.root())
            })
        });
    }
    group.finish();
}

fn bench_keccak_tree(c: &mut Criterion) {
    bench_tree_writes::<Keccak256Hasher>(c, "keccak");
}

fn bench_blake3_tree(c: &mut Criterion) {
    bench_tree_writes::<Blake3Hasher>(c, "blake3");
}

// ============================================================================
// Claim verification
// ============================================================================

fn bench_claim_verification(c: &mut Criterion) {
    let hasher = Arc::new(Keccak256Hasher);
    let config = TreeConfig::default();
    let verifier = HashPathVerifier::new(hasher.clone(), &config).unwrap();
    let mut book = PayrollBook::new(hasher.clone(), &config).unwrap();

    let recipients: Vec<IdentitySecret> =
        (0..64u8).map(|n| IdentitySecret::from_seed([n + 1; 32])).collect();
    let entries: Vec<SalaryEntry> = recipients
        .iter()
        .map(|secret| SalaryEntry {
            identity: secret.public_identity(),
            amount: 1_000,
        })
        .collect();
    book.commit_batch(Epoch(1), &entries).unwrap();

    let state = DistributionState {
        salary_root: book.salary_root(),
        claimed_root: book.claimed_root(),
        epoch: Epoch(1),
    };
    let request = book.claim_request(&recipients[7], Epoch(1)).unwrap();

    c.bench_function("claim-verify-depth-256", |b| {
        b.iter(|| black_box(verify_claim(&verifier, hasher.as_ref(), &state, &request).unwrap()))
    });
    assert_eq!(verifier.depth(), 256);
}

fn bench_distribute_and_claim(c: &mut Criterion) {
    let hasher = Arc::new(Keccak256Hasher);
    let payer = IdentitySecret::from_seed([0xAA; 32]);
    let recipient = IdentitySecret::from_seed([0x01; 32]);

    c.bench_function("service-distribute-claim", |b| {
        b.iter(|| {
            let config = PayrollConfig::new(payer.public_identity());
            let service = PayrollService::in_memory(config, hasher.clone()).unwrap();
            service.ledger().credit(service.payer_account(), 10).unwrap();
            service.init().unwrap();

            let mut book = PayrollBook::new(hasher.clone(), &service.config().tree).unwrap();
            let batch = book
                .commit_batch(
                    Epoch(1),
                    &[SalaryEntry {
                        identity: recipient.public_identity(),
                        amount: 10,
                    }],
                )
                .unwrap();
            let auth =
                PayerAuthorization::sign(hasher.as_ref(), &payer, Epoch(0), &batch.root, batch.total);
            service.distribute(batch.root, batch.total, &auth).unwrap();

            let request = book.claim_request(&recipient, Epoch(1)).unwrap();
            black_box(
                service
                    .claim(recipient.public_identity().account_id(), &request)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_keccak_tree,
    bench_blake3_tree,
    bench_claim_verification,
    bench_distribute_and_claim,
);
criterion_main!(benches);
