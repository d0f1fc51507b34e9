//! # Concurrent Submission
//!
//! The ledger commits one transaction at a time and every transaction
//! re-reads state, so of two claims prepared against the same claimed root
//! only the first to commit can succeed. The loser fails with
//! `ProofMismatch` and succeeds after rebuilding its witnesses.

#[cfg(test)]
mod tests {
    use crate::fixtures::{account_of, secret, Payroll};
    use parking_lot::Mutex;
    use pp_02_distribution::{PayrollApi, PayrollError, TreeKind};
    use shared_crypto::testing::StubHasher;
    use shared_crypto::Keccak256Hasher;
    use shared_types::Epoch;
    use std::sync::Barrier;
    use std::thread;

    const RECIPIENTS: usize = 8;

    // =============================================================================
    // SAME SLOT
    // =============================================================================

    #[test]
    fn test_racing_double_claim_pays_once() {
        let mut payroll = Payroll::new(Keccak256Hasher, 256, 100);
        payroll.distribute(&[40]).1.unwrap();
        let request = payroll.request(0, Epoch(1));

        let threads = 6;
        let barrier = Barrier::new(threads);
        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..threads)
                .map(|i| {
                    let service = &payroll.service;
                    let request = &request;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        service.claim(account_of(&secret(10 + i as u8)), request)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        for result in results.iter().filter(|r| r.is_err()) {
            assert_eq!(
                result.as_ref().unwrap_err(),
                &PayrollError::ProofMismatch {
                    tree: TreeKind::Claimed
                }
            );
        }
        assert_eq!(payroll.service.pool_balance(), 0);
        assert_eq!(payroll.service.stats().claims_paid, 1);
    }

    // =============================================================================
    // DIFFERENT SLOTS, SAME SNAPSHOT
    // =============================================================================

    #[test]
    fn test_stale_claimed_witness_succeeds_after_rebuild() {
        let mut payroll = Payroll::new(StubHasher, 32, 100);
        payroll.distribute(&[1, 2, 3]).1.unwrap();

        // Both prepared against the empty claimed root
        let r0 = payroll.request(0, Epoch(1));
        let r1 = payroll.request(1, Epoch(1));

        payroll.submit(account_of(&secret(0)), &r0).unwrap();
        assert_eq!(
            payroll.submit(account_of(&secret(1)), &r1),
            Err(PayrollError::ProofMismatch {
                tree: TreeKind::Claimed
            })
        );
        assert!(payroll.service.stats().stale_rejections >= 1);

        let rebuilt = payroll.request(1, Epoch(1));
        payroll.submit(account_of(&secret(1)), &rebuilt).unwrap();
        assert_eq!(payroll.balance(account_of(&secret(1))), 2);
    }

    #[test]
    fn test_claim_prepared_before_distribution_is_rebuilt() {
        let mut payroll = Payroll::new(StubHasher, 32, 100);
        payroll.distribute(&[1, 2, 3]).1.unwrap();
        let stale = payroll.request(2, Epoch(1));

        // New salary root lands before the claim commits
        payroll.distribute(&[4, 5, 6]).1.unwrap();
        assert_eq!(
            payroll.submit(account_of(&secret(2)), &stale),
            Err(PayrollError::ProofMismatch {
                tree: TreeKind::Salary
            })
        );

        let rebuilt = payroll.request(2, Epoch(1));
        payroll.submit(account_of(&secret(2)), &rebuilt).unwrap();
        assert_eq!(payroll.balance(account_of(&secret(2))), 3);
    }

    #[test]
    fn test_distribution_authorizations_from_same_snapshot() {
        let mut payroll = Payroll::new(StubHasher, 32, 100);
        let snapshot = payroll.epoch();
        let (batch, first) = payroll.distribute(&[1]);
        first.unwrap();

        // A second authorization signed against epoch 0 cannot land at epoch 1
        let replay = payroll.authorize(snapshot, &batch);
        assert_eq!(
            payroll.service.distribute(batch.root, batch.total, &replay),
            Err(PayrollError::StaleAuthorization {
                signed: Epoch(0),
                current: Epoch(1)
            })
        );
        assert_eq!(payroll.epoch(), Epoch(1));
        assert_eq!(payroll.service.pool_balance(), 1);
    }

    // =============================================================================
    // MANY CLAIMERS WITH RETRY
    // =============================================================================

    #[test]
    fn test_parallel_claimers_all_paid_with_retry() {
        let mut payroll = Payroll::new(StubHasher, 32, 1_000);
        let amounts: Vec<u64> = (1..=RECIPIENTS as u64).collect();
        payroll.distribute(&amounts).1.unwrap();

        let Payroll { service, book, .. } = payroll;
        let book = Mutex::new(book);
        let barrier = Barrier::new(RECIPIENTS);

        let attempts: Vec<u32> = thread::scope(|scope| {
            let handles: Vec<_> = (0..RECIPIENTS)
                .map(|n| {
                    let (service, book, barrier) = (&service, &book, &barrier);
                    scope.spawn(move || {
                        let n = n as u8;
                        barrier.wait();
                        for attempt in 1..=10_000u32 {
                            let request = book.lock().claim_request(&secret(n), Epoch(1)).unwrap();
                            match service.claim(account_of(&secret(n)), &request) {
                                Ok(_) => {
                                    book.lock()
                                        .record_claim(&secret(n).public_identity(), Epoch(1))
                                        .unwrap();
                                    return attempt;
                                }
                                Err(e) if e.is_stale_state() => thread::yield_now(),
                                Err(e) => panic!("claim {n} failed: {e}"),
                            }
                        }
                        panic!("claim {n} never committed");
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(attempts.len(), RECIPIENTS);
        assert_eq!(service.stats().claims_paid, RECIPIENTS as u64);
        assert_eq!(service.pool_balance(), 0);
        assert_eq!(service.state().unwrap().claimed_root, book.lock().claimed_root());
        for n in 0..RECIPIENTS as u8 {
            assert!(book
                .lock()
                .is_claimed(&secret(n).public_identity(), Epoch(1)));
        }
    }
}
