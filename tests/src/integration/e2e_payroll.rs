//! # End-to-End Payroll Flow
//!
//! Two distribution rounds over three recipients, with a relayed claim, a
//! replayed claim and every claim rejection path.
//!
//! ```text
//! init ──→ distribute [1,2,3] ──→ claim r0 (relay) ──→ replay r0 ✗
//!              epoch 1                 claim r1
//!                      ──→ distribute [4,5,6] ──→ claim r0 @ epoch 2
//!                              epoch 2              claim r2 @ epoch 1
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{account_of, secret, Payroll};
    use payroll_runtime::{runner::participant_account, Scenario, ScenarioRunner};
    use pp_02_distribution::{PayrollApi, PayrollError, PayrollEvent, TreeKind};
    use shared_crypto::{IdentitySecret, Keccak256Hasher};
    use shared_types::Epoch;
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn relay() -> IdentitySecret {
        IdentitySecret::from_seed([0x0F; 32])
    }

    fn payroll() -> Payroll<Keccak256Hasher> {
        Payroll::new(Keccak256Hasher, 256, 21)
    }

    // =============================================================================
    // TWO-ROUND PAYROLL
    // =============================================================================

    #[test]
    fn test_two_round_payroll() {
        let mut payroll = payroll();
        let relay = account_of(&relay());
        assert_eq!(payroll.epoch(), Epoch(0));

        // Round one
        let (batch, receipt) = payroll.distribute(&[1, 2, 3]);
        let receipt = receipt.unwrap();
        assert_eq!(batch.total, 6);
        assert_eq!(receipt.state.epoch, Epoch(1));
        assert_eq!(receipt.state.salary_root, batch.root);
        assert_eq!(payroll.service.pool_balance(), 6);

        // Recipient 0 claims through the relay
        let first = payroll.request(0, Epoch(1));
        let claimed = payroll.submit(relay, &first).unwrap();
        assert_eq!(claimed.payout, 1);
        assert_eq!(payroll.balance(relay), 1);
        assert_eq!(payroll.balance(account_of(&secret(0))), 0);
        assert!(payroll.book.is_claimed(&secret(0).public_identity(), Epoch(1)));
        assert_eq!(claimed.state.claimed_root, payroll.book.claimed_root());

        // Same witnesses again
        let after_first = payroll.service.state().unwrap();
        assert_eq!(
            payroll.submit(relay, &first),
            Err(PayrollError::ProofMismatch {
                tree: TreeKind::Claimed
            })
        );
        assert_eq!(payroll.service.state().unwrap(), after_first);
        assert_eq!(payroll.balance(relay), 1);

        // Recipient 1 claims for itself
        let own = account_of(&secret(1));
        payroll.submit(own, &payroll.request(1, Epoch(1))).unwrap();
        assert_eq!(payroll.balance(own), 2);
        assert_eq!(payroll.service.pool_balance(), 3);

        // Round two
        let (_, receipt) = payroll.distribute(&[4, 5, 6]);
        let receipt = receipt.unwrap();
        assert_eq!(receipt.state.epoch, Epoch(2));
        assert_eq!(receipt.pool_balance, 18);
        // Distribution leaves the claimed root alone
        assert_eq!(receipt.state.claimed_root, payroll.book.claimed_root());

        // Recipient 0 claims epoch 2, independent of its epoch 1 claim
        let r0 = account_of(&secret(0));
        payroll.submit(r0, &payroll.request(0, Epoch(2))).unwrap();
        assert_eq!(payroll.balance(r0), 4);

        // Recipient 2's epoch 1 entry survived the new root
        let r2 = account_of(&secret(2));
        payroll.submit(r2, &payroll.request(2, Epoch(1))).unwrap();
        assert_eq!(payroll.balance(r2), 3);
        assert_eq!(payroll.service.pool_balance(), 11);

        let stats = payroll.service.stats();
        assert_eq!(stats.distributions, 2);
        assert_eq!(stats.claims_paid, 4);
        assert_eq!(stats.rejected, 1);
    }

    // =============================================================================
    // CLAIM REJECTIONS
    // =============================================================================

    #[test]
    fn test_wrong_amount_rejected_without_state_change() {
        let mut payroll = payroll();
        payroll.distribute(&[1, 2, 3]).1.unwrap();
        let before = payroll.service.state().unwrap();

        let mut request = payroll.request(2, Epoch(1));
        request.amount = 30;
        assert_eq!(
            payroll.submit(account_of(&secret(2)), &request),
            Err(PayrollError::ProofMismatch {
                tree: TreeKind::Salary
            })
        );
        assert_eq!(payroll.service.state().unwrap(), before);
        assert_eq!(payroll.service.pool_balance(), 6);
    }

    #[test]
    fn test_future_epoch_rejected() {
        let mut payroll = payroll();
        payroll.distribute(&[1, 2, 3]).1.unwrap();
        let before = payroll.service.state().unwrap();

        let request = payroll
            .book
            .claim_request_for(&secret(0), Epoch(2), 1)
            .unwrap();
        assert_eq!(
            payroll.submit(account_of(&secret(0)), &request),
            Err(PayrollError::StaleEpoch {
                requested: Epoch(2),
                current: Epoch(1)
            })
        );
        assert_eq!(payroll.service.state().unwrap(), before);
    }

    #[test]
    fn test_mismatched_witnesses_rejected() {
        let mut payroll = payroll();
        payroll.distribute(&[1, 1, 3]).1.unwrap();

        // Recipient 1 presents recipient 0's salary witness for the same amount
        let mut request = payroll.request(1, Epoch(1));
        request.salary_witness = payroll.request(0, Epoch(1)).salary_witness;
        assert!(matches!(
            payroll.submit(account_of(&secret(1)), &request),
            Err(PayrollError::IndexMismatch {
                tree: TreeKind::Salary,
                ..
            })
        ));

        // Correct salary witness, foreign claimed witness
        let mut request = payroll.request(1, Epoch(1));
        request.claimed_witness = payroll.request(2, Epoch(1)).claimed_witness;
        assert!(matches!(
            payroll.submit(account_of(&secret(1)), &request),
            Err(PayrollError::IndexMismatch {
                tree: TreeKind::Claimed,
                ..
            })
        ));
    }

    #[test]
    fn test_stranger_cannot_claim() {
        let mut payroll = payroll();
        payroll.distribute(&[1, 2, 3]).1.unwrap();

        // Holder of an unlisted secret replays recipient 0's witnesses
        let mut request = payroll.request(0, Epoch(1));
        request.identity_secret = IdentitySecret::from_seed([0x77; 32]);
        assert!(matches!(
            payroll.submit(account_of(&relay()), &request),
            Err(PayrollError::IndexMismatch { .. })
        ));
    }

    #[test]
    fn test_epoch_one_witness_cannot_be_replayed_in_epoch_two() {
        let mut payroll = payroll();
        payroll.distribute(&[5]).1.unwrap();
        payroll.distribute(&[5]).1.unwrap();

        // Epoch 1 witnesses relabelled as epoch 2
        let mut request = payroll.request(0, Epoch(1));
        request.epoch = Epoch(2);
        assert!(matches!(
            payroll.submit(account_of(&secret(0)), &request),
            Err(PayrollError::IndexMismatch { .. })
        ));
    }

    #[test]
    fn test_underfunded_distribution_is_atomic() {
        let mut payroll = Payroll::new(Keccak256Hasher, 64, 5);
        let before = payroll.service.state().unwrap();
        let (_, result) = payroll.distribute(&[1, 2, 3]);
        assert_eq!(
            result,
            Err(PayrollError::InsufficientFunds {
                required: 6,
                available: 5
            })
        );
        assert_eq!(payroll.service.state().unwrap(), before);
        assert_eq!(payroll.service.pool_balance(), 0);
        assert_eq!(payroll.book.salary_root(), before.salary_root);
    }

    // =============================================================================
    // EVENTS AND RUNTIME
    // =============================================================================

    #[test]
    fn test_event_journal_order() {
        let mut payroll = payroll();
        payroll.distribute(&[1, 2, 3]).1.unwrap();
        let relay = account_of(&relay());
        payroll.submit(relay, &payroll.request(0, Epoch(1))).unwrap();

        let events = payroll.service.events();
        assert!(matches!(events[0], PayrollEvent::Initialized(_)));
        assert!(matches!(events[1], PayrollEvent::SalaryDistributed(_)));
        match &events[2] {
            PayrollEvent::SalaryClaimed(claimed) => {
                assert_eq!(claimed.amount, 1);
                assert_eq!(claimed.submitter, relay);
                assert_eq!(claimed.epoch, Epoch(1));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_runtime_replays_builtin_scenario() {
        let scenario = Scenario::two_round_payroll();
        let report = ScenarioRunner::new(Arc::new(Keccak256Hasher), 256, &scenario)
            .unwrap()
            .run(&scenario)
            .unwrap();

        assert_eq!(report.epoch, 2);
        assert_eq!(report.balance_of("relay"), 1);
        assert_eq!(report.balance_of("recipient-0"), 4);
        assert_eq!(report.balance_of("recipient-1"), 2);

        let relay = participant_account(&scenario, "relay").unwrap();
        assert!(report.events.iter().any(|event| matches!(
            event,
            PayrollEvent::SalaryClaimed(claimed) if claimed.submitter == relay
        )));
    }
}
