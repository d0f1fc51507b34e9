//! Shared setup for the integration tests.

use pp_01_commitment_tree::{HashPathVerifier, TreeConfig};
use pp_02_distribution::{
    Account, ClaimReceipt, ClaimRequest, DistributionReceipt, InMemoryLedger, Ledger,
    PayerAuthorization, PayrollApi, PayrollBook, PayrollConfig, PayrollError, PayrollService,
    SalaryBatch, SalaryEntry,
};
use shared_crypto::{DomainHasher, IdentitySecret};
use shared_types::{AccountId, Amount, Epoch};
use std::sync::Arc;

pub type Service<H> = PayrollService<InMemoryLedger, HashPathVerifier<H>, H>;

/// Deterministic identity for participant `n`.
pub fn secret(n: u8) -> IdentitySecret {
    IdentitySecret::from_seed([n.wrapping_add(1); 32])
}

pub fn payer_secret() -> IdentitySecret {
    IdentitySecret::from_seed([0xAA; 32])
}

pub fn account_of(secret: &IdentitySecret) -> AccountId {
    secret.public_identity().account_id()
}

/// A funded, initialized service plus the payer's book.
pub struct Payroll<H: DomainHasher> {
    pub service: Service<H>,
    pub book: PayrollBook<H>,
    pub payer: IdentitySecret,
}

impl<H: DomainHasher> Payroll<H> {
    pub fn new(hasher: H, depth: usize, payer_funds: Amount) -> Self {
        let hasher = Arc::new(hasher);
        let payer = payer_secret();
        let config = PayrollConfig::new(payer.public_identity()).with_depth(depth);
        let service = PayrollService::in_memory(config, hasher.clone()).unwrap();
        service
            .ledger()
            .credit(service.payer_account(), payer_funds)
            .unwrap();
        service.init().unwrap();
        let book = PayrollBook::new(hasher, &TreeConfig::with_depth(depth)).unwrap();
        Self {
            service,
            book,
            payer,
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.service.state().unwrap().epoch
    }

    /// Commit `amounts[i]` for participant `i` and distribute the batch.
    pub fn distribute(
        &mut self,
        amounts: &[Amount],
    ) -> (SalaryBatch, Result<DistributionReceipt, PayrollError>) {
        let entries: Vec<SalaryEntry> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| SalaryEntry {
                identity: secret(i as u8).public_identity(),
                amount: *amount,
            })
            .collect();
        let snapshot = self.epoch();
        let epoch = snapshot.next().unwrap();
        let batch = self.book.commit_batch(epoch, &entries).unwrap();
        let auth = self.authorize(snapshot, &batch);
        let result = self.service.distribute(batch.root, batch.total, &auth);
        if result.is_err() {
            self.book.discard_batch(epoch, &entries).unwrap();
        }
        (batch, result)
    }

    pub fn authorize(&self, snapshot: Epoch, batch: &SalaryBatch) -> PayerAuthorization {
        PayerAuthorization::sign(
            self.service.hasher().as_ref(),
            &self.payer,
            snapshot,
            &batch.root,
            batch.total,
        )
    }

    /// Claim request for participant `n` against the book's current roots.
    pub fn request(&self, n: u8, epoch: Epoch) -> ClaimRequest {
        self.book.claim_request(&secret(n), epoch).unwrap()
    }

    /// Submit `request` and mirror a success in the book.
    pub fn submit(
        &mut self,
        submitter: AccountId,
        request: &ClaimRequest,
    ) -> Result<ClaimReceipt, PayrollError> {
        let result = self.service.claim(submitter, request);
        if result.is_ok() {
            self.book
                .record_claim(&request.identity_secret.public_identity(), request.epoch)
                .unwrap();
        }
        result
    }

    pub fn balance(&self, account: AccountId) -> Amount {
        self.service.ledger().balance(&Account::Holder(account))
    }
}
