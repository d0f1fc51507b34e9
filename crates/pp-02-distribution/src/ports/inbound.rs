use crate::domain::{
    ClaimReceipt, ClaimRequest, DistributionReceipt, DistributionState, PayerAuthorization,
    PayrollError,
};
use shared_types::{AccountId, Amount, Hash};

/// Operations exposed to payers, recipients and relays.
pub trait PayrollApi {
    /// Install empty roots at epoch 0. Allowed once.
    fn init(&self) -> Result<DistributionState, PayrollError>;

    /// Start the next epoch with `new_salary_root` and escrow `total_amount`
    /// from the payer.
    fn distribute(
        &self,
        new_salary_root: Hash,
        total_amount: Amount,
        auth: &PayerAuthorization,
    ) -> Result<DistributionReceipt, PayrollError>;

    /// Verify `request` and pay its amount to `submitter`, who need not be
    /// the recipient.
    fn claim(
        &self,
        submitter: AccountId,
        request: &ClaimRequest,
    ) -> Result<ClaimReceipt, PayrollError>;

    /// Current committed state.
    fn state(&self) -> Result<DistributionState, PayrollError>;

    fn pool_balance(&self) -> Amount;
}
