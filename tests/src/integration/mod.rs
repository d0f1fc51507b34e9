pub mod concurrency;
pub mod e2e_payroll;
