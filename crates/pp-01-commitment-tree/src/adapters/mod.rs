pub mod memory_db;
pub mod verifier;

pub use memory_db::*;
pub use verifier::*;
