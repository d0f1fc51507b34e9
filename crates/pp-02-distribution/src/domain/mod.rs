pub mod claim;
pub mod distribution;
pub mod entities;
pub mod errors;
pub mod index;
pub mod invariants;

pub use claim::*;
pub use distribution::*;
pub use entities::*;
pub use errors::*;
pub use index::*;
pub use invariants::*;
