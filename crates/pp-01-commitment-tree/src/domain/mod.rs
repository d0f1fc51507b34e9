pub mod empty;
pub mod entities;
pub mod errors;
pub mod tree;
pub mod verify;

pub use empty::*;
pub use entities::*;
pub use errors::*;
pub use tree::*;
pub use verify::*;
