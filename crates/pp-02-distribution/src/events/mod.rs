pub mod payloads;

pub use payloads::*;
