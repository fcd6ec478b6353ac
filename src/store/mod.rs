pub mod memory;

pub use memory::{InsertError, LinkStore};
