//! Core types for the RainTree broadcast simulator.
//!
//! RainTree disseminates a message from one originating node to every node
//! in a fixed membership set with a bounded fan-out: at most two sends plus
//! one local demotion per hop, each operating on a shrinking view of the
//! membership list. This crate holds the vocabulary shared by the
//! propagation engine and the batch evaluator: node addresses, the ordered
//! address book with its cyclic shrink operation, and the validated tuning
//! coefficients.

mod address;
mod book;
mod coefficients;
mod error;

pub use address::NodeAddress;
pub use book::AddressBook;
pub use coefficients::Coefficients;
pub use error::ParameterError;
