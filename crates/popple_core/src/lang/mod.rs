//! Popple message vocabulary registries.
//!
//! Callers work with stable IDs (`OperatorId`, `PunctuationId`) and look up spellings through the registry
//! tables instead of scattering `"++"` and `'`'` literals through the scanner.
//!
//! ## Examples
//! ```rust
//! use popple_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("++"), Some(OperatorId::Increment));
//! assert_eq!(operators::delta_of(OperatorId::Decrement), -1);
//! ```

pub mod operators;
pub mod punctuation;
