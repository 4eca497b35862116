//! Type checking for System F extended with existential types.
//!
//! Terms carry every annotation the checker needs: parameter types,
//! explicit type abstraction and application, and explicit `pack`/`unpack`
//! for existentials. [`type_of`] computes the unique type of a closed term.

pub mod ast;
pub mod env;
pub mod error;
pub mod fresh;
pub mod samples;
pub mod typecheck;
pub mod types;


pub use ast::{Expr, TmVar, TyVar, Type};
pub use env::Env;
pub use error::{ErrorKind, Result, TypeError};
pub use fresh::NameSupply;
pub use typecheck::{run_checker, type_of, type_of_in, InferenceTree, TypeChecker};
