use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use itertools::Itertools;

use crate::{
    ast::{TmVar, TyVar, Type},
    error::{Result, TypeError},
};

/// Typing context: value variables with their types, plus the type
/// variables currently in scope.
///
/// Extension returns a new environment and leaves `self` untouched, so each
/// branch of the checker owns its own copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    terms: BTreeMap<TmVar, Type>,
    types: BTreeSet<TyVar>,
}

impl Env {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert_term(&self, name: &str, ty: Type) -> Env {
        let mut env = self.clone();
        env.terms.insert(name.to_string(), ty);
        env
    }

    pub fn lookup(&self, name: &str) -> Result<&Type> {
        self.terms
            .get(name)
            .ok_or_else(|| TypeError::UnboundVariable {
                name: name.to_string(),
            })
    }

    pub fn insert_type(&self, var: TyVar) -> Env {
        let mut env = self.clone();
        env.types.insert(var);
        env
    }

    pub fn contains_type(&self, var: TyVar) -> bool {
        self.types.contains(&var)
    }

    /// Well-formedness of `ty` against the type variables in scope.
    pub fn well_formed(&self, ty: &Type) -> Result<()> {
        ty.well_formed(&self.types)
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() && self.types.is_empty() {
            return write!(f, "{{}}");
        }
        let terms = self
            .terms
            .iter()
            .format_with(", ", |(name, ty), g| g(&format_args!("{}: {}", name, ty)));
        let types = self.types.iter().format(", ");
        if self.types.is_empty() {
            write!(f, "{{{}}}", terms)
        } else if self.terms.is_empty() {
            write!(f, "{{| {}}}", types)
        } else {
            write!(f, "{{{} | {}}}", terms, types)
        }
    }
}
