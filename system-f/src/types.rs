//! Operations on [`Type`]: alpha-equivalence, well-formedness,
//! substitution and free-variable queries.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::{
    ast::{TyVar, Type},
    error::{Result, TypeError},
};

impl Type {
    /// Equality up to consistent renaming of `∀`/`∃` binders.
    pub fn alpha_eq(&self, other: &Type) -> bool {
        trace!(left = %self, right = %other, "alpha_eq");
        Self::alpha_eq_in(&mut BTreeMap::new(), self, other)
    }

    // `renaming` maps binders entered on the left to the matching binder on
    // the right; entries only live while inside that binder's body.
    fn alpha_eq_in(renaming: &mut BTreeMap<TyVar, TyVar>, t1: &Type, t2: &Type) -> bool {
        match (t1, t2) {
            (Type::Int, Type::Int) => true,
            (Type::Arrow(a1, b1), Type::Arrow(a2, b2)) => {
                Self::alpha_eq_in(renaming, a1, a2) && Self::alpha_eq_in(renaming, b1, b2)
            }
            (Type::Var(v1), Type::Var(v2)) => match renaming.get(v1) {
                Some(bound) => bound == v2,
                None => v1 == v2,
            },
            (Type::Forall(v1, body1), Type::Forall(v2, body2))
            | (Type::Exists(v1, body1), Type::Exists(v2, body2)) => {
                let shadowed = renaming.insert(*v1, *v2);
                let result = Self::alpha_eq_in(renaming, body1, body2);
                match shadowed {
                    Some(previous) => renaming.insert(*v1, previous),
                    None => renaming.remove(v1),
                };
                result
            }
            _ => false,
        }
    }

    /// Checks every type variable reached is either in `scope` or bound by
    /// an enclosing quantifier.
    pub fn well_formed(&self, scope: &BTreeSet<TyVar>) -> Result<()> {
        match self {
            Type::Int => Ok(()),
            Type::Var(var) if scope.contains(var) => Ok(()),
            Type::Var(var) => Err(TypeError::UnboundTypeVariable { var: *var }),
            Type::Arrow(t1, t2) => {
                t1.well_formed(scope)?;
                t2.well_formed(scope)
            }
            Type::Forall(var, body) | Type::Exists(var, body) => {
                if scope.contains(var) {
                    body.well_formed(scope)
                } else {
                    let mut inner = scope.clone();
                    inner.insert(*var);
                    body.well_formed(&inner)
                }
            }
        }
    }

    /// Replaces every occurrence of `Var(var)` with `replacement`.
    ///
    /// Binders are left alone and never renamed, so the result is only
    /// capture-free when no binder inside `self` reuses `var` or a free
    /// variable of `replacement`. Identities from a single
    /// [`crate::fresh::NameSupply`] guarantee this.
    pub fn subst(&self, var: TyVar, replacement: &Type) -> Type {
        trace!(%var, %replacement, ty = %self, "subst");
        self.subst_in(var, replacement)
    }

    fn subst_in(&self, var: TyVar, replacement: &Type) -> Type {
        match self {
            Type::Var(name) if *name == var => replacement.clone(),
            Type::Var(_) | Type::Int => self.clone(),
            Type::Arrow(t1, t2) => Type::arrow(
                t1.subst_in(var, replacement),
                t2.subst_in(var, replacement),
            ),
            Type::Forall(bound, body) => Type::forall(*bound, body.subst_in(var, replacement)),
            Type::Exists(bound, body) => Type::exists(*bound, body.subst_in(var, replacement)),
        }
    }

    pub fn get_arrow(&self) -> Result<(&Type, &Type)> {
        match self {
            Type::Arrow(domain, codomain) => Ok((domain.as_ref(), codomain.as_ref())),
            _ => Err(TypeError::NotArrow { ty: self.clone() }),
        }
    }

    pub fn get_forall(&self) -> Result<(TyVar, &Type)> {
        match self {
            Type::Forall(var, body) => Ok((*var, body.as_ref())),
            _ => Err(TypeError::NotForall { ty: self.clone() }),
        }
    }

    pub fn get_exists(&self) -> Result<(TyVar, &Type)> {
        match self {
            Type::Exists(var, body) => Ok((*var, body.as_ref())),
            _ => Err(TypeError::NotExists { ty: self.clone() }),
        }
    }

    pub fn occurs_free(&self, var: TyVar) -> bool {
        match self {
            Type::Int => false,
            Type::Var(name) => *name == var,
            Type::Arrow(t1, t2) => t1.occurs_free(var) || t2.occurs_free(var),
            Type::Forall(bound, body) | Type::Exists(bound, body) => {
                *bound != var && body.occurs_free(var)
            }
        }
    }

    /// `true` iff `var` does not occur free in `self`.
    pub fn not_escape(&self, var: TyVar) -> bool {
        !self.occurs_free(var)
    }

    pub fn free_type_vars(&self) -> BTreeSet<TyVar> {
        match self {
            Type::Int => BTreeSet::new(),
            Type::Var(var) => BTreeSet::from([*var]),
            Type::Arrow(t1, t2) => {
                let mut set = t1.free_type_vars();
                set.extend(t2.free_type_vars());
                set
            }
            Type::Forall(bound, body) | Type::Exists(bound, body) => {
                let mut set = body.free_type_vars();
                set.remove(bound);
                set
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv(n: usize) -> TyVar {
        TyVar(n)
    }

    fn var(n: usize) -> Type {
        Type::var(tv(n))
    }

    fn arrow(t1: Type, t2: Type) -> Type {
        Type::arrow(t1, t2)
    }

    fn id_type(n: usize) -> Type {
        Type::forall(tv(n), arrow(var(n), var(n)))
    }

    mod alpha_eq {
        use super::*;

        #[test]
        fn reflexive_on_base_types() {
            assert!(Type::Int.alpha_eq(&Type::Int));
            assert!(arrow(Type::Int, var(0)).alpha_eq(&arrow(Type::Int, var(0))));
        }

        #[test]
        fn renamed_binders_are_equal() {
            // ∀t0. t0 -> t0  ≡  ∀t1. t1 -> t1
            assert!(id_type(0).alpha_eq(&id_type(1)));
            assert_ne!(id_type(0), id_type(1));
        }

        #[test]
        fn different_bodies_are_not_equal() {
            // ∀t0. t0 -> t0  ≢  ∀t1. Int
            assert!(!id_type(0).alpha_eq(&Type::forall(tv(1), Type::Int)));
        }

        #[test]
        fn forall_is_not_exists() {
            let forall = Type::forall(tv(0), var(0));
            let exists = Type::exists(tv(0), var(0));
            assert!(!forall.alpha_eq(&exists));
        }

        #[test]
        fn free_variables_compare_by_identity() {
            assert!(var(3).alpha_eq(&var(3)));
            assert!(!var(3).alpha_eq(&var(4)));
        }

        #[test]
        fn nested_binders_keep_their_order() {
            // ∀t0. ∀t1. t0 -> t1  ≡  ∀t2. ∀t3. t2 -> t3
            let left = Type::forall(tv(0), Type::forall(tv(1), arrow(var(0), var(1))));
            let right = Type::forall(tv(2), Type::forall(tv(3), arrow(var(2), var(3))));
            assert!(left.alpha_eq(&right));

            // ∀t0. ∀t1. t0 -> t1  ≢  ∀t2. ∀t3. t3 -> t2
            let swapped = Type::forall(tv(2), Type::forall(tv(3), arrow(var(3), var(2))));
            assert!(!left.alpha_eq(&swapped));
        }

        #[test]
        fn unbound_left_variable_compares_by_raw_identity() {
            // ∀t0. t1  ≡  ∀t1. t1: the free `t1` on the left is not looked
            // up on the right, so it matches the right's bound `t1`. Fresh
            // identities rule this out.
            let left = Type::forall(tv(0), var(1));
            let right = Type::forall(tv(1), var(1));
            assert!(left.alpha_eq(&right));
            // From the other side the bound `t1` maps to `t0`.
            assert!(!right.alpha_eq(&left));
        }

        #[test]
        fn renaming_does_not_leak_out_of_binder() {
            // (∀t0. t0) -> t0  ≢  (∀t1. t1) -> t1
            let left = arrow(Type::forall(tv(0), var(0)), var(0));
            let right = arrow(Type::forall(tv(1), var(1)), var(1));
            assert!(!left.alpha_eq(&right));
        }
    }

    mod well_formed {
        use super::*;

        #[test]
        fn unbound_variable_is_reported() {
            let actual = var(0).well_formed(&BTreeSet::new());
            assert_eq!(actual, Err(TypeError::UnboundTypeVariable { var: tv(0) }));
        }

        #[test]
        fn scoped_variable_is_accepted() {
            assert_eq!(var(0).well_formed(&BTreeSet::from([tv(0)])), Ok(()));
        }

        #[test]
        fn quantifier_brings_variable_into_scope() {
            assert_eq!(id_type(0).well_formed(&BTreeSet::new()), Ok(()));
            let pkg = Type::exists(tv(1), arrow(var(1), Type::Int));
            assert_eq!(pkg.well_formed(&BTreeSet::new()), Ok(()));
        }

        #[test]
        fn first_unbound_variable_wins() {
            let ty = arrow(var(5), var(6));
            let actual = ty.well_formed(&BTreeSet::new());
            assert_eq!(actual, Err(TypeError::UnboundTypeVariable { var: tv(5) }));
        }

        #[test]
        fn quantifier_scope_ends_with_body() {
            let ty = arrow(Type::forall(tv(0), var(0)), var(0));
            let actual = ty.well_formed(&BTreeSet::new());
            assert_eq!(actual, Err(TypeError::UnboundTypeVariable { var: tv(0) }));
        }
    }

    mod subst {
        use super::*;

        #[test]
        fn replaces_matching_variable() {
            assert_eq!(var(0).subst(tv(0), &Type::Int), Type::Int);
        }

        #[test]
        fn leaves_other_variables() {
            assert_eq!(var(1).subst(tv(0), &Type::Int), var(1));
        }

        #[test]
        fn recurses_through_arrows_and_binders() {
            // [Int/t0](t0 -> ∀t1. t1 -> t0) = Int -> ∀t1. t1 -> Int
            let ty = arrow(var(0), Type::forall(tv(1), arrow(var(1), var(0))));
            let expected = arrow(Type::Int, Type::forall(tv(1), arrow(var(1), Type::Int)));
            assert_eq!(ty.subst(tv(0), &Type::Int), expected);
        }

        #[test]
        fn reused_binder_identity_is_not_protected() {
            // Binders are not consulted: a nested binder reusing `t0` is
            // substituted into as well. Fresh identities rule this out.
            let ty = Type::forall(tv(0), var(0));
            assert_eq!(ty.subst(tv(0), &Type::Int), Type::forall(tv(0), Type::Int));
        }
    }

    mod destructure {
        use super::*;

        #[test]
        fn get_arrow() {
            let ty = arrow(Type::Int, var(0));
            assert_eq!(ty.get_arrow(), Ok((&Type::Int, &var(0))));
            assert_eq!(
                Type::Int.get_arrow(),
                Err(TypeError::NotArrow { ty: Type::Int })
            );
        }

        #[test]
        fn get_forall() {
            let ty = id_type(0);
            let (bound, body) = ty.get_forall().unwrap();
            assert_eq!(bound, tv(0));
            assert_eq!(body, &arrow(var(0), var(0)));
            assert_eq!(
                var(0).get_forall(),
                Err(TypeError::NotForall { ty: var(0) })
            );
        }

        #[test]
        fn get_exists() {
            let ty = Type::exists(tv(2), var(2));
            assert_eq!(ty.get_exists(), Ok((tv(2), &var(2))));
            assert_eq!(
                id_type(0).get_exists(),
                Err(TypeError::NotExists { ty: id_type(0) })
            );
        }
    }

    mod escape {
        use super::*;

        #[test]
        fn free_occurrence_escapes() {
            assert!(!arrow(Type::Int, var(0)).not_escape(tv(0)));
        }

        #[test]
        fn absent_variable_does_not_escape() {
            assert!(arrow(Type::Int, var(1)).not_escape(tv(0)));
        }

        #[test]
        fn bound_occurrence_does_not_escape() {
            assert!(id_type(0).not_escape(tv(0)));
            assert!(Type::exists(tv(0), var(0)).not_escape(tv(0)));
        }

        #[test]
        fn free_type_vars_skips_bound() {
            let ty = arrow(var(2), Type::forall(tv(0), arrow(var(0), var(1))));
            assert_eq!(ty.free_type_vars(), BTreeSet::from([tv(1), tv(2)]));
        }
    }
}
