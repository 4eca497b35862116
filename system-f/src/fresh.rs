use crate::ast::TyVar;

/// Source of fresh type variable identities.
///
/// Every binder (`Λ`, `∀`, `∃`, `pack`, `unpack`) must be given an identity
/// drawn from a supply and never reused for another binder: substitution
/// relies on this to stay capture-free without renaming.
///
/// The counter is an ordinary value. Callers that build terms in several
/// stages pass the same supply along, or resume one with
/// [`NameSupply::starting_at`] from a saved [`NameSupply::counter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSupply {
    counter: usize,
}

impl NameSupply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(counter: usize) -> Self {
        Self { counter }
    }

    pub fn fresh(&mut self) -> TyVar {
        let var = TyVar(self.counter);
        self.counter += 1;
        var
    }

    /// The index the next call to [`NameSupply::fresh`] will hand out.
    pub fn counter(&self) -> usize {
        self.counter
    }
}
