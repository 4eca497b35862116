use thiserror::Error;

use crate::ast::{TmVar, TyVar, Type};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    #[error("unbound variable: {name}")]
    UnboundVariable { name: TmVar },
    #[error("unbound type variable: {var}")]
    UnboundTypeVariable { var: TyVar },
    #[error("expected a function type, found {ty}")]
    NotArrow { ty: Type },
    #[error("expected a universal type, found {ty}")]
    NotForall { ty: Type },
    #[error("expected an existential type, found {ty}")]
    NotExists { ty: Type },
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: Type, actual: Type },
    #[error("abstract type {var} escapes its scope in {ty}")]
    Escape { var: TyVar, ty: Type },
}

/// Field-less discriminant of [`TypeError`], for matching outcomes without
/// caring about the carried types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnboundVariable,
    UnboundTypeVariable,
    NotArrow,
    NotForall,
    NotExists,
    TypeMismatch,
    Escape,
}

impl TypeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TypeError::UnboundVariable { .. } => ErrorKind::UnboundVariable,
            TypeError::UnboundTypeVariable { .. } => ErrorKind::UnboundTypeVariable,
            TypeError::NotArrow { .. } => ErrorKind::NotArrow,
            TypeError::NotForall { .. } => ErrorKind::NotForall,
            TypeError::NotExists { .. } => ErrorKind::NotExists,
            TypeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            TypeError::Escape { .. } => ErrorKind::Escape,
        }
    }
}

pub type Result<T> = std::result::Result<T, TypeError>;
