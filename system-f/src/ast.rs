use std::fmt;

/// Type variable identity, minted by [`crate::fresh::NameSupply`].
///
/// Two identities are equal iff they came from the same `fresh()` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TyVar(pub usize);

impl fmt::Display for TyVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

pub type TmVar = String;

// Value-level AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    LitInt(i64),                                  // Integer literal
    Var(TmVar),                                   // Variable: x
    Abs(TmVar, Box<Type>, Box<Expr>),             // Lambda abstraction: λx: T. e
    App(Box<Expr>, Box<Expr>),                    // Application: e₁ e₂
    TAbs(TyVar, Box<Expr>),                       // Type abstraction: Λα. e
    TApp(Box<Expr>, Box<Type>),                   // Type application: e [T]
    Pack(Box<Type>, Box<Expr>, TyVar, Box<Type>), // pack [W, e] as ∃α. A
    Unpack(TyVar, TmVar, Box<Expr>, Box<Expr>),   // unpack [α, x] = e₁ in e₂
}

impl Expr {
    pub fn int(n: i64) -> Self {
        Expr::LitInt(n)
    }

    pub fn var(name: &str) -> Self {
        Expr::Var(name.to_string())
    }

    pub fn abs(param: &str, param_ty: Type, body: Expr) -> Self {
        Expr::Abs(param.to_string(), Box::new(param_ty), Box::new(body))
    }

    pub fn app(func: Expr, arg: Expr) -> Self {
        Expr::App(Box::new(func), Box::new(arg))
    }

    pub fn tabs(var: TyVar, body: Expr) -> Self {
        Expr::TAbs(var, Box::new(body))
    }

    pub fn tapp(expr: Expr, arg: Type) -> Self {
        Expr::TApp(Box::new(expr), Box::new(arg))
    }

    /// `pack [witness, expr] as ∃var. body`; `expr` must have type
    /// `body[var := witness]`.
    pub fn pack(witness: Type, expr: Expr, var: TyVar, body: Type) -> Self {
        Expr::Pack(Box::new(witness), Box::new(expr), var, Box::new(body))
    }

    /// `unpack [var, name] = packed in cont`.
    pub fn unpack(var: TyVar, name: &str, packed: Expr, cont: Expr) -> Self {
        Expr::Unpack(var, name.to_string(), Box::new(packed), Box::new(cont))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::LitInt(n) => write!(f, "{}", n),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Abs(param, ty, body) => write!(f, "λ{}: {}. {}", param, ty, body),
            Expr::App(func, arg) => {
                match func.as_ref() {
                    Expr::Abs(..) | Expr::TAbs(..) | Expr::Pack(..) | Expr::Unpack(..) => {
                        write!(f, "({})", func)?
                    }
                    _ => write!(f, "{}", func)?,
                }
                match arg.as_ref() {
                    Expr::LitInt(_) | Expr::Var(_) => write!(f, " {}", arg),
                    _ => write!(f, " ({})", arg),
                }
            }
            Expr::TAbs(var, body) => write!(f, "Λ{}. {}", var, body),
            Expr::TApp(expr, ty) => match expr.as_ref() {
                Expr::Abs(..) | Expr::TAbs(..) | Expr::Pack(..) | Expr::Unpack(..) => {
                    write!(f, "({}) [{}]", expr, ty)
                }
                _ => write!(f, "{} [{}]", expr, ty),
            },
            Expr::Pack(witness, expr, var, body) => {
                write!(f, "pack [{}, {}] as ∃{}. {}", witness, expr, var, body)
            }
            Expr::Unpack(var, name, packed, cont) => {
                write!(f, "unpack [{}, {}] = {} in {}", var, name, packed, cont)
            }
        }
    }
}

// Type-level AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,                         // Int
    Arrow(Box<Type>, Box<Type>), // A → B
    Var(TyVar),                  // α
    Forall(TyVar, Box<Type>),    // ∀α. A
    Exists(TyVar, Box<Type>),    // ∃α. A
}

impl Type {
    pub fn arrow(domain: Type, codomain: Type) -> Self {
        Type::Arrow(Box::new(domain), Box::new(codomain))
    }

    pub fn var(var: TyVar) -> Self {
        Type::Var(var)
    }

    pub fn forall(var: TyVar, body: Type) -> Self {
        Type::Forall(var, Box::new(body))
    }

    pub fn exists(var: TyVar, body: Type) -> Self {
        Type::Exists(var, Box::new(body))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "Int"),
            Type::Var(var) => write!(f, "{}", var),
            Type::Arrow(t1, t2) => match t1.as_ref() {
                Type::Arrow(..) | Type::Forall(..) | Type::Exists(..) => {
                    write!(f, "({}) -> {}", t1, t2)
                }
                _ => write!(f, "{} -> {}", t1, t2),
            },
            Type::Forall(var, body) => write!(f, "∀{}. {}", var, body),
            Type::Exists(var, body) => write!(f, "∃{}. {}", var, body),
        }
    }
}
