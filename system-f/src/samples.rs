//! Named sample programs with their expected outcome.
//!
//! There is no surface syntax, so the demo binary and the tests share this
//! catalogue of terms built through the smart constructors.

use crate::{
    ast::{Expr, TyVar, Type},
    error::{ErrorKind, Result},
    fresh::NameSupply,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Type(Type),
    Error(ErrorKind),
}

#[derive(Debug, Clone)]
pub struct Sample {
    pub name: &'static str,
    pub description: &'static str,
    pub expr: Expr,
    pub expected: Expected,
}

impl Sample {
    fn new(name: &'static str, description: &'static str, expr: Expr, expected: Expected) -> Self {
        Self {
            name,
            description,
            expr,
            expected,
        }
    }

    /// Whether a checking outcome agrees with the expectation. Types are
    /// compared up to renaming of bound variables.
    pub fn matches(&self, outcome: &Result<Type>) -> bool {
        match (&self.expected, outcome) {
            (Expected::Type(expected), Ok(actual)) => expected.alpha_eq(actual),
            (Expected::Error(kind), Err(err)) => err.kind() == *kind,
            _ => false,
        }
    }
}

fn arrow(t1: Type, t2: Type) -> Type {
    Type::arrow(t1, t2)
}

fn var(v: TyVar) -> Type {
    Type::var(v)
}

/// `∀a. a -> a`
fn poly_id_type(supply: &mut NameSupply) -> Type {
    let a = supply.fresh();
    Type::forall(a, arrow(var(a), var(a)))
}

/// `Λa. λx: a. x`
fn poly_id(supply: &mut NameSupply) -> Expr {
    let a = supply.fresh();
    Expr::tabs(a, Expr::abs("x", var(a), Expr::var("x")))
}

fn int_id() -> Expr {
    Expr::abs("x", Type::Int, Expr::var("x"))
}

/// `∀r. (a -> (a -> a) -> (a -> Int) -> r) -> r`: a counter interface over
/// the representation `a`, in continuation-passing style.
fn counter_interface(supply: &mut NameSupply, repr: Type) -> Type {
    let r = supply.fresh();
    let fields = arrow(
        repr.clone(),
        arrow(
            arrow(repr.clone(), repr.clone()),
            arrow(arrow(repr, Type::Int), var(r)),
        ),
    );
    Type::forall(r, arrow(fields, var(r)))
}

/// A counter represented by `Int`, hidden behind `∃a. counter_interface(a)`.
fn counter_package(supply: &mut NameSupply) -> Expr {
    let r = supply.fresh();
    let fields = arrow(
        Type::Int,
        arrow(
            arrow(Type::Int, Type::Int),
            arrow(arrow(Type::Int, Type::Int), var(r)),
        ),
    );
    let body = Expr::app(
        Expr::app(
            Expr::app(Expr::var("k"), Expr::int(0)),
            Expr::abs("n", Type::Int, Expr::var("n")),
        ),
        Expr::abs("n", Type::Int, Expr::var("n")),
    );
    let implementation = Expr::tabs(r, Expr::abs("k", fields, body));

    let a = supply.fresh();
    let interface = counter_interface(supply, var(a));
    Expr::pack(Type::Int, implementation, a, interface)
}

pub fn catalogue(supply: &mut NameSupply) -> Vec<Sample> {
    let mut samples = Vec::new();

    samples.push(Sample::new(
        "int",
        "an integer literal",
        Expr::int(42),
        Expected::Type(Type::Int),
    ));

    samples.push(Sample::new(
        "int-identity",
        "identity on integers",
        int_id(),
        Expected::Type(arrow(Type::Int, Type::Int)),
    ));

    let id = poly_id(supply);
    samples.push(Sample::new(
        "poly-identity",
        "polymorphic identity",
        id,
        Expected::Type(poly_id_type(supply)),
    ));

    let id = poly_id(supply);
    samples.push(Sample::new(
        "poly-identity-int",
        "polymorphic identity instantiated at Int and applied",
        Expr::app(Expr::tapp(id, Type::Int), Expr::int(5)),
        Expected::Type(Type::Int),
    ));

    let (a, b) = (supply.fresh(), supply.fresh());
    let konst = Expr::tabs(
        a,
        Expr::tabs(
            b,
            Expr::abs("x", var(a), Expr::abs("y", var(b), Expr::var("x"))),
        ),
    );
    let (c, d) = (supply.fresh(), supply.fresh());
    samples.push(Sample::new(
        "const",
        "polymorphic constant function",
        konst,
        Expected::Type(Type::forall(
            c,
            Type::forall(d, arrow(var(c), arrow(var(d), var(c)))),
        )),
    ));

    let a = supply.fresh();
    let two = Expr::tabs(
        a,
        Expr::abs(
            "f",
            arrow(var(a), var(a)),
            Expr::abs(
                "x",
                var(a),
                Expr::app(Expr::var("f"), Expr::app(Expr::var("f"), Expr::var("x"))),
            ),
        ),
    );
    let c = supply.fresh();
    samples.push(Sample::new(
        "church-two",
        "the Church numeral two",
        two,
        Expected::Type(Type::forall(
            c,
            arrow(arrow(var(c), var(c)), arrow(var(c), var(c))),
        )),
    ));

    // λf: (∀a. a -> a). f [∀c. c -> c] f
    let param_ty = poly_id_type(supply);
    let inst_ty = poly_id_type(supply);
    let self_app = Expr::abs(
        "f",
        param_ty.clone(),
        Expr::app(Expr::tapp(Expr::var("f"), inst_ty.clone()), Expr::var("f")),
    );
    samples.push(Sample::new(
        "self-application",
        "polymorphic identity applied to itself",
        self_app,
        Expected::Type(arrow(param_ty, inst_ty)),
    ));

    let (a, b) = (supply.fresh(), supply.fresh());
    samples.push(Sample::new(
        "pack",
        "an integer hidden behind an existential",
        Expr::pack(Type::Int, Expr::int(42), a, var(a)),
        Expected::Type(Type::exists(b, var(b))),
    ));

    let a = supply.fresh();
    let b = supply.fresh();
    samples.push(Sample::new(
        "unpack-escape",
        "unpacking and returning the hidden value leaks its type",
        Expr::unpack(
            b,
            "x",
            Expr::pack(Type::Int, Expr::int(42), a, var(a)),
            Expr::var("x"),
        ),
        Expected::Error(ErrorKind::Escape),
    ));

    let package = counter_package(supply);
    let a = supply.fresh();
    let interface = counter_interface(supply, var(a));
    samples.push(Sample::new(
        "counter",
        "an abstract counter package",
        package,
        Expected::Type(Type::exists(a, interface)),
    ));

    let package = counter_package(supply);
    let c = supply.fresh();
    let client = Expr::abs(
        "new",
        var(c),
        Expr::abs(
            "inc",
            arrow(var(c), var(c)),
            Expr::abs(
                "get",
                arrow(var(c), Type::Int),
                Expr::app(
                    Expr::var("get"),
                    Expr::app(Expr::var("inc"), Expr::var("new")),
                ),
            ),
        ),
    );
    samples.push(Sample::new(
        "counter-client",
        "using the counter only through its interface",
        Expr::unpack(
            c,
            "ctr",
            package,
            Expr::app(Expr::tapp(Expr::var("ctr"), Type::Int), client),
        ),
        Expected::Type(Type::Int),
    ));

    let a = supply.fresh();
    let b = supply.fresh();
    samples.push(Sample::new(
        "abstract-is-not-witness",
        "the hidden type cannot be used as its witness",
        Expr::unpack(
            b,
            "x",
            Expr::pack(Type::Int, Expr::int(42), a, var(a)),
            Expr::app(int_id(), Expr::var("x")),
        ),
        Expected::Error(ErrorKind::TypeMismatch),
    ));

    samples.push(Sample::new(
        "mismatch",
        "a function passed where an Int is expected",
        Expr::app(int_id(), int_id()),
        Expected::Error(ErrorKind::TypeMismatch),
    ));

    samples.push(Sample::new(
        "not-a-function",
        "applying an integer",
        Expr::app(Expr::int(1), Expr::int(2)),
        Expected::Error(ErrorKind::NotArrow),
    ));

    samples.push(Sample::new(
        "instantiate-monomorphic",
        "type application of a non-polymorphic term",
        Expr::tapp(Expr::int(1), Type::Int),
        Expected::Error(ErrorKind::NotForall),
    ));

    let a = supply.fresh();
    samples.push(Sample::new(
        "ill-formed-annotation",
        "a parameter annotated with an unbound type variable",
        Expr::abs("x", var(a), Expr::var("x")),
        Expected::Error(ErrorKind::UnboundTypeVariable),
    ));

    let b = supply.fresh();
    samples.push(Sample::new(
        "unpack-non-package",
        "unpacking something that is not an existential",
        Expr::unpack(b, "x", Expr::int(1), Expr::var("x")),
        Expected::Error(ErrorKind::NotExists),
    ));

    samples.push(Sample::new(
        "unbound",
        "a free value variable",
        Expr::var("y"),
        Expected::Error(ErrorKind::UnboundVariable),
    ));

    samples
}
