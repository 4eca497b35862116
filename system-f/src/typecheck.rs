use std::fmt;

use tracing::debug;

use crate::{
    ast::{Expr, TmVar, TyVar, Type},
    env::Env,
    error::{Result, TypeError},
};

#[derive(Debug)]
pub struct InferenceTree {
    pub rule: String,
    pub input: String,
    pub output: String,
    pub children: Vec<InferenceTree>,
}

impl InferenceTree {
    fn new(rule: &str, input: &str, output: &str, children: Vec<InferenceTree>) -> Self {
        Self {
            rule: rule.to_string(),
            input: input.to_string(),
            output: output.to_string(),
            children,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(
            f,
            "{:indent$}{}: {} {}",
            "",
            self.rule,
            self.input,
            self.output,
            indent = depth * 2
        )?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for InferenceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Structural type checker for System F with existential packages.
///
/// Checking never mints type variables; every binder identity comes from
/// the term being checked.
#[derive(Debug)]
pub struct TypeChecker {
    derivation: bool,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    pub fn new() -> Self {
        Self { derivation: true }
    }

    /// A checker that skips rendering judgements. Every tree it returns is
    /// an empty placeholder, so a type-only query stays linear in the term.
    pub fn without_derivation() -> Self {
        Self { derivation: false }
    }

    pub fn check(&self, env: &Env, expr: &Expr) -> Result<(Type, InferenceTree)> {
        match expr {
            Expr::LitInt(_) => self.check_lit_int(env, expr),
            Expr::Var(name) => self.check_var(env, expr, name),
            Expr::Abs(param, param_ty, body) => self.check_abs(env, expr, param, param_ty, body),
            Expr::App(func, arg) => self.check_app(env, expr, func, arg),
            Expr::TAbs(var, body) => self.check_tabs(env, expr, *var, body),
            Expr::TApp(func, arg) => self.check_tapp(env, expr, func, arg),
            Expr::Pack(witness, body, var, ty) => {
                self.check_pack(env, expr, witness, body, *var, ty)
            }
            Expr::Unpack(var, name, packed, cont) => {
                self.check_unpack(env, expr, *var, name, packed, cont)
            }
        }
    }

    fn node(
        &self,
        rule: &str,
        env: &Env,
        expr: &Expr,
        output: &Type,
        children: Vec<InferenceTree>,
    ) -> InferenceTree {
        if !self.derivation {
            return InferenceTree::new(rule, "", "", vec![]);
        }
        let input = format!("{} ⊢ {} ⇒", env, expr);
        InferenceTree::new(rule, &input, &output.to_string(), children)
    }

    // ───────────── (T-Int)
    //  Γ ⊢ n : Int
    fn check_lit_int(&self, env: &Env, expr: &Expr) -> Result<(Type, InferenceTree)> {
        let tree = self.node("T-Int", env, expr, &Type::Int, vec![]);
        Ok((Type::Int, tree))
    }

    //  x : A ∈ Γ
    // ─────────── (T-Var)
    //  Γ ⊢ x : A
    fn check_var(&self, env: &Env, expr: &Expr, name: &str) -> Result<(Type, InferenceTree)> {
        let ty = env.lookup(name)?.clone();
        debug!(rule = "T-Var", %name, %ty);
        let tree = self.node("T-Var", env, expr, &ty, vec![]);
        Ok((ty, tree))
    }

    //  Γ ⊢ A wf    Γ, x : A ⊢ e : B
    // ────────────────────────────── (T-Abs)
    //  Γ ⊢ λx: A. e : A → B
    fn check_abs(
        &self,
        env: &Env,
        expr: &Expr,
        param: &TmVar,
        param_ty: &Type,
        body: &Expr,
    ) -> Result<(Type, InferenceTree)> {
        env.well_formed(param_ty)?;

        let body_env = env.insert_term(param, param_ty.clone());
        let (body_ty, tree1) = self.check(&body_env, body)?;
        let result = Type::arrow(param_ty.clone(), body_ty);
        debug!(rule = "T-Abs", %param, ty = %result);

        let tree = self.node("T-Abs", env, expr, &result, vec![tree1]);
        Ok((result, tree))
    }

    //  Γ ⊢ e₁ : A → B    Γ ⊢ e₂ : A'    A ≡α A'
    // ────────────────────────────────────────── (T-App)
    //  Γ ⊢ e₁ e₂ : B
    fn check_app(
        &self,
        env: &Env,
        expr: &Expr,
        func: &Expr,
        arg: &Expr,
    ) -> Result<(Type, InferenceTree)> {
        let (func_ty, tree1) = self.check(env, func)?;
        let (domain, codomain) = func_ty.get_arrow()?;
        let (arg_ty, tree2) = self.check(env, arg)?;

        if !domain.alpha_eq(&arg_ty) {
            debug!(rule = "T-App", expected = %domain, actual = %arg_ty, "argument mismatch");
            return Err(TypeError::TypeMismatch {
                expected: domain.clone(),
                actual: arg_ty,
            });
        }

        let result = codomain.clone();
        debug!(rule = "T-App", ty = %result);
        let tree = self.node("T-App", env, expr, &result, vec![tree1, tree2]);
        Ok((result, tree))
    }

    //  Γ, α ⊢ e : A
    // ──────────────────── (T-TAbs)
    //  Γ ⊢ Λα. e : ∀α. A
    fn check_tabs(
        &self,
        env: &Env,
        expr: &Expr,
        var: TyVar,
        body: &Expr,
    ) -> Result<(Type, InferenceTree)> {
        let body_env = env.insert_type(var);
        let (body_ty, tree1) = self.check(&body_env, body)?;
        let result = Type::forall(var, body_ty);
        debug!(rule = "T-TAbs", %var, ty = %result);

        let tree = self.node("T-TAbs", env, expr, &result, vec![tree1]);
        Ok((result, tree))
    }

    //  Γ ⊢ e : ∀α. A    Γ ⊢ B wf
    // ─────────────────────────── (T-TApp)
    //  Γ ⊢ e [B] : [B/α]A
    fn check_tapp(
        &self,
        env: &Env,
        expr: &Expr,
        func: &Expr,
        arg: &Type,
    ) -> Result<(Type, InferenceTree)> {
        let (func_ty, tree1) = self.check(env, func)?;
        let (var, body) = func_ty.get_forall()?;
        env.well_formed(arg)?;

        let result = body.subst(var, arg);
        debug!(rule = "T-TApp", %var, arg = %arg, ty = %result);
        let tree = self.node("T-TApp", env, expr, &result, vec![tree1]);
        Ok((result, tree))
    }

    //  Γ ⊢ W wf    Γ ⊢ ∃α. A wf    Γ ⊢ e : A'    A' ≡α [W/α]A
    // ───────────────────────────────────────────────────────── (T-Pack)
    //  Γ ⊢ pack [W, e] as ∃α. A : ∃α. A
    fn check_pack(
        &self,
        env: &Env,
        expr: &Expr,
        witness: &Type,
        body: &Expr,
        var: TyVar,
        ty: &Type,
    ) -> Result<(Type, InferenceTree)> {
        let result = Type::exists(var, ty.clone());

        env.well_formed(witness)?;
        env.insert_type(var).well_formed(&result)?;

        let (body_ty, tree1) = self.check(env, body)?;
        let expected = ty.subst(var, witness);
        if !expected.alpha_eq(&body_ty) {
            debug!(rule = "T-Pack", %expected, actual = %body_ty, "package body mismatch");
            return Err(TypeError::TypeMismatch {
                expected,
                actual: body_ty,
            });
        }

        debug!(rule = "T-Pack", %witness, ty = %result);
        let tree = self.node("T-Pack", env, expr, &result, vec![tree1]);
        Ok((result, tree))
    }

    //  Γ ⊢ e₁ : ∃β. A    Γ, α, x : [α/β]A ⊢ e₂ : B    α ∉ ftv(B)
    // ─────────────────────────────────────────────────────────── (T-Unpack)
    //  Γ ⊢ unpack [α, x] = e₁ in e₂ : B
    fn check_unpack(
        &self,
        env: &Env,
        expr: &Expr,
        var: TyVar,
        name: &TmVar,
        packed: &Expr,
        cont: &Expr,
    ) -> Result<(Type, InferenceTree)> {
        let (packed_ty, tree1) = self.check(env, packed)?;
        let (bound, body) = packed_ty.get_exists()?;
        let opened = body.subst(bound, &Type::var(var));

        let cont_env = env.insert_type(var).insert_term(name, opened);
        let (result, tree2) = self.check(&cont_env, cont)?;

        if !result.not_escape(var) {
            debug!(rule = "T-Unpack", %var, ty = %result, "abstract type escapes");
            return Err(TypeError::Escape { var, ty: result });
        }

        debug!(rule = "T-Unpack", %var, %name, ty = %result);
        let tree = self.node("T-Unpack", env, expr, &result, vec![tree1, tree2]);
        Ok((result, tree))
    }
}

/// Type of `expr` in the empty environment.
pub fn type_of(expr: &Expr) -> Result<Type> {
    type_of_in(&Env::empty(), expr)
}

pub fn type_of_in(env: &Env, expr: &Expr) -> Result<Type> {
    TypeChecker::without_derivation()
        .check(env, expr)
        .map(|(ty, _)| ty)
}

/// Checks `expr` in the empty environment, keeping the derivation.
pub fn run_checker(expr: &Expr) -> Result<(Type, InferenceTree)> {
    TypeChecker::new().check(&Env::empty(), expr)
}
