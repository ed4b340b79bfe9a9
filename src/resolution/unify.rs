//! Unification over flat terms (variables and constants).
//!
//! With no function symbols a binding can never contain the variable it
//! binds, so no occurs check is needed.

use std::collections::HashMap;

use super::clause::{Literal, Term};

/// Variable bindings, kept triangular: a bound term may itself be a bound
/// variable, and [`Substitution::walk`] follows the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: HashMap<String, Term>,
}

impl Substitution {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    #[inline]
    pub fn len(&self) -> usize { self.bindings.len() }

    /// Resolve `term` through the bindings.
    pub fn walk<'a>(&'a self, mut term: &'a Term) -> &'a Term {
        while let Term::Var(name) = term {
            match self.bindings.get(name) {
                Some(next) => term = next,
                None => break,
            }
        }
        term
    }

    pub fn apply_term(&self, term: &Term) -> Term { self.walk(term).clone() }

    pub fn apply_literal(&self, lit: &Literal) -> Literal {
        Literal {
            predicate: lit.predicate.clone(),
            negated: lit.negated,
            args: lit.args.iter().map(|a| self.apply_term(a)).collect(),
        }
    }

    /// Extend the bindings so that `a` and `b` become equal.
    pub fn unify_terms(&mut self, a: &Term, b: &Term) -> bool {
        let a = self.walk(a).clone();
        let b = self.walk(b).clone();
        match (&a, &b) {
            _ if a == b => true,
            (Term::Var(v), _) => {
                self.bindings.insert(v.clone(), b.clone());
                true
            }
            (_, Term::Var(v)) => {
                self.bindings.insert(v.clone(), a.clone());
                true
            }
            _ => false,
        }
    }
}

/// Most general unifier of the atoms of `a` and `b`, ignoring sign.
///
/// ```
/// use ai_coursework::resolution::{unify, Literal, Term};
/// let a = Literal::new("Likes", false, vec![Term::parse("x"), Term::parse("Pizza")]);
/// let b = Literal::new("Likes", true, vec![Term::parse("Ann"), Term::parse("y")]);
/// let s = unify(&a, &b).unwrap();
/// assert_eq!(s.apply_literal(&a).to_string(), "Likes(Ann,Pizza)");
/// ```
pub fn unify(a: &Literal, b: &Literal) -> Option<Substitution> {
    if a.predicate != b.predicate || a.args.len() != b.args.len() {
        return None;
    }
    let mut subst = Substitution::new();
    for (x, y) in a.args.iter().zip(&b.args) {
        if !subst.unify_terms(x, y) {
            return None;
        }
    }
    Some(subst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(name: &str, args: &[&str]) -> Literal {
        Literal::new(name, false, args.iter().map(|a| Term::parse(a)).collect())
    }

    #[test]
    fn it_unifies_through_chains() {
        let a = lit("P", &["x", "x", "B"]);
        let b = lit("P", &["y", "z", "z"]);
        let s = unify(&a, &b).unwrap();
        assert_eq!(s.apply_literal(&a), lit("P", &["B", "B", "B"]));
        assert_eq!(s.apply_literal(&b), lit("P", &["B", "B", "B"]));
    }

    #[test]
    fn clashing_constants_fail() {
        assert!(unify(&lit("P", &["A", "x"]), &lit("P", &["B", "y"])).is_none());
        assert!(unify(&lit("P", &["x", "x"]), &lit("P", &["A", "B"])).is_none());
    }

    #[test]
    fn predicate_and_arity_must_match() {
        assert!(unify(&lit("P", &["x"]), &lit("Q", &["x"])).is_none());
        assert!(unify(&lit("P", &["x"]), &lit("P", &["x", "y"])).is_none());
    }

    #[test]
    fn identical_literals_need_no_bindings() {
        let s = unify(&lit("P", &["x", "A"]), &lit("P", &["x", "A"])).unwrap();
        assert!(s.is_empty());
    }
}
