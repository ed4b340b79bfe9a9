use std::collections::HashMap;
use std::fmt;

use super::cnf::{to_cnf, Formula};

/// A flat argument. Identifiers starting with a lowercase letter are
/// variables, anything else is a constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Var(String),
    Const(String),
}

impl Term {
    pub fn parse(ident: &str) -> Term {
        match ident.chars().next() {
            Some(c) if c.is_lowercase() => Term::Var(ident.to_string()),
            _ => Term::Const(ident.to_string()),
        }
    }

    #[inline]
    pub fn is_var(&self) -> bool { matches!(self, Term::Var(_)) }

    pub fn name(&self) -> &str {
        match self {
            Term::Var(n) | Term::Const(n) => n,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub predicate: String,
    pub negated: bool,
    pub args: Vec<Term>,
}

impl Literal {
    pub fn new(predicate: impl Into<String>, negated: bool, args: Vec<Term>) -> Self {
        Literal { predicate: predicate.into(), negated, args }
    }

    pub fn negate(&self) -> Literal {
        Literal { negated: !self.negated, ..self.clone() }
    }

    #[inline]
    pub fn is_ground(&self) -> bool { !self.args.iter().any(Term::is_var) }

    /// Same predicate and arity, opposite sign.
    #[inline]
    pub fn complements(&self, other: &Literal) -> bool {
        self.negated != other.negated && self.predicate == other.predicate && self.args.len() == other.args.len()
    }

    fn rename_vars(&mut self, mut rename: impl FnMut(&str) -> String) {
        for arg in &mut self.args {
            if let Term::Var(name) = arg {
                let renamed = rename(name);
                *name = renamed;
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("~")?;
        }
        f.write_str(&self.predicate)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, a) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{a}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Where a clause came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Produced from the given input sentence (0-based).
    Input { sentence: usize },
    /// The negated query.
    Query,
    Resolvent { left: usize, right: usize },
    Factor { parent: usize },
}

/// A disjunction of literals. Literals are kept sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub id: usize,
    pub literals: Vec<Literal>,
    pub origin: Origin,
}

impl Clause {
    pub fn new(id: usize, mut literals: Vec<Literal>, origin: Origin) -> Self {
        literals.sort();
        literals.dedup();
        Clause { id, literals, origin }
    }

    #[inline]
    pub fn is_empty(&self) -> bool { self.literals.is_empty() }

    #[inline]
    pub fn is_unit(&self) -> bool { self.literals.len() == 1 }

    #[inline]
    pub fn len(&self) -> usize { self.literals.len() }

    pub fn is_ground(&self) -> bool { self.literals.iter().all(Literal::is_ground) }

    /// True when the clause holds both `L` and `~L`.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .enumerate()
            .any(|(i, a)| self.literals[i + 1..].iter().any(|b| a.complements(b) && a.args == b.args))
    }

    /// Copy with every variable suffixed by `tag`.
    pub fn renamed(&self, tag: &str) -> Vec<Literal> {
        self.literals
            .iter()
            .cloned()
            .map(|mut l| {
                l.rename_vars(|v| format!("{v}_{tag}"));
                l
            })
            .collect()
    }

    /// Rename variables to `v0`, `v1`, ... in order of appearance.
    pub fn normalize_vars(&mut self) {
        let mut names: HashMap<String, String> = HashMap::new();
        for l in &mut self.literals {
            l.rename_vars(|v| {
                let next = names.len();
                names.entry(v.to_string()).or_insert_with(|| format!("v{next}")).clone()
            });
        }
        self.literals.sort();
        self.literals.dedup();
    }

    /// Text that is equal for two clauses exactly when they are variants of
    /// each other (equal up to variable names), modulo literal order ties.
    pub fn variant_key(&self) -> String {
        let shape = |l: &Literal| {
            let mut l = l.clone();
            l.rename_vars(|_| String::from("_"));
            l
        };
        let mut lits = self.literals.clone();
        lits.sort_by_cached_key(shape);
        let mut names: HashMap<String, String> = HashMap::new();
        let mut out = String::new();
        for (i, mut l) in lits.into_iter().enumerate() {
            l.rename_vars(|v| {
                let next = names.len();
                names.entry(v.to_string()).or_insert_with(|| format!("v{next}")).clone()
            });
            if i > 0 {
                out.push('|');
            }
            out.push_str(&l.to_string());
        }
        out
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return f.write_str("[]");
        }
        for (i, l) in self.literals.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{l}")?;
        }
        Ok(())
    }
}

/// An ordered clause store with a predicate-name index.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    clauses: Vec<Clause>,
    index: HashMap<String, Vec<(usize, usize)>>,
}

impl KnowledgeBase {
    pub fn new() -> Self { Self::default() }

    /// Convert `formula` to clauses and add them, with its variables renamed
    /// apart using `sentence`. Tautologies are dropped. Returns the number of
    /// clauses added.
    pub fn tell(&mut self, sentence: usize, formula: Formula) -> usize {
        let tag = format!("s{sentence}");
        let mut added = 0;
        for lits in to_cnf(formula) {
            let lits = lits
                .into_iter()
                .map(|mut l| {
                    l.rename_vars(|v| format!("{v}_{tag}"));
                    l
                })
                .collect();
            let clause = Clause::new(self.clauses.len(), lits, Origin::Input { sentence });
            if clause.is_tautology() {
                continue;
            }
            self.push(clause);
            added += 1;
        }
        added
    }

    /// Append `clause`, reassigning its id to its position.
    pub fn push(&mut self, mut clause: Clause) -> usize {
        let id = self.clauses.len();
        clause.id = id;
        for (i, l) in clause.literals.iter().enumerate() {
            self.index.entry(l.predicate.clone()).or_default().push((id, i));
        }
        self.clauses.push(clause);
        id
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&Clause> { self.clauses.get(id) }

    #[inline]
    pub fn clauses(&self) -> &[Clause] { &self.clauses }

    #[inline]
    pub fn len(&self) -> usize { self.clauses.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.clauses.is_empty() }

    /// `(clause id, literal index)` of every literal over `predicate`.
    pub fn occurrences(&self, predicate: &str) -> &[(usize, usize)] {
        self.index.get(predicate).map(Vec::as_slice).unwrap_or(&[])
    }
}
