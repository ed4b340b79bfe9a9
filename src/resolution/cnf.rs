use std::fmt;

use super::clause::Literal;

/// Parsed sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// A positive atom.
    Atom(Literal),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn not(f: Formula) -> Formula { Formula::Not(Box::new(f)) }

    pub fn and(a: Formula, b: Formula) -> Formula { Formula::And(Box::new(a), Box::new(b)) }

    pub fn or(a: Formula, b: Formula) -> Formula { Formula::Or(Box::new(a), Box::new(b)) }

    pub fn implies(a: Formula, b: Formula) -> Formula { Formula::Implies(Box::new(a), Box::new(b)) }

    /// The literal this formula denotes, if it is an atom or a negated atom.
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Formula::Atom(l) => Some(l.clone()),
            Formula::Not(inner) => inner.as_literal().map(|l| l.negate()),
            _ => None,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(l) => write!(f, "{l}"),
            Formula::Not(a) => write!(f, "~{a}"),
            Formula::And(a, b) => write!(f, "({a} & {b})"),
            Formula::Or(a, b) => write!(f, "({a} | {b})"),
            Formula::Implies(a, b) => write!(f, "({a} => {b})"),
        }
    }
}

/// Rewrite `a => b` as `~a | b` throughout.
pub fn eliminate_implications(f: Formula) -> Formula {
    match f {
        Formula::Implies(a, b) => Formula::or(Formula::not(eliminate_implications(*a)), eliminate_implications(*b)),
        Formula::Not(a) => Formula::not(eliminate_implications(*a)),
        Formula::And(a, b) => Formula::and(eliminate_implications(*a), eliminate_implications(*b)),
        Formula::Or(a, b) => Formula::or(eliminate_implications(*a), eliminate_implications(*b)),
        atom @ Formula::Atom(_) => atom,
    }
}

/// Push negations down to the atoms (De Morgan, double negation).
///
/// Expects an implication-free formula. Negated atoms come back as
/// `Atom` with `negated` set.
pub fn negation_normal_form(f: Formula) -> Formula {
    nnf(f, false)
}

fn nnf(f: Formula, negate: bool) -> Formula {
    match f {
        Formula::Atom(l) => Formula::Atom(if negate { l.negate() } else { l }),
        Formula::Not(a) => nnf(*a, !negate),
        Formula::And(a, b) if negate => Formula::or(nnf(*a, true), nnf(*b, true)),
        Formula::Or(a, b) if negate => Formula::and(nnf(*a, true), nnf(*b, true)),
        Formula::And(a, b) => Formula::and(nnf(*a, false), nnf(*b, false)),
        Formula::Or(a, b) => Formula::or(nnf(*a, false), nnf(*b, false)),
        // a => b  ==  ~a | b
        Formula::Implies(a, b) if negate => Formula::and(nnf(*a, false), nnf(*b, true)),
        Formula::Implies(a, b) => Formula::or(nnf(*a, true), nnf(*b, false)),
    }
}

/// Clauses of a formula in negation normal form, distributing OR over AND.
fn distribute(f: Formula) -> Vec<Vec<Literal>> {
    match f {
        Formula::Atom(l) => vec![vec![l]],
        Formula::And(a, b) => {
            let mut out = distribute(*a);
            out.extend(distribute(*b));
            out
        }
        Formula::Or(a, b) => {
            let left = distribute(*a);
            let right = distribute(*b);
            let mut out = Vec::with_capacity(left.len() * right.len());
            for l in &left {
                for r in &right {
                    out.push(l.iter().chain(r).cloned().collect());
                }
            }
            out
        }
        // Not and Implies only reach here when nnf was skipped.
        other => distribute(nnf(other, false)),
    }
}

/// Conjunctive normal form: a list of clauses, each a list of literals.
///
/// ```
/// use ai_coursework::resolution::{parse_sentence, to_cnf};
/// let cnf = to_cnf(parse_sentence("A(x) & B(x) => C(x) | D(x)").unwrap());
/// let text: Vec<String> = cnf[0].iter().map(|l| l.to_string()).collect();
/// assert_eq!(text, ["~A(x)", "~B(x)", "C(x)", "D(x)"]);
/// ```
pub fn to_cnf(f: Formula) -> Vec<Vec<Literal>> {
    distribute(negation_normal_form(eliminate_implications(f)))
}
