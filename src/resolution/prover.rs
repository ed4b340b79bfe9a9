use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::clause::{Clause, KnowledgeBase, Literal, Origin};
use super::unify::unify;

/// Prover limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Give up once the clause store holds this many clauses.
    pub max_clauses: usize,
    /// Add factors of each given clause.
    pub factoring: bool,
}

impl Default for ProverConfig {
    fn default() -> Self { Self { max_clauses: 10_000, factoring: true } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofOutcome {
    /// The empty clause was derived.
    Proved,
    /// Every clause was processed without a contradiction.
    Saturated,
    /// `max_clauses` was hit first.
    LimitReached,
}

impl ProofOutcome {
    #[inline]
    pub fn is_proved(self) -> bool { self == ProofOutcome::Proved }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProverStats {
    pub given: u64,
    pub resolvents: u64,
    pub factors: u64,
    pub duplicates: u64,
    pub tautologies: u64,
}

/// Binary resolvent of `left` on literal `i` and `right` on literal `j`.
///
/// The clauses must not share variables.
pub fn resolve(left: &Clause, i: usize, right: &Clause, j: usize) -> Option<Vec<Literal>> {
    let a = left.literals.get(i)?;
    let b = right.literals.get(j)?;
    if !a.complements(b) {
        return None;
    }
    let subst = unify(a, b)?;
    let rest_left = left.literals.iter().enumerate().filter(|&(k, _)| k != i);
    let rest_right = right.literals.iter().enumerate().filter(|&(k, _)| k != j);
    Some(rest_left.chain(rest_right).map(|(_, l)| subst.apply_literal(l)).collect())
}

/// Factors of `clause`: one per pair of same-sign literals that unify.
pub fn factor(clause: &Clause) -> Vec<Vec<Literal>> {
    let lits = &clause.literals;
    let mut out = Vec::new();
    for i in 0..lits.len() {
        for j in i + 1..lits.len() {
            if lits[i].negated != lits[j].negated {
                continue;
            }
            if let Some(subst) = unify(&lits[i], &lits[j]) {
                if subst.is_empty() {
                    continue;
                }
                out.push(
                    lits.iter()
                        .enumerate()
                        .filter(|&(k, _)| k != j)
                        .map(|(_, l)| subst.apply_literal(l))
                        .collect(),
                );
            }
        }
    }
    out
}

/// Agenda entry; shorter clauses first, then older ones.
#[derive(Debug, PartialEq, Eq)]
struct Pending {
    len: usize,
    id: usize,
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap.
        other.len.cmp(&self.len).then_with(|| other.id.cmp(&self.id))
    }
}

/// Given-clause refutation prover with unit preference.
///
/// Each round takes the shortest unprocessed clause, resolves it against
/// every processed clause holding a complementary literal (found through the
/// predicate index), and queues the new clauses. Variants of clauses already
/// seen are dropped.
pub struct Prover {
    cfg: ProverConfig,
    stats: ProverStats,
}

impl Prover {
    pub fn new() -> Self { Self::with_config(ProverConfig::default()) }

    pub fn with_config(cfg: ProverConfig) -> Self { Self { cfg, stats: ProverStats::default() } }

    #[inline]
    pub fn config(&self) -> &ProverConfig { &self.cfg }

    #[inline]
    pub fn last_stats(&self) -> ProverStats { self.stats }

    /// Try to refute `kb` plus the negation of `query`.
    pub fn prove(&mut self, kb: &KnowledgeBase, query: &Literal) -> ProofOutcome {
        self.stats = ProverStats::default();
        let mut store = kb.clone();
        let mut seen: HashSet<String> = store.clauses().iter().map(Clause::variant_key).collect();
        let goal = Clause::new(0, vec![query.negate()], Origin::Query);
        if seen.insert(goal.variant_key()) {
            store.push(goal);
        }
        let mut agenda: BinaryHeap<Pending> =
            store.clauses().iter().map(|c| Pending { len: c.len(), id: c.id }).collect();
        let mut processed = vec![false; store.len()];

        let outcome = loop {
            let Some(Pending { id: given_id, .. }) = agenda.pop() else {
                break ProofOutcome::Saturated;
            };
            let Some(given) = store.get(given_id).cloned() else {
                continue;
            };
            self.stats.given += 1;
            processed[given_id] = true;
            trace!(id = given_id, clause = %given, "given");

            let mut fresh = Vec::new();
            if self.cfg.factoring {
                for lits in factor(&given) {
                    self.stats.factors += 1;
                    fresh.push(Clause::new(0, lits, Origin::Factor { parent: given_id }));
                }
            }
            for (i, lit) in given.literals.iter().enumerate() {
                for &(partner_id, j) in store.occurrences(&lit.predicate) {
                    if !processed[partner_id] {
                        continue;
                    }
                    let Some(partner) = store.get(partner_id) else { continue };
                    if !lit.complements(&partner.literals[j]) {
                        continue;
                    }
                    let renamed = Clause { id: partner.id, literals: partner.renamed("r"), origin: partner.origin };
                    if let Some(lits) = resolve(&given, i, &renamed, j) {
                        self.stats.resolvents += 1;
                        fresh.push(Clause::new(0, lits, Origin::Resolvent { left: given_id, right: partner_id }));
                    }
                }
            }

            let mut limit_hit = false;
            let mut proved = false;
            for mut clause in fresh {
                clause.normalize_vars();
                if clause.is_empty() {
                    debug!(origin = ?clause.origin, "derived the empty clause");
                    proved = true;
                    break;
                }
                if clause.is_tautology() {
                    self.stats.tautologies += 1;
                    continue;
                }
                if !seen.insert(clause.variant_key()) {
                    self.stats.duplicates += 1;
                    continue;
                }
                if store.len() >= self.cfg.max_clauses {
                    limit_hit = true;
                    break;
                }
                trace!(clause = %clause, origin = ?clause.origin, "derived");
                let len = clause.len();
                let id = store.push(clause);
                processed.push(false);
                agenda.push(Pending { len, id });
            }
            if proved {
                break ProofOutcome::Proved;
            }
            if limit_hit {
                break ProofOutcome::LimitReached;
            }
        };

        debug!(
            ?outcome,
            query = %query,
            clauses = store.len(),
            given = self.stats.given,
            resolvents = self.stats.resolvents,
            duplicates = self.stats.duplicates,
            "resolution finished"
        );
        outcome
    }
}

impl Default for Prover {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::{parse_literal, parse_sentence};

    fn kb(sentences: &[&str]) -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        for (i, s) in sentences.iter().enumerate() {
            kb.tell(i, parse_sentence(s).unwrap());
        }
        kb
    }

    fn prove(sentences: &[&str], query: &str) -> ProofOutcome {
        Prover::new().prove(&kb(sentences), &parse_literal(query).unwrap())
    }

    #[test]
    fn it_proves_modus_ponens() {
        let facts = ["Hungry(Tom)", "Hungry(x) => Eats(x)"];
        assert_eq!(prove(&facts, "Eats(Tom)"), ProofOutcome::Proved);
        assert_eq!(prove(&facts, "Eats(Ann)"), ProofOutcome::Saturated);
    }

    #[test]
    fn it_proves_negated_queries() {
        let facts = ["Vegan(x) => ~Likes(x,Steak)", "Vegan(Ann)"];
        assert!(prove(&facts, "~Likes(Ann,Steak)").is_proved());
        assert!(!prove(&facts, "Likes(Ann,Steak)").is_proved());
    }

    #[test]
    fn it_chains_conjunctive_rules() {
        let facts = [
            "Seated(x) & Menu(y) => CanOrder(x,y)",
            "CanOrder(x,y) & Hungry(x) => Order(x,y)",
            "Seated(Ann)",
            "Menu(Pasta)",
            "Hungry(Ann)",
        ];
        assert!(prove(&facts, "Order(Ann,Pasta)").is_proved());
        assert!(!prove(&facts, "Order(Bob,Pasta)").is_proved());
    }

    #[test]
    fn it_reasons_by_cases() {
        let facts = ["Cash(Ann) | Card(Ann)", "Cash(x) => Pays(x)", "Card(x) => Pays(x)"];
        assert!(prove(&facts, "Pays(Ann)").is_proved());
    }

    #[test]
    fn factoring_is_needed_for_some_refutations() {
        let facts = kb(&["P(x) | P(y)", "~P(u) | ~P(v)"]);
        let query = parse_literal("Q(A)").unwrap();
        let mut with = Prover::new();
        assert_eq!(with.prove(&facts, &query), ProofOutcome::Proved);
        let mut without = Prover::with_config(ProverConfig { factoring: false, ..Default::default() });
        assert_eq!(without.prove(&facts, &query), ProofOutcome::Saturated);
        assert!(without.last_stats().duplicates > 0);
    }

    #[test]
    fn clause_limit_stops_the_search() {
        let facts = kb(&["A(x) => B(x)", "B(x) => C(x)", "A(Tom)"]);
        let mut p = Prover::with_config(ProverConfig { max_clauses: 1, ..Default::default() });
        assert_eq!(p.prove(&facts, &parse_literal("C(Tom)").unwrap()), ProofOutcome::LimitReached);
    }

    #[test]
    fn it_factors_unifiable_literals() {
        let c = Clause::new(0, vec![parse_literal("P(x)").unwrap(), parse_literal("P(A)").unwrap()], Origin::Query);
        let f = factor(&c);
        assert_eq!(f.len(), 1);
        assert_eq!(f[0], vec![parse_literal("P(A)").unwrap()]);
    }

    #[test]
    fn resolve_applies_the_unifier() {
        let a = Clause::new(0, vec![parse_literal("~Hungry(x)").unwrap(), parse_literal("Eats(x)").unwrap()], Origin::Query);
        let b = Clause::new(1, vec![parse_literal("Hungry(Tom)").unwrap()], Origin::Query);
        // a is sorted: Eats(x) then ~Hungry(x).
        let r = resolve(&a, 1, &b, 0).unwrap();
        assert_eq!(r, vec![parse_literal("Eats(Tom)").unwrap()]);
        assert!(resolve(&a, 0, &b, 0).is_none());
    }
}
