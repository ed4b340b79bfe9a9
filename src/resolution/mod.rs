//! Resolution refutation over a first-order knowledge base.
//!
//! Sentences are parsed into a [`Formula`], converted to clauses with
//! [`to_cnf`] and stored in a [`KnowledgeBase`]. A [`Prover`] then adds the
//! negated query and searches for the empty clause.
//!
//! Quick start
//! ```
//! use ai_coursework::resolution::{self, ResolutionInput};
//!
//! let text = "Order(Ann,Pasta)\n3\nSeated(x) & Hungry(x) => Order(x,Pasta)\nSeated(Ann)\nHungry(Ann)\n";
//! let input: ResolutionInput = text.parse().unwrap();
//! let outcome = resolution::answer(&input, &Default::default());
//! assert_eq!(resolution::format_output(outcome), "TRUE");
//! ```

use std::str::FromStr;

mod clause;
mod cnf;
mod parser;
mod prover;
mod unify;

pub use clause::{Clause, KnowledgeBase, Literal, Origin, Term};
pub use cnf::{eliminate_implications, negation_normal_form, to_cnf, Formula};
pub use parser::{parse_literal, parse_sentence};
pub use prover::{factor, resolve, ProofOutcome, Prover, ProverConfig, ProverStats};
pub use unify::{unify, Substitution};

#[derive(thiserror::Error, Debug)]
pub enum ResolutionError {
    #[error("cannot parse {input:?}: {message}")]
    Parse { input: String, message: String },
    #[error("query {0:?} is not a single literal")]
    NotALiteral(String),
    #[error("input ended before the {0} line")]
    MissingLine(&'static str),
    #[error("invalid sentence count {0:?}")]
    BadCount(String),
}

/// A parsed `input.txt`: the query and the knowledge base sentences.
#[derive(Debug, Clone)]
pub struct ResolutionInput {
    pub query: Literal,
    pub sentences: Vec<Formula>,
}

impl ResolutionInput {
    pub fn knowledge_base(&self) -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        for (i, s) in self.sentences.iter().enumerate() {
            kb.tell(i, s.clone());
        }
        kb
    }
}

impl FromStr for ResolutionInput {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let query = parse_literal(lines.next().ok_or(ResolutionError::MissingLine("query"))?)?;
        let count = lines.next().ok_or(ResolutionError::MissingLine("sentence count"))?.trim();
        let count: usize = count.parse().map_err(|_| ResolutionError::BadCount(count.to_string()))?;
        let mut sentences = Vec::with_capacity(count);
        for _ in 0..count {
            let line = lines.next().ok_or(ResolutionError::MissingLine("sentence"))?;
            sentences.push(parse_sentence(line)?);
        }
        Ok(ResolutionInput { query, sentences })
    }
}

/// Decide whether the knowledge base entails the query.
pub fn answer(input: &ResolutionInput, cfg: &ProverConfig) -> ProofOutcome {
    Prover::with_config(cfg.clone()).prove(&input.knowledge_base(), &input.query)
}

/// `TRUE` when the query was proved, `FALSE` otherwise.
pub fn format_output(outcome: ProofOutcome) -> &'static str {
    if outcome.is_proved() { "TRUE" } else { "FALSE" }
}
