use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::clause::{Literal, Term};
use super::cnf::Formula;
use super::ResolutionError;

#[derive(Parser)]
#[grammar = "resolution/sentence.pest"]
struct SentenceParser;

/// Parse one sentence such as `Seated(x) & Hungry(x) => Order(x,Food)`.
pub fn parse_sentence(text: &str) -> Result<Formula, ResolutionError> {
    let mut pairs = SentenceParser::parse(Rule::sentence, text)
        .map_err(|e| ResolutionError::Parse { input: text.to_string(), message: e.to_string() })?;
    let body = pairs
        .next()
        .and_then(|sentence| sentence.into_inner().next())
        .ok_or_else(|| malformed(text))?;
    build(body)
}

/// Parse a single, possibly negated, atom.
pub fn parse_literal(text: &str) -> Result<Literal, ResolutionError> {
    parse_sentence(text)?.as_literal().ok_or_else(|| ResolutionError::NotALiteral(text.trim().to_string()))
}

fn malformed(text: &str) -> ResolutionError {
    ResolutionError::Parse { input: text.to_string(), message: "unexpected parse tree".to_string() }
}

fn build(pair: Pair<'_, Rule>) -> Result<Formula, ResolutionError> {
    let text = pair.as_str();
    match pair.as_rule() {
        Rule::implication => {
            let mut inner = pair.into_inner();
            let lhs = build(inner.next().ok_or_else(|| malformed(text))?)?;
            match inner.next() {
                Some(rhs) => Ok(Formula::implies(lhs, build(rhs)?)),
                None => Ok(lhs),
            }
        }
        Rule::disjunction => fold(pair, Formula::or),
        Rule::conjunction => fold(pair, Formula::and),
        Rule::negation => {
            let inner = pair.into_inner().next().ok_or_else(|| malformed(text))?;
            Ok(Formula::not(build(inner)?))
        }
        Rule::atom => {
            let mut inner = pair.into_inner();
            let name = inner.next().ok_or_else(|| malformed(text))?.as_str();
            let args = match inner.next() {
                Some(args) => args.into_inner().map(|a| Term::parse(a.as_str())).collect(),
                None => Vec::new(),
            };
            Ok(Formula::Atom(Literal::new(name, false, args)))
        }
        _ => Err(malformed(text)),
    }
}

fn fold(pair: Pair<'_, Rule>, join: fn(Formula, Formula) -> Formula) -> Result<Formula, ResolutionError> {
    let text = pair.as_str();
    let mut parts = pair.into_inner().map(build);
    let first = parts.next().ok_or_else(|| malformed(text))??;
    parts.try_fold(first, |acc, next| Ok(join(acc, next?)))
}
