use crate::ast::{RuleDecl, Span, TermExpr};
use crate::error::FuzzyError;
use crate::parser::{Rule, SourceContext};
use pest::iterators::Pair;

pub(crate) fn parse_rule_decl(
    pair: Pair<Rule>,
    context: &SourceContext,
) -> Result<RuleDecl, FuzzyError> {
    let span = context.span(pair.as_span());
    let body = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::rule_body)
        .ok_or_else(|| context.error("Grammar error: rule_decl missing rule_body", span.clone()))?;
    parse_rule_body(body, span, context)
}

/// `IF <term_expr> THEN <term_expr>`
pub(crate) fn parse_rule_body(
    pair: Pair<Rule>,
    span: Span,
    context: &SourceContext,
) -> Result<RuleDecl, FuzzyError> {
    let mut terms = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::term_expr);

    let antecedent = terms
        .next()
        .ok_or_else(|| context.error("Grammar error: rule missing antecedent", span.clone()))?;
    let consequence = terms
        .next()
        .ok_or_else(|| context.error("Grammar error: rule missing consequence", span.clone()))?;

    let (antecedent, _) = parse_term_expr(antecedent, context)?;
    let (consequence, _) = parse_term_expr(consequence, context)?;

    Ok(RuleDecl {
        antecedent,
        consequence,
        span,
    })
}

/// A term together with its depth, so chains are bounded while they are built
type WithDepth = (TermExpr, usize);

/// `and_expr (OR and_expr)*`, left-nested
fn parse_term_expr(pair: Pair<Rule>, context: &SourceContext) -> Result<WithDepth, FuzzyError> {
    let span = context.span(pair.as_span());
    let mut result: Option<WithDepth> = None;

    for inner_pair in pair.into_inner() {
        if inner_pair.as_rule() != Rule::and_expr {
            continue;
        }
        let operand = parse_and_expr(inner_pair, context)?;
        result = Some(match result {
            Some(left) => fold(left, operand, TermExpr::Or, context)?,
            None => operand,
        });
    }

    result.ok_or_else(|| context.error("Empty term", span))
}

/// `hedged (AND hedged)*`, left-nested
fn parse_and_expr(pair: Pair<Rule>, context: &SourceContext) -> Result<WithDepth, FuzzyError> {
    let span = context.span(pair.as_span());
    let mut result: Option<WithDepth> = None;

    for inner_pair in pair.into_inner() {
        if inner_pair.as_rule() != Rule::hedged {
            continue;
        }
        let operand = parse_hedged(inner_pair, context)?;
        result = Some(match result {
            Some(left) => fold(left, operand, TermExpr::And, context)?,
            None => operand,
        });
    }

    result.ok_or_else(|| context.error("Empty AND expression", span))
}

fn fold(
    (left, left_depth): WithDepth,
    (right, right_depth): WithDepth,
    node: fn(Box<TermExpr>, Box<TermExpr>) -> TermExpr,
    context: &SourceContext,
) -> Result<WithDepth, FuzzyError> {
    let depth = 1 + left_depth.max(right_depth);
    if depth > context.max_depth {
        return Err(depth_exceeded(depth, context));
    }
    Ok((node(Box::new(left), Box::new(right)), depth))
}

/// `hedge* primary`; the hedge nearest the primary applies first
fn parse_hedged(pair: Pair<Rule>, context: &SourceContext) -> Result<WithDepth, FuzzyError> {
    let span = context.span(pair.as_span());
    let mut hedges = Vec::new();
    let mut primary = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::hedge => {
                if hedges.len() >= context.max_depth {
                    return Err(depth_exceeded(hedges.len() + 1, context));
                }
                hedges.push(inner_pair.as_str().to_ascii_lowercase());
            }
            Rule::primary => primary = Some(parse_primary(inner_pair, context)?),
            _ => {}
        }
    }

    let (mut term, depth) = primary.ok_or_else(|| context.error("Hedge without a term", span))?;
    let depth = depth + hedges.len();
    if depth > context.max_depth {
        return Err(depth_exceeded(depth, context));
    }
    for hedge in hedges.iter().rev() {
        term = if hedge == "very" {
            TermExpr::Very(Box::new(term))
        } else {
            TermExpr::Fairly(Box::new(term))
        };
    }
    Ok((term, depth))
}

fn parse_primary(pair: Pair<Rule>, context: &SourceContext) -> Result<WithDepth, FuzzyError> {
    let span = context.span(pair.as_span());
    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::set_ref => return Ok((parse_set_ref(inner_pair, context)?, 1)),
            Rule::term_expr => return parse_term_expr(inner_pair, context),
            _ => {}
        }
    }
    Err(context.error("Empty primary term", span))
}

fn parse_set_ref(pair: Pair<Rule>, context: &SourceContext) -> Result<TermExpr, FuzzyError> {
    let span = context.span(pair.as_span());
    let mut names = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::identifier)
        .map(|p| p.as_str().to_string());

    match (names.next(), names.next()) {
        (Some(variable), Some(set)) => Ok(TermExpr::Set {
            variable,
            set,
            span,
        }),
        _ => Err(context.error("Set references take the form variable.set", span)),
    }
}

fn depth_exceeded(depth: usize, context: &SourceContext) -> FuzzyError {
    FuzzyError::LimitExceeded {
        limit_name: "max_term_depth".to_string(),
        limit_value: context.max_depth.to_string(),
        actual_value: depth.to_string(),
        suggestion: "Simplify nested terms to reduce depth".to_string(),
    }
}
