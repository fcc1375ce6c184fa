use crate::ast::{RuleBaseSource, RuleDecl, Span};
use crate::error::FuzzyError;
use crate::InferenceConfig;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod declarations;
pub mod terms;

#[derive(Parser)]
#[grammar = "src/parser/fuzzy.pest"]
pub struct FuzzyParser;

/// Source identity shared by the builders for error reporting
pub(crate) struct SourceContext {
    pub source_id: String,
    pub source_text: Arc<str>,
    pub max_depth: usize,
    lines: LineIndex,
}

impl SourceContext {
    fn new(source_id: &str, content: &str, config: &InferenceConfig) -> Self {
        Self {
            source_id: source_id.to_string(),
            source_text: Arc::from(content),
            max_depth: config.max_term_depth,
            lines: LineIndex::new(content),
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>, span: Span) -> FuzzyError {
        FuzzyError::parse(message, span, self.source_id.clone(), self.source_text.clone())
    }

    pub(crate) fn span(&self, span: pest::Span) -> Span {
        let (line, col) = self.lines.line_col(span.start());
        Span {
            start: span.start(),
            end: span.end(),
            line,
            col,
        }
    }
}

/// Byte offsets of line starts and of UTF-8 continuation bytes, so a
/// position maps to its 1-based line and character column without
/// rescanning the text.
struct LineIndex {
    line_starts: Vec<usize>,
    continuations: Vec<usize>,
}

impl LineIndex {
    fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        let mut continuations = Vec::new();
        for (pos, byte) in content.bytes().enumerate() {
            match byte {
                b'\n' => line_starts.push(pos + 1),
                b if b & 0xC0 == 0x80 => continuations.push(pos),
                _ => {}
            }
        }
        Self {
            line_starts,
            continuations,
        }
    }

    fn line_col(&self, pos: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= pos);
        let start = self.line_starts[line - 1];
        let skipped = self.continuations.partition_point(|&c| c < pos)
            - self.continuations.partition_point(|&c| c < start);
        (line, pos - start - skipped + 1)
    }
}

/// Parse a rule-base source: variable blocks and rules
pub fn parse(
    content: &str,
    source_id: &str,
    config: &InferenceConfig,
) -> Result<RuleBaseSource, FuzzyError> {
    check_limits(content, config)?;

    let context = SourceContext::new(source_id, content, config);

    let pairs = FuzzyParser::parse(Rule::rule_base, content)
        .map_err(|e| convert_pest_error(e, &context))?;

    let mut source = RuleBaseSource {
        source_id: context.source_id.clone(),
        source_text: context.source_text.clone(),
        variables: Vec::new(),
        rules: Vec::new(),
    };

    for pair in pairs {
        if pair.as_rule() != Rule::rule_base {
            continue;
        }
        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::variable_decl => source
                    .variables
                    .push(declarations::parse_variable_decl(inner_pair, &context)?),
                Rule::rule_decl => source
                    .rules
                    .push(terms::parse_rule_decl(inner_pair, &context)?),
                _ => {}
            }
        }
    }

    Ok(source)
}

/// Parse one `IF ... THEN ...` rule; the leading `rule` keyword is optional
pub fn parse_rule(text: &str, config: &InferenceConfig) -> Result<RuleDecl, FuzzyError> {
    check_limits(text, config)?;

    let context = SourceContext::new("<rule>", text, config);

    let pair = FuzzyParser::parse(Rule::rule_text, text)
        .map_err(|e| convert_pest_error(e, &context))?
        .next()
        .ok_or_else(|| context.error("Empty rule", Span::default()))?;

    let span = context.span(pair.as_span());
    let body = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::rule_body)
        .ok_or_else(|| context.error("Grammar error: rule_text missing rule_body", span.clone()))?;

    terms::parse_rule_body(body, span, &context)
}

fn check_limits(content: &str, config: &InferenceConfig) -> Result<(), FuzzyError> {
    if content.len() > config.max_source_bytes {
        return Err(FuzzyError::LimitExceeded {
            limit_name: "max_source_bytes".to_string(),
            limit_value: format!("{} bytes", config.max_source_bytes),
            actual_value: format!("{} bytes", content.len()),
            suggestion: "Split the rule base into several sources".to_string(),
        });
    }

    // The grammar recurses once per parenthesis, so bound the nesting before
    // handing the text to pest.
    let nesting = max_paren_nesting(content);
    if nesting > config.max_term_depth {
        return Err(FuzzyError::LimitExceeded {
            limit_name: "max_term_depth".to_string(),
            limit_value: config.max_term_depth.to_string(),
            actual_value: nesting.to_string(),
            suggestion: "Simplify nested terms to reduce depth".to_string(),
        });
    }
    Ok(())
}

fn max_paren_nesting(content: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for line in content.lines() {
        let code = line.split('#').next().unwrap_or("");
        for c in code.chars() {
            match c {
                '(' => {
                    depth += 1;
                    max = max.max(depth);
                }
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }
    max
}

fn convert_pest_error(e: pest::error::Error<Rule>, context: &SourceContext) -> FuzzyError {
    let (start, end) = match e.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    let (line, col) = match e.line_col {
        pest::error::LineColLocation::Pos((line, col)) => (line, col),
        pest::error::LineColLocation::Span((line, col), _) => (line, col),
    };

    let message = match &e.variant {
        pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
            let expected: Vec<String> = positives.iter().map(describe_rule).collect();
            format!("expected {}", expected.join(", "))
        }
        variant => variant.message().to_string(),
    };

    context.error(
        message,
        Span {
            start,
            end,
            line,
            col,
        },
    )
}

fn describe_rule(rule: &Rule) -> String {
    match rule {
        Rule::identifier => "a name".to_string(),
        Rule::number => "a number".to_string(),
        Rule::shape_kind => "a shape (triangle, left_shoulder, right_shoulder, trapezoid, singleton)".to_string(),
        Rule::set_ref => "a set reference like variable.set".to_string(),
        Rule::kw_variable => "'variable'".to_string(),
        Rule::kw_rule => "'rule'".to_string(),
        Rule::kw_if => "'IF'".to_string(),
        Rule::kw_then => "'THEN'".to_string(),
        Rule::kw_and => "'AND'".to_string(),
        Rule::kw_or => "'OR'".to_string(),
        Rule::hedge => "a hedge (very, fairly)".to_string(),
        Rule::EOI => "end of input".to_string(),
        other => format!("{:?}", other),
    }
}

/// Text of the first inner pair with the given rule
pub(crate) fn inner_str<'a>(pair: &Pair<'a, Rule>, rule: Rule) -> Option<&'a str> {
    pair.clone()
        .into_inner()
        .find(|p| p.as_rule() == rule)
        .map(|p| p.as_str())
}
