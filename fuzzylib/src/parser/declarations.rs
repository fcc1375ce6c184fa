use crate::ast::{SetDecl, ShapeKind, VariableDecl};
use crate::error::FuzzyError;
use crate::parser::{inner_str, Rule, SourceContext};
use crate::{FuzzyResult, Shape};
use pest::iterators::Pair;

pub(crate) fn parse_variable_decl(
    pair: Pair<Rule>,
    context: &SourceContext,
) -> Result<VariableDecl, FuzzyError> {
    let span = context.span(pair.as_span());
    let name = inner_str(&pair, Rule::identifier).ok_or_else(|| {
        context.error("Grammar error: variable_decl missing identifier", span.clone())
    })?;

    let mut sets = Vec::new();
    for inner_pair in pair.clone().into_inner() {
        if inner_pair.as_rule() == Rule::set_decl {
            sets.push(parse_set_decl(inner_pair, context)?);
        }
    }

    Ok(VariableDecl {
        name: name.to_string(),
        sets,
        span,
    })
}

fn parse_set_decl(pair: Pair<Rule>, context: &SourceContext) -> Result<SetDecl, FuzzyError> {
    let span = context.span(pair.as_span());
    let mut name = None;
    let mut shape = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::identifier => name = Some(inner_pair.as_str().to_string()),
            Rule::shape => shape = Some(parse_shape(inner_pair, context)?),
            _ => {}
        }
    }

    let name = name
        .ok_or_else(|| context.error("Grammar error: set_decl missing identifier", span.clone()))?;
    let (kind, params) =
        shape.ok_or_else(|| context.error("Grammar error: set_decl missing shape", span.clone()))?;

    Ok(SetDecl {
        name,
        kind,
        params,
        span,
    })
}

fn parse_shape(
    pair: Pair<Rule>,
    context: &SourceContext,
) -> Result<(ShapeKind, Vec<f64>), FuzzyError> {
    let span = context.span(pair.as_span());
    let mut kind = None;
    let mut params = Vec::new();

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::shape_kind => {
                kind = Some(match inner_pair.as_str().to_ascii_lowercase().as_str() {
                    "triangle" => ShapeKind::Triangle,
                    "left_shoulder" => ShapeKind::LeftShoulder,
                    "right_shoulder" => ShapeKind::RightShoulder,
                    "trapezoid" => ShapeKind::Trapezoid,
                    "singleton" => ShapeKind::Singleton,
                    other => {
                        return Err(context.error(
                            format!("Unknown shape '{}'", other),
                            context.span(inner_pair.as_span()),
                        ))
                    }
                })
            }
            Rule::number => {
                let value = inner_pair.as_str().parse::<f64>().map_err(|e| {
                    context.error(
                        format!("Invalid number '{}': {}", inner_pair.as_str(), e),
                        context.span(inner_pair.as_span()),
                    )
                })?;
                params.push(value);
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| context.error("Grammar error: shape missing kind", span))?;
    Ok((kind, params))
}

/// Turn a declared shape into a `Shape`, checking the parameter count.
///
/// Ordering and finiteness are checked later by `FuzzySet::new`.
pub fn build_shape(kind: ShapeKind, params: &[f64]) -> FuzzyResult<Shape> {
    match (kind, params) {
        (ShapeKind::Triangle, &[left, peak, right]) => Ok(Shape::Triangle { left, peak, right }),
        (ShapeKind::LeftShoulder, &[left, peak, right]) => {
            Ok(Shape::LeftShoulder { left, peak, right })
        }
        (ShapeKind::RightShoulder, &[left, peak, right]) => {
            Ok(Shape::RightShoulder { left, peak, right })
        }
        (ShapeKind::Trapezoid, &[left, left_peak, right_peak, right]) => Ok(Shape::Trapezoid {
            left,
            left_peak,
            right_peak,
            right,
        }),
        (ShapeKind::Singleton, &[value]) => Ok(Shape::Singleton {
            left: value,
            peak: value,
            right: value,
        }),
        (ShapeKind::Singleton, &[left, peak, right]) => Ok(Shape::Singleton { left, peak, right }),
        (kind, params) => {
            let expected = match kind {
                ShapeKind::Trapezoid => "4",
                ShapeKind::Singleton => "1 or 3",
                _ => "3",
            };
            Err(FuzzyError::InvalidShape(format!(
                "{} takes {} parameters, got {}",
                kind,
                expected,
                params.len()
            )))
        }
    }
}
