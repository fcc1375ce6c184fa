use crate::ast::Span;
use std::fmt;
use std::sync::Arc;

/// Detailed error information with source location
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// What kind of name collided in a `DuplicateName` error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Variable,
    Term,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Variable => write!(f, "variable"),
            NameKind::Term => write!(f, "term"),
        }
    }
}

/// Error types for the fuzzy engine
#[derive(Debug, Clone, PartialEq)]
pub enum FuzzyError {
    /// A variable or term name is already registered
    DuplicateName { kind: NameKind, name: String },

    /// Lookup of a variable by name failed
    UnknownVariable(String),

    /// Lookup of a term inside a variable failed
    UnknownTerm {
        variable: String,
        term: String,
        known: Vec<String>,
    },

    /// Defuzzification with every DOM at zero (or no sets at all)
    NoActiveSets(String),

    /// Membership function parameters out of order or not finite
    InvalidShape(String),

    /// NaN or infinite crisp input
    InvalidValue { variable: String, value: f64 },

    /// Syntax error in rule-language source
    Parse(Box<ErrorDetails>),

    /// Any other error raised while loading rule-language source, with its location
    InSource {
        error: Box<FuzzyError>,
        details: Box<ErrorDetails>,
    },

    /// A configured limit was exceeded
    LimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

impl FuzzyError {
    /// Create a parse error with source information
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Attach a source location to an engine error.
    ///
    /// Errors that already carry a location are returned unchanged.
    pub fn in_source(self, span: Span, source_id: impl Into<String>, source_text: Arc<str>) -> Self {
        match self {
            FuzzyError::Parse(_) | FuzzyError::InSource { .. } => self,
            error => {
                let suggestion = match &error {
                    FuzzyError::UnknownTerm { variable, known, .. } if !known.is_empty() => Some(
                        format!("'{}' defines: {}", variable, known.join(", ")),
                    ),
                    _ => None,
                };
                FuzzyError::InSource {
                    details: Box::new(ErrorDetails {
                        message: error.to_string(),
                        span,
                        source_id: source_id.into(),
                        source_text,
                        suggestion,
                    }),
                    error: Box::new(error),
                }
            }
        }
    }

    /// The underlying error, looking through any source location wrapper
    pub fn kind(&self) -> &FuzzyError {
        match self {
            FuzzyError::InSource { error, .. } => error.kind(),
            other => other,
        }
    }

    /// Source location, if the error came from rule-language source
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            FuzzyError::Parse(details) | FuzzyError::InSource { details, .. } => Some(details),
            _ => None,
        }
    }
}

impl fmt::Display for FuzzyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuzzyError::DuplicateName { kind, name } => {
                write!(f, "Duplicate {} name '{}'", kind, name)
            }
            FuzzyError::UnknownVariable(name) => write!(f, "Unknown variable '{}'", name),
            FuzzyError::UnknownTerm { variable, term, .. } => {
                write!(f, "Unknown term '{}' in variable '{}'", term, variable)
            }
            FuzzyError::NoActiveSets(variable) => write!(
                f,
                "No active sets: every degree of membership of '{}' is zero",
                variable
            ),
            FuzzyError::InvalidShape(msg) => write!(f, "Invalid shape: {}", msg),
            FuzzyError::InvalidValue { variable, value } => {
                write!(f, "Invalid value {} for variable '{}'", value, variable)
            }
            FuzzyError::Parse(details) => {
                write!(f, "Parse error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " at {}:{}:{}",
                    details.source_id, details.span.line, details.span.col
                )
            }
            FuzzyError::InSource { error, details } => {
                write!(f, "{}", error)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " at {}:{}:{}",
                    details.source_id, details.span.line, details.span.col
                )
            }
            FuzzyError::LimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => write!(
                f,
                "Limit exceeded: {} (limit {}, actual {}). {}",
                limit_name, limit_value, actual_value, suggestion
            ),
        }
    }
}

impl std::error::Error for FuzzyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FuzzyError::InSource { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}
