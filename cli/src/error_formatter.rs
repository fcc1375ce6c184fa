use ariadne::{Color, Label, Report, ReportKind, Source};
use fuzzylib::FuzzyError;

/// Render a FuzzyError for the terminal, pointing into the source when the
/// error came from a `.fuzzy` file
pub fn format_error(error: &FuzzyError) -> String {
    match error {
        FuzzyError::Parse(details) | FuzzyError::InSource { details, .. } => {
            let mut output = Vec::new();

            let headline = match error {
                FuzzyError::Parse(_) => format!("Parse error: {}", details.message),
                _ => details.message.clone(),
            };
            let message = format!(
                "{} ({}:{}:{})",
                headline, details.source_id, details.span.line, details.span.col
            );

            let mut report =
                Report::build(ReportKind::Error, &details.source_id, details.span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((&details.source_id, details.span.start..details.span.end))
                            .with_message("")
                            .with_color(Color::Red),
                    );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => format!("Error: {}", error),
            }
        }
        FuzzyError::LimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => format!(
            "Limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
            limit_name, limit_value, actual_value, suggestion
        ),
        FuzzyError::UnknownTerm {
            variable,
            term,
            known,
        } if !known.is_empty() => format!(
            "Error: Unknown term '{}' in variable '{}'\n  Known terms: {}",
            term,
            variable,
            known.join(", ")
        ),
        other => format!("Error: {}", other),
    }
}
