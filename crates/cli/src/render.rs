//! Failure reporting for the driver.
//!
//! Every error, whatever its origin, becomes the single `ERROR -- <message>`
//! line on stderr. When logging is enabled the structured [`Diagnostic`]
//! (code, span, context, explanation) is logged as well.

use std::io;

use nosj_core::NosjError;
use nosj_diagnostics::{Diagnostic, codes, report};

use crate::UsageError;

/// Diagnostic code for a driver-level error.
pub(crate) fn failure_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<NosjError>() {
        e.code()
    } else if err.is::<UsageError>() {
        codes::USAGE
    } else {
        codes::IO
    }
}

/// Structured form of a driver-level error. Decoder failures carry their
/// span and context; anything else gets the code and the rendered message.
pub(crate) fn failure_diagnostic(err: &anyhow::Error) -> Diagnostic {
    match err.downcast_ref::<NosjError>() {
        Some(e) => e.to_diagnostic(),
        None => Diagnostic::new(failure_code(err), format!("{err:#}"), None),
    }
}

/// Write the failure line for `err` to stderr.
pub(crate) fn report_failure(err: &anyhow::Error) {
    let diag = failure_diagnostic(err);
    tracing::debug!(
        code = %diag.id,
        span = ?diag.span,
        context = ?diag.context,
        explanation = diag.explain().unwrap_or_default(),
        "document rejected"
    );
    // Nothing useful can be done if stderr itself is gone.
    let _ = report::write_error(&mut io::stderr().lock(), &format!("{err:#}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_by_origin() {
        let key = anyhow::Error::new(NosjError::InvalidKey { key: "Abc".into() });
        assert_eq!(failure_code(&key), codes::INVALID_KEY);

        assert_eq!(failure_code(&anyhow::Error::new(UsageError)), codes::USAGE);

        let io = anyhow::Error::new(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(failure_code(&io), codes::IO);
    }

    #[test]
    fn decoder_failure_keeps_span_and_context() {
        let err = anyhow::Error::new(NosjError::InvalidKey { key: "Abc".into() });
        let diag = failure_diagnostic(&err);
        assert_eq!(diag.id, codes::INVALID_KEY);
        assert_eq!(diag.message, "Invalid key format: Abc");
        assert_eq!(diag.context.as_ref().map(|c| c["key"].as_str()), Some("Abc"));

        let err = anyhow::Error::new(nosj_core::parse_str("(<a:1").unwrap_err());
        let diag = failure_diagnostic(&err);
        assert_eq!(diag.id, codes::PARSER_EXPECTED_TOKEN);
        assert_eq!(diag.span, Some(nosj_diagnostics::Span::new(5, 5)));
        assert!(diag.explain().is_some());
    }

    #[test]
    fn other_failures_get_code_and_rendered_message() {
        let err = anyhow::Error::new(io::Error::from(io::ErrorKind::NotFound))
            .context("failed to read missing.nosj");
        let diag = failure_diagnostic(&err);
        assert_eq!(diag.id, codes::IO);
        assert!(diag.message.starts_with("failed to read missing.nosj: "), "{}", diag.message);
        assert_eq!(diag.span, None);

        let diag = failure_diagnostic(&anyhow::Error::new(UsageError));
        assert_eq!(diag.message, "Usage: nosj [--max-depth N] <inputfile>");
    }

    #[test]
    fn nosj_message_is_not_decorated() {
        let err = anyhow::Error::new(NosjError::InvalidKey { key: "Abc".into() });
        assert_eq!(format!("{err:#}"), "Invalid key format: Abc");
    }
}
