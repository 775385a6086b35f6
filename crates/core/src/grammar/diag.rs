pub use nosj_diagnostics::{Diagnostic, LineIndex, Span, codes};
