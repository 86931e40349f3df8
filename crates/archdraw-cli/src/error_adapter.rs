//! Error adapter for converting [`ArchdrawError`] to miette diagnostics.
//!
//! Bridges the library's error type to miette's graphical report handler,
//! attaching a stable error code and, where one helps, a hint.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use archdraw::{ArchdrawError, export};

/// Adapter that renders an [`ArchdrawError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a ArchdrawError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArchdrawError::Io(_) => "archdraw::io",
            ArchdrawError::Geometry(_) => "archdraw::geometry",
            ArchdrawError::Palette(_) => "archdraw::palette",
            ArchdrawError::Config(_) => "archdraw::config",
            ArchdrawError::Export(_) => "archdraw::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ArchdrawError::Export(export::Error::MissingDirectory(_)) => {
                "create the output directory or pass a different --output path"
            }
            ArchdrawError::Palette(_) => {
                "palette overrides may only name categories the diagram uses"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// Wrap an [`ArchdrawError`] for miette rendering.
pub fn to_reportable(err: &ArchdrawError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_code_and_message() {
        let err = ArchdrawError::Config("bad dpi".to_string());
        let reportable = to_reportable(&err);
        assert_eq!(reportable.to_string(), "Configuration error: bad dpi");
        assert_eq!(reportable.code().unwrap().to_string(), "archdraw::config");
        assert!(reportable.help().is_none());
    }

    #[test]
    fn test_missing_directory_has_help() {
        let err = ArchdrawError::Export(export::Error::MissingDirectory(PathBuf::from("docs")));
        let reportable = to_reportable(&err);
        assert_eq!(reportable.code().unwrap().to_string(), "archdraw::export");
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let err = ArchdrawError::Config("bad dpi".to_string());
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &to_reportable(&err))
            .unwrap();
        assert!(out.contains("bad dpi"));
    }
}
