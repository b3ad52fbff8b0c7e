use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types that can occur while loading or rendering views.
#[derive(Error, Debug)]
pub enum ViewError {
    /// I/O operation failed while scanning the view directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A view file could not be compiled as a Handlebars template.
    #[error("Template compilation failed: {name} - {message}")]
    Template {
        /// Name of the view that failed to compile
        name: String,
        /// Error message from the Handlebars compiler
        message: String,
    },

    /// Rendering a compiled view failed.
    #[error("View rendering failed: {name} - {message}")]
    Render {
        /// Name of the view that failed to render
        name: String,
        /// Error message from the Handlebars renderer
        message: String,
    },

    /// The requested view name is not a plain file name.
    ///
    /// View names must not contain path separators or `..` so that a
    /// rendered view can never come from outside the view directory.
    #[error("Invalid view name: {0}")]
    InvalidName(String),

    /// No view with the requested name was loaded.
    #[error("View not found: {0}")]
    NotFound(String),
}

/// Result type alias for view operations.
pub type ViewResult<T> = Result<T, ViewError>;
