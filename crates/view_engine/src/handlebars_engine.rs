//! # Handlebars Views
//!
//! Loads the templates of a view directory into a Handlebars registry. Every
//! file whose extension matches [`ViewOptions::extension`] is compiled once at
//! load time and registered under its file name, so `public/index.html` is
//! rendered as `"index.html"`.

use crate::errors::{ViewError, ViewResult};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[cfg(test)]
#[path = "handlebars_tests.rs"]
mod handlebars_tests;

/// Options controlling where views are loaded from and how they render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Directory containing the view templates
    pub path: PathBuf,

    /// File extension of view templates, without the leading dot
    pub extension: String,

    /// Fail rendering when the context lacks a referenced variable
    pub strict: bool,
}

impl ViewOptions {
    /// Creates options for the `.html` views of `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extension: "html".to_string(),
            strict: false,
        }
    }
}

/// Compiled views of a single directory.
#[derive(Debug)]
pub struct ViewManager {
    handlebars: Handlebars<'static>,
    options: ViewOptions,
}

impl ViewManager {
    /// Loads and compiles every view of the configured directory.
    ///
    /// Sub-directories and files with other extensions are ignored.
    ///
    /// # Errors
    ///
    /// - `ViewError::Io`: the directory cannot be read
    /// - `ViewError::Template`: a view does not compile
    pub fn load(options: ViewOptions) -> ViewResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(options.strict);

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&options.path)? {
            let path = entry?.path();
            if path.is_file() && has_extension(&path, &options.extension) {
                files.push(path);
            }
        }
        files.sort();

        for file in files {
            let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!("Skipping view with a non UTF-8 name: {}", file.display());
                continue;
            };

            handlebars
                .register_template_file(name, &file)
                .map_err(|e| ViewError::Template {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;

            tracing::debug!("Registered view '{}'", name);
        }

        Ok(Self {
            handlebars,
            options,
        })
    }

    /// Renders the view `name` with the given context.
    ///
    /// # Errors
    ///
    /// - `ViewError::InvalidName`: `name` contains a path separator or `..`
    /// - `ViewError::NotFound`: no view with that name was loaded
    /// - `ViewError::Render`: rendering failed
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> ViewResult<String> {
        validate_view_name(name)?;

        if !self.handlebars.has_template(name) {
            return Err(ViewError::NotFound(name.to_string()));
        }

        self.handlebars
            .render(name, context)
            .map_err(|e| ViewError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Names of the loaded views, sorted.
    pub fn view_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlebars.get_templates().keys().cloned().collect();
        names.sort();
        names
    }

    /// Directory the views were loaded from.
    pub fn path(&self) -> &Path {
        &self.options.path
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

fn validate_view_name(name: &str) -> ViewResult<()> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ViewError::InvalidName(name.to_string()));
    }

    Ok(())
}
