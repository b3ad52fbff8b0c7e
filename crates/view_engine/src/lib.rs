//! # View Engine
//!
//! Server-side views for the documentation server. A [`ViewManager`] loads
//! every template of a directory into a Handlebars registry and renders them
//! by file name with a JSON context.
//!
//! ## Examples
//!
//! ```rust,no_run
//! # use view_engine::{ViewManager, ViewOptions};
//! # use serde_json::json;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let views = ViewManager::load(ViewOptions::new("public"))?;
//! let page = views.render("index.html", &json!({ "path": "apidoc/" }))?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod handlebars_engine;

pub use errors::{ViewError, ViewResult};
pub use handlebars_engine::{ViewManager, ViewOptions};
