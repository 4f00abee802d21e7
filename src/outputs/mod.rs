//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: writes harvested articles to a single JSON document
//!
//! # Output Structure
//!
//! ```text
//! ./
//! └── note_articles.json   # "<date>-<title>" -> {title, text, url}
//! ```

pub mod json;
