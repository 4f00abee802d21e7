//! Content platform scrapers.
//!
//! Each scraper follows the same two-phase pattern:
//!
//! 1. **Indexing**: walk the platform's listing API to discover article URLs
//! 2. **Fetching**: download each article page and extract its body text
//!
//! Indexing finishes before any article is fetched. Both phases run one
//! request at a time and treat a failed request as the end of that unit of
//! work (the listing walk or a single article), never as a fatal error.
//!
//! # Supported Platforms
//!
//! | Platform | Module | Listing | Body |
//! |----------|--------|---------|------|
//! | note.com | [`note`] | `/api/v2/creators/{id}/contents` | HTML body container |

pub mod note;
