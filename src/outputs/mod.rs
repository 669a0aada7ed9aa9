//! Output generation for fetched feed pages.
//!
//! # Submodules
//!
//! - [`json`]: writes a [`FeedPage`](crate::models::FeedPage) snapshot to disk
//! - [`markdown`]: renders a page as a Markdown reading list
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-09-18/
//!     ├── technology.json
//!     └── breaking-news.json
//! ```

pub mod json;
pub mod markdown;
