//! File payload module.
//!
//! - `model`: `FilePayload` and `MimeType`
//! - `materializer`: the `FileMaterializer` port and demo file naming

mod materializer;
mod model;

pub use materializer::{FileMaterializer, demo_file_content, demo_file_name};
pub use model::{FilePayload, MimeType};
