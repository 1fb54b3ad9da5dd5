//! Compensation statements ("annexures").
//!
//! Renders a breakdown as a fixed-layout text document and wraps it for
//! download. No figures are computed here.

mod export;
mod render;

pub use export::{ANNEXURE_MIME_TYPE, AnnexureDocument, annexure_file_name, export_annexure};
pub use render::{STATEMENT_TITLE, render_text, render_text_with_fee};
