// Render module split into focused submodules.

pub mod full;
pub mod header;
pub mod list;
pub mod modeline;
pub mod styles;
pub mod util;

pub use full::render_full;
pub use header::render_header;
pub use list::{arrow_columns, render_list_content, render_main_content, ArrowColumns};
pub use modeline::{render_modeline, render_modeline_padded};
