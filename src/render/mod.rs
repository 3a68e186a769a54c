//! Cover rendering — pure Rust, no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Measure text** | rusttype advance widths + kerning |
//! | **Wrap title** | greedy wrap in [`layout`] |
//! | **Resolve template** | ordered partial match in [`templates`] |
//! | **Compose + encode** | `image` (Lanczos3) + libwebp via [`compositor`] |
//!
//! The module is split into:
//! - **Backend**: [`TextBackend`] trait; production [`TitleFont`]
//! - **Layout**: pure wrap/truncate functions (unit testable)
//! - **Templates**: category → background asset resolution
//! - **Params**: geometry and quality value types
//! - **Compositor**: high-level render combining all of the above

pub mod backend;
pub mod compositor;
pub mod font;
pub mod layout;
pub mod params;
pub mod templates;

pub use backend::TextBackend;
pub use compositor::{Compositor, RenderError};
pub use font::{FontError, TitleFont};
pub use layout::{WrappedText, wrap_title};
pub use params::{Geometry, Quality};
pub use templates::{TemplateError, TemplateLibrary};
