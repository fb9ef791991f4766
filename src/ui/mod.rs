//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel ┐
//!          → layout → ScreenLayout ──────────┴→ render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`layout`]: Screen geometry and click hit-testing
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, width fitting)
//! - [`theme`]: Light/dark color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use layout::{ClickTarget, Rect, ScreenLayout};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardItem, DropdownOption, DropdownView, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, ListView,
    ModalField, ModalView, SearchBarInfo, UIViewModel,
};
