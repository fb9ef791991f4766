//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Draw components at the positions given by the
//!    state's [`ScreenLayout`](crate::ui::layout::ScreenLayout)

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for the state's current viewport.
///
/// The layout used here is the same one `AppState` uses to resolve clicks.
pub fn render(state: &AppState) {
    let layout = state.layout();
    let viewmodel = state.compute_viewmodel();

    components::render_screen(&viewmodel, &layout, &state.theme);
}
