pub mod category_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_pane;

use crate::app::AppState;
use crate::persistence::KeyValueStore;
use category_pane::render_category_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_remove_category_modal;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};
use styles::muted_style;
use task_pane::render_task_pane;

/// Main render function - draws the entire UI from the current store state
pub fn render<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_category_pane(f, app, layout.categories_area);
    render_task_pane(f, app, layout.tasks_area);
    render_status(f, app, layout.status_area);

    render_remove_category_modal(f, app, size);

    if app.ui_mode.is_form() {
        render_input_form(f, app, size);
    }
}

fn render_status<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    let text = app.status.as_deref().unwrap_or("");
    f.render_widget(Paragraph::new(Span::styled(format!(" {}", text), muted_style())), area);
}
