use crate::config::Config;
use crate::domain::{flatten_sections, CategoryFilter, Row, TaskId, UiMode, PALETTE};
use crate::persistence::KeyValueStore;
use crate::store::TaskStore;
use std::cell::Cell;
use std::rc::Rc;

/// Input form state for adding tasks and categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormState {
    /// Task title or category name
    pub text: String,
    /// Category index (task form) or palette index (category form, `None` = no colour)
    pub choice: Option<usize>,
}

/// Main application state
pub struct AppState<S: KeyValueStore> {
    pub store: TaskStore<S>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub status: Option<String>,
    pub use_color: bool,
    dirty: Rc<Cell<bool>>,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(mut store: TaskStore<S>, config: &Config) -> Self {
        if let Some(name) = &config.default_filter {
            store.set_filter(CategoryFilter::Category(name.clone()));
        }

        // Redraw whenever the store reports a change
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        store.set_listener(move |_| flag.set(true));

        Self {
            store,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            status: None,
            use_color: config.color,
            dirty,
        }
    }

    /// Whether a redraw is pending; clears the flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Request a redraw for UI-only changes
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Rows of the task pane under the current filter
    pub fn rows(&self) -> Vec<Row> {
        let groups = self.store.group_by_category();
        flatten_sections(&groups, &self.store.visible_categories())
    }

    /// Task ids in display order, the domain of `selected_index`
    pub fn visible_task_ids(&self) -> Vec<TaskId> {
        self.rows()
            .iter()
            .filter_map(|row| row.task_id().cloned())
            .collect()
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.visible_task_ids().into_iter().nth(self.selected_index)
    }

    /// Keep the selection inside the visible task list
    pub fn clamp_selection(&mut self) {
        let len = self.visible_task_ids().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.mark_dirty();
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_task_ids().len() {
            self.selected_index += 1;
            self.mark_dirty();
        }
    }

    /// Toggle done on the selected task
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.toggle_task(&id);
        }
    }

    /// Remove the selected task
    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.store.remove_task(&id) {
                self.clamp_selection();
            }
        }
    }

    /// Remove all completed tasks
    pub fn clear_completed(&mut self) {
        let removed = self.store.clear_completed();
        self.clamp_selection();
        self.set_status(format!(
            "Cleared {} completed task{}",
            removed,
            if removed == 1 { "" } else { "s" }
        ));
    }

    /// Filters in tab order: all, then every category in display order
    fn filter_cycle(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(
                self.store
                    .sorted_categories()
                    .into_iter()
                    .map(CategoryFilter::Category),
            )
            .collect()
    }

    fn step_filter(&mut self, forward: bool) {
        let cycle = self.filter_cycle();
        let current = cycle
            .iter()
            .position(|f| f == self.store.filter())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % cycle.len()
        } else {
            (current + cycle.len() - 1) % cycle.len()
        };
        self.store.set_filter(cycle[next].clone());
        self.selected_index = 0;
    }

    pub fn next_filter(&mut self) {
        self.step_filter(true);
    }

    pub fn prev_filter(&mut self) {
        self.step_filter(false);
    }

    pub fn show_all(&mut self) {
        self.store.set_filter(CategoryFilter::All);
        self.selected_index = 0;
    }

    /// Open the add-task form, preselecting the filtered category
    pub fn start_add_task(&mut self) {
        let names = self.store.sorted_categories();
        let preselect = self
            .store
            .filter()
            .name()
            .and_then(|name| names.iter().position(|n| n == name))
            .unwrap_or(0);

        self.input_form = Some(InputFormState {
            text: String::new(),
            choice: Some(preselect),
        });
        self.ui_mode = UiMode::AddingTask;
        self.mark_dirty();
    }

    /// Open the add-category form
    pub fn start_add_category(&mut self) {
        self.input_form = Some(InputFormState {
            text: String::new(),
            choice: None,
        });
        self.ui_mode = UiMode::AddingCategory;
        self.mark_dirty();
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
            self.dirty.set(true);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
            self.dirty.set(true);
        }
    }

    /// Cycle the form's category (task form) or colour swatch (category form)
    pub fn input_form_cycle(&mut self, forward: bool) {
        let category_count = self.store.categories().len();
        let mode = self.ui_mode;
        let Some(form) = &mut self.input_form else {
            return;
        };

        form.choice = match mode {
            UiMode::AddingTask => {
                let current = form.choice.unwrap_or(0);
                Some(if forward {
                    (current + 1) % category_count
                } else {
                    (current + category_count - 1) % category_count
                })
            }
            // None → 0 → ... → last → None
            UiMode::AddingCategory => match (form.choice, forward) {
                (None, true) => Some(0),
                (None, false) => Some(PALETTE.len() - 1),
                (Some(i), true) if i + 1 < PALETTE.len() => Some(i + 1),
                (Some(0), false) => None,
                (Some(i), false) => Some(i - 1),
                (Some(_), true) => None,
            },
            _ => form.choice,
        };
        self.dirty.set(true);
    }

    /// Category currently chosen in the add-task form
    pub fn form_category(&self) -> Option<String> {
        let form = self.input_form.as_ref()?;
        self.store
            .sorted_categories()
            .into_iter()
            .nth(form.choice.unwrap_or(0))
    }

    /// Colour currently chosen in the add-category form
    pub fn form_color(&self) -> Option<&'static str> {
        let index = self.input_form.as_ref()?.choice?;
        PALETTE.get(index).copied()
    }

    /// Submit the open form
    pub fn submit_input_form(&mut self) {
        let mode = self.ui_mode;
        let category = self.form_category();
        let color = self.form_color();

        if let Some(form) = self.input_form.take() {
            match mode {
                UiMode::AddingTask => {
                    let category = category.unwrap_or_default();
                    if self.store.add_task(&form.text, &category).is_some() {
                        self.selected_index = 0;
                    }
                }
                UiMode::AddingCategory => {
                    if self.store.add_category(&form.text, color) {
                        self.set_status(format!("Added category {}", form.text.trim()));
                    }
                }
                _ => {}
            }
        }
        self.ui_mode = UiMode::Normal;
        self.mark_dirty();
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
        self.mark_dirty();
    }

    /// Ask for confirmation before removing the filtered category
    pub fn start_remove_category(&mut self) {
        if self.store.filter().is_all() {
            self.set_status("Select a category tab first".to_string());
            return;
        }
        self.ui_mode = UiMode::ConfirmRemoveCategory;
        self.mark_dirty();
    }

    pub fn confirm_remove_category(&mut self) {
        if let Some(name) = self.store.filter().name().map(str::to_string) {
            if self.store.remove_category(&name) {
                self.set_status(format!("Removed category {}", name));
            }
        }
        self.selected_index = 0;
        self.ui_mode = UiMode::Normal;
        self.mark_dirty();
    }

    pub fn cancel_remove_category(&mut self) {
        self.ui_mode = UiMode::Normal;
        self.mark_dirty();
    }

    pub fn set_status(&mut self, message: String) {
        self.status = Some(message);
        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use pretty_assertions::assert_eq;

    fn app() -> AppState<MemoryStore> {
        AppState::new(TaskStore::load(MemoryStore::new()), &Config::default())
    }

    #[test]
    fn test_default_filter_from_config() {
        let config = Config {
            default_filter: Some("Werk".into()),
            ..Config::default()
        };
        let app = AppState::new(TaskStore::load(MemoryStore::new()), &config);
        assert_eq!(app.store.filter(), &CategoryFilter::Category("Werk".into()));

        let config = Config {
            default_filter: Some("Missing".into()),
            ..Config::default()
        };
        let app = AppState::new(TaskStore::load(MemoryStore::new()), &config);
        assert_eq!(app.store.filter(), &CategoryFilter::All);
    }

    #[test]
    fn test_dirty_flag_follows_store_changes() {
        let mut app = app();
        assert!(app.take_dirty());
        assert!(!app.take_dirty());

        app.store.add_task("Run", "Werk");
        assert!(app.take_dirty());

        app.store.toggle_task(&TaskId::from("missing"));
        assert!(!app.take_dirty());
    }

    #[test]
    fn test_add_task_through_form() {
        let mut app = app();
        app.next_filter(); // Persoonlijk
        app.start_add_task();
        assert_eq!(app.form_category().as_deref(), Some("Persoonlijk"));

        for c in "Call mom".chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].category, "Persoonlijk");
    }

    #[test]
    fn test_task_form_cycles_categories() {
        let mut app = app();
        app.start_add_task();
        assert_eq!(app.form_category().as_deref(), Some("Persoonlijk"));

        app.input_form_cycle(true);
        assert_eq!(app.form_category().as_deref(), Some("Vrije tijd"));
        app.input_form_cycle(false);
        app.input_form_cycle(false);
        assert_eq!(app.form_category().as_deref(), Some("Werk"));
    }

    #[test]
    fn test_blank_task_form_adds_nothing() {
        let mut app = app();
        app.start_add_task();
        app.input_form_add_char(' ');
        app.submit_input_form();

        assert!(app.store.tasks().is_empty());
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_add_category_with_swatch() {
        let mut app = app();
        app.start_add_category();
        assert_eq!(app.form_color(), None);

        for c in "Health".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_cycle(true);
        app.input_form_cycle(true);
        assert_eq!(app.form_color(), Some(PALETTE[1]));
        app.submit_input_form();

        assert!(app.store.has_category("Health"));
        assert_eq!(app.store.color("Health"), Some(PALETTE[1]));
    }

    #[test]
    fn test_swatch_cycle_wraps_through_none() {
        let mut app = app();
        app.start_add_category();
        app.input_form_cycle(false);
        assert_eq!(app.form_color(), Some(PALETTE[PALETTE.len() - 1]));
        app.input_form_cycle(true);
        assert_eq!(app.form_color(), None);
    }

    #[test]
    fn test_filter_cycle_wraps() {
        let mut app = app();
        app.prev_filter();
        assert_eq!(app.store.filter(), &CategoryFilter::Category("Werk".into()));
        app.next_filter();
        assert_eq!(app.store.filter(), &CategoryFilter::All);
        app.next_filter();
        app.show_all();
        assert_eq!(app.store.filter(), &CategoryFilter::All);
    }

    #[test]
    fn test_selection_toggle_and_remove() {
        let mut kv = MemoryStore::new();
        kv.insert_raw(
            crate::persistence::TASKS_KEY,
            r#"[
                {"id":"n","title":"new","category":"Werk","createdAt":2},
                {"id":"o","title":"old","category":"Werk","createdAt":1}
            ]"#,
        );
        let mut app = AppState::new(TaskStore::load(kv), &Config::default());

        app.move_selection_down();
        let selected = app.selected_task_id().unwrap();
        assert_eq!(app.store.task(&selected).unwrap().title, "old");

        app.toggle_selected();
        assert!(app.store.task(&selected).unwrap().done);

        app.remove_selected();
        assert!(app.store.task(&selected).is_none());
        assert_eq!(app.selected_index, 0);

        app.move_selection_down();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_remove_category_requires_tab() {
        let mut app = app();
        app.start_remove_category();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.status.is_some());

        app.store.add_task("fun", "Vrije tijd");
        app.store.set_filter(CategoryFilter::Category("Vrije tijd".into()));
        app.start_remove_category();
        assert_eq!(app.ui_mode, UiMode::ConfirmRemoveCategory);

        app.confirm_remove_category();
        assert!(!app.store.has_category("Vrije tijd"));
        assert!(app.store.tasks().is_empty());
        assert_eq!(app.store.filter(), &CategoryFilter::All);
    }

    #[test]
    fn test_clear_completed_reports() {
        let mut app = app();
        let id = app.store.add_task("done", "Werk").unwrap();
        app.store.toggle_task(&id);

        app.clear_completed();
        assert!(app.store.tasks().is_empty());
        assert_eq!(app.status.as_deref(), Some("Cleared 1 completed task"));
    }
}
