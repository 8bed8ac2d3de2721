//! The task store: owns every collection and performs all mutations.
//!
//! Each mutating operation runs read → mutate → persist → notify. Blank
//! input and unknown ids/names are silent no-ops; persistence writes are
//! best-effort and only logged when they fail.

use crate::domain::views::effective_category;
use crate::domain::{
    default_categories, group_by_category, resolve_category, sorted_names, CategoryFilter, Clock,
    Task, TaskId, DEFAULT_COLORS,
};
use crate::persistence::{KeyValueStore, CATEGORIES_KEY, CATEGORY_COLORS_KEY, TASKS_KEY};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Read-only view of the store handed to renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub tasks: &'a [Task],
    pub categories: &'a [String],
    pub colors: &'a BTreeMap<String, String>,
    pub filter: &'a CategoryFilter,
}

/// Change callback, invoked after every effective mutation
pub type Listener = Box<dyn FnMut(&Snapshot<'_>)>;

pub struct TaskStore<S: KeyValueStore> {
    kv: S,
    tasks: Vec<Task>,
    categories: Vec<String>,
    colors: BTreeMap<String, String>,
    filter: CategoryFilter,
    clock: Clock,
    listener: Option<Listener>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load all collections from `kv`, substituting defaults for missing or
    /// malformed data. A reseeded or cleaned category list is written back
    /// immediately.
    pub fn load(kv: S) -> Self {
        let colors = parse_colors(kv.read(CATEGORY_COLORS_KEY));
        let stored_categories = kv.read(CATEGORIES_KEY);
        let categories = parse_categories(stored_categories.clone());
        let tasks = parse_tasks(kv.read(TASKS_KEY));
        let last_created = tasks.iter().map(|t| t.created_at).max().unwrap_or(0);

        let mut store = Self {
            kv,
            tasks,
            categories: categories.clone().unwrap_or_else(default_categories),
            colors,
            filter: CategoryFilter::All,
            clock: Clock::starting_at(last_created),
            listener: None,
        };

        match categories {
            None => {
                tracing::info!("seeding default categories");
                store.save_categories();
            }
            Some(names) if stored_categories != serde_json::to_value(&names).ok() => {
                tracing::info!("rewriting cleaned category list");
                store.save_categories();
            }
            Some(_) => {}
        }

        tracing::debug!(
            tasks = store.tasks.len(),
            categories = store.categories.len(),
            "task store loaded"
        );
        store
    }

    /// Register the render callback, replacing any previous one
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&Snapshot<'_>) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Colour token recorded for a category
    pub fn color(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// The persistence backend
    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tasks: &self.tasks,
            categories: &self.categories,
            colors: &self.colors,
            filter: &self.filter,
        }
    }

    /// Tasks grouped per category, newest first. Recomputed on every call.
    pub fn group_by_category(&self) -> BTreeMap<String, Vec<Task>> {
        group_by_category(&self.tasks)
    }

    /// Category names in display order
    pub fn sorted_categories(&self) -> Vec<String> {
        sorted_names(&self.categories)
    }

    /// Category sections to render under the active filter
    pub fn visible_categories(&self) -> Vec<String> {
        match &self.filter {
            CategoryFilter::All => self.sorted_categories(),
            CategoryFilter::Category(name) => vec![name.clone()],
        }
    }

    /// (total, done) task counts for a category
    pub fn category_counts(&self, name: &str) -> (usize, usize) {
        self.tasks
            .iter()
            .filter(|t| effective_category(t) == name)
            .fold((0, 0), |(total, done), t| {
                (total + 1, done + usize::from(t.done))
            })
    }

    /// Add a task, auto-creating its category if needed.
    ///
    /// Returns `None` when the title is blank.
    pub fn add_task(&mut self, title: &str, category_name: &str) -> Option<TaskId> {
        let title = title.trim();
        if title.is_empty() {
            tracing::debug!("ignoring task with blank title");
            return None;
        }

        let category = resolve_category(category_name);
        if !self.has_category(&category) {
            tracing::info!(category = %category, "creating category for new task");
            self.categories.push(category.clone());
            self.save_categories();
        }

        let id = self.fresh_id();
        let created_at = self.clock.now_millis();
        self.tasks.insert(
            0,
            Task::new(id.clone(), title.to_string(), category, created_at),
        );
        tracing::info!(id = %id, "task added");

        self.save_tasks();
        self.notify();
        Some(id)
    }

    /// Flip `done` on a task. Unknown ids are ignored.
    pub fn toggle_task(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) else {
            tracing::debug!(id = %id, "toggle: no such task");
            return false;
        };
        task.toggle();
        tracing::info!(id = %id, done = task.done, "task toggled");

        self.save_tasks();
        self.notify();
        true
    }

    /// Remove a task. Unknown ids are ignored.
    pub fn remove_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        if self.tasks.len() == before {
            tracing::debug!(id = %id, "remove: no such task");
            return false;
        }
        tracing::info!(id = %id, "task removed");

        self.save_tasks();
        self.notify();
        true
    }

    /// Remove every completed task, returning how many were dropped
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.done);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return 0;
        }
        tracing::info!(removed, "cleared completed tasks");

        self.save_tasks();
        self.notify();
        removed
    }

    /// Add a category with an optional colour. Blank or duplicate names are
    /// ignored (exact, case-sensitive comparison).
    pub fn add_category(&mut self, name: &str, color: Option<&str>) -> bool {
        let name = name.trim();
        if name.is_empty() || self.has_category(name) {
            tracing::debug!(name, "ignoring blank or duplicate category");
            return false;
        }

        self.categories.push(name.to_string());
        self.save_categories();

        if let Some(color) = color.map(str::trim).filter(|c| !c.is_empty()) {
            self.colors.insert(name.to_string(), color.to_string());
            self.save_colors();
        }
        tracing::info!(name, "category added");

        self.notify();
        true
    }

    /// Remove a category together with all of its tasks.
    ///
    /// The colour entry is left in place. Removing the last category reseeds
    /// the default set.
    pub fn remove_category(&mut self, name: &str) -> bool {
        if !self.has_category(name) {
            tracing::debug!(name, "remove: no such category");
            return false;
        }

        self.categories.retain(|c| c != name);
        let before = self.tasks.len();
        self.tasks.retain(|t| t.category != name);
        tracing::info!(name, cascaded = before - self.tasks.len(), "category removed");

        if self.categories.is_empty() {
            tracing::info!("last category removed, reseeding defaults");
            self.categories = default_categories();
        }
        if self.filter.targets(name) {
            self.filter = CategoryFilter::All;
        }

        self.save_categories();
        self.save_tasks();
        self.notify();
        true
    }

    /// Change the active filter; unknown categories fall back to show-all
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        let filter = match filter {
            CategoryFilter::Category(name) if !self.has_category(&name) => {
                tracing::debug!(name = %name, "filter on unknown category, showing all");
                CategoryFilter::All
            }
            other => other,
        };
        if filter == self.filter {
            return;
        }

        self.filter = filter;
        self.notify();
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if self.task(&id).is_none() {
                return id;
            }
        }
    }

    fn notify(&mut self) {
        if let Some(listener) = &mut self.listener {
            let snapshot = Snapshot {
                tasks: &self.tasks,
                categories: &self.categories,
                colors: &self.colors,
                filter: &self.filter,
            };
            listener(&snapshot);
        }
    }

    fn save_tasks(&mut self) {
        let value = serde_json::to_value(&self.tasks);
        self.put(TASKS_KEY, value);
    }

    fn save_categories(&mut self) {
        let value = serde_json::to_value(&self.categories);
        self.put(CATEGORIES_KEY, value);
    }

    fn save_colors(&mut self) {
        let value = serde_json::to_value(&self.colors);
        self.put(CATEGORY_COLORS_KEY, value);
    }

    fn put(&mut self, key: &str, value: serde_json::Result<Value>) {
        let result = value
            .map_err(crate::error::Error::from)
            .and_then(|value| self.kv.write(key, &value));
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "failed to persist");
        }
    }
}

/// Stored category list: string entries only, trimmed, de-duplicated.
/// `None` when absent, not an array, or empty after cleaning.
fn parse_categories(value: Option<Value>) -> Option<Vec<String>> {
    let Some(Value::Array(items)) = value else {
        return None;
    };

    let mut names: Vec<String> = Vec::new();
    for item in items {
        if let Value::String(name) = item {
            let name = name.trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Stored task list; malformed entries and duplicate ids are skipped.
/// Blank categories are resolved to the default category.
fn parse_tasks(value: Option<Value>) -> Vec<Task> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(_) => {
            tracing::warn!("stored tasks are not a list, starting empty");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let mut tasks: Vec<Task> = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<Task>(item) {
            Ok(task) if tasks.iter().any(|t| t.id == task.id) => {
                tracing::warn!(id = %task.id, "skipping task with duplicate id");
            }
            Ok(mut task) => {
                task.category = resolve_category(&task.category);
                tasks.push(task);
            }
            Err(e) => tracing::warn!(error = %e, "skipping malformed task"),
        }
    }
    tasks
}

/// Stored colour map with the seed colours filled in
fn parse_colors(value: Option<Value>) -> BTreeMap<String, String> {
    let mut colors = BTreeMap::new();

    if let Some(Value::Object(map)) = value {
        for (name, color) in map {
            if let Value::String(color) = color {
                colors.insert(name, color);
            }
        }
    }

    for (name, color) in DEFAULT_COLORS {
        let entry = colors.entry(name.to_string()).or_default();
        if entry.is_empty() {
            *entry = color.to_string();
        }
    }
    colors
}
