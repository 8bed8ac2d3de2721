pub mod category;
pub mod enums;
pub mod task;
pub mod views;

pub use category::{
    default_categories, default_category, resolve_category, CategoryFilter, DEFAULT_COLORS,
    PALETTE,
};
pub use enums::UiMode;
pub use task::{Clock, Task, TaskId};
pub use views::{flatten_sections, group_by_category, sorted_names, summary, Row};
