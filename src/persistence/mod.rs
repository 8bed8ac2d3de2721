pub mod files;
pub mod kv;

pub use files::{init_local_dir, resolve_data_dir};
pub use kv::{FileStore, KeyValueStore, MemoryStore, CATEGORIES_KEY, CATEGORY_COLORS_KEY, TASKS_KEY};
