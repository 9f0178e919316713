//! Status and priority categories for a to-do dashboard,
//! with a single-row inline edit state machine and
//! persistence through a [`KeyValueStore`].

pub mod category;
pub mod config;
pub mod edit;
pub mod error;
pub mod manager;
pub mod notice;
pub mod store;

pub use category::{
  Category,
  CategoryKind
};
pub use config::CategoryConfig;
pub use edit::{
  ActiveEdit,
  EditState,
  RowMode,
  RowView
};
pub use error::CategoryError;
pub use manager::CategoryManager;
pub use notice::{
  Notice,
  Severity
};
pub use store::{
  KeyValueStore,
  MemoryStore
};
