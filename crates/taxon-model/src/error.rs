use thiserror::Error;

use crate::category::CategoryKind;
use crate::notice::Notice;

#[derive(Debug, Error)]
pub enum CategoryError {
  #[error("stored {kind} categories are malformed: {source}")]
  StorageParse {
    kind:   CategoryKind,
    #[source]
    source: serde_json::Error
  },

  #[error("Category name cannot be empty.")]
  EmptyName,

  #[error("A category with this name already exists.")]
  DuplicateName { kind: CategoryKind, name: String },

  #[error("Please finish editing the current category first.")]
  EditInProgress,

  #[error("Please finish editing before deleting.")]
  DeleteWhileEditing,

  #[error("No category is being edited.")]
  NoActiveEdit,

  #[error("Category not found.")]
  NotFound { kind: CategoryKind, id: String },

  #[error("Could not save categories: {0:#}")]
  Storage(#[source] anyhow::Error)
}

impl CategoryError {
  pub fn notice(&self) -> Option<Notice> {
    match self {
      | Self::StorageParse { .. } => None,
      | Self::EmptyName
      | Self::DuplicateName { .. }
      | Self::Storage(_) => {
        Some(Notice::error(self.to_string()))
      }
      | Self::EditInProgress
      | Self::DeleteWhileEditing
      | Self::NoActiveEdit
      | Self::NotFound { .. } => {
        Some(Notice::warning(self.to_string()))
      }
    }
  }
}
