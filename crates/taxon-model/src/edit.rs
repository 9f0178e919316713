//! Inline edit state shared by both tables. At most one row
//! across both lists can be in [`EditState::Active`].

use crate::category::{
  Category,
  CategoryKind,
  name_taken
};
use crate::error::CategoryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEdit {
  pub kind:          CategoryKind,
  pub id:            String,
  pub original_name: String,
  pub draft:         String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub enum EditState {
  #[default]
  Idle,
  Active(ActiveEdit)
}

impl EditState {
  pub fn active(&self) -> Option<&ActiveEdit> {
    match self {
      | Self::Idle => None,
      | Self::Active(edit) => Some(edit)
    }
  }

  pub fn is_active(&self) -> bool {
    self.active().is_some()
  }

  pub fn is_editing(
    &self,
    kind: CategoryKind,
    id: &str
  ) -> bool {
    self.active().is_some_and(|edit| {
      edit.kind == kind && edit.id == id
    })
  }

  /// `Idle -> Active` for `category`.
  pub fn begin(
    &self,
    kind: CategoryKind,
    category: &Category
  ) -> Result<EditState, CategoryError> {
    if self.is_active() {
      return Err(
        CategoryError::EditInProgress
      );
    }

    Ok(Self::Active(ActiveEdit {
      kind,
      id: category.id.clone(),
      original_name: category.name.clone(),
      draft: category.name.clone()
    }))
  }

  pub fn with_draft(
    &self,
    draft: &str
  ) -> Result<EditState, CategoryError> {
    let Some(edit) = self.active() else {
      return Err(CategoryError::NoActiveEdit);
    };

    Ok(Self::Active(ActiveEdit {
      draft: draft.to_string(),
      ..edit.clone()
    }))
  }

  /// Discards the draft. Cancelling while idle is a no-op.
  pub fn cancel(&self) -> EditState {
    Self::Idle
  }
}

/// Checks a proposed name against `list`, ignoring the
/// record `except_id` so a row may keep its own name in a
/// different case. Returns the trimmed name.
pub fn validate_name(
  kind: CategoryKind,
  list: &[Category],
  raw: &str,
  except_id: Option<&str>
) -> Result<String, CategoryError> {
  let name = raw.trim();
  if name.is_empty() {
    return Err(CategoryError::EmptyName);
  }
  if name_taken(list, name, except_id) {
    return Err(
      CategoryError::DuplicateName {
        kind,
        name: name.to_string()
      }
    );
  }
  Ok(name.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
  Viewing,
  Editing { draft: String }
}

/// Declarative row for the table views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
  pub id:   String,
  pub kind: CategoryKind,
  pub name: String,
  pub mode: RowMode
}

impl RowView {
  pub fn is_editing(&self) -> bool {
    matches!(
      self.mode,
      RowMode::Editing { .. }
    )
  }

  /// Text the row shows: the draft while editing, the
  /// stored name otherwise.
  pub fn display_name(&self) -> &str {
    match &self.mode {
      | RowMode::Viewing => &self.name,
      | RowMode::Editing { draft } => draft
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn category(
    id: &str,
    name: &str
  ) -> Category {
    Category {
      id:   id.to_string(),
      name: name.to_string()
    }
  }

  #[test]
  fn begin_from_idle_captures_original_name()
  {
    let row = category("a", "Low");
    let next = EditState::Idle
      .begin(CategoryKind::Priority, &row)
      .expect("begin");

    let edit =
      next.active().expect("active edit");
    assert_eq!(edit.original_name, "Low");
    assert_eq!(edit.draft, "Low");
    assert!(next.is_editing(
      CategoryKind::Priority,
      "a"
    ));
    assert!(!next.is_editing(
      CategoryKind::Status,
      "a"
    ));
  }

  #[test]
  fn begin_while_active_is_rejected() {
    let first = EditState::Idle
      .begin(
        CategoryKind::Status,
        &category("a", "Completed")
      )
      .expect("begin");

    let err = first
      .begin(
        CategoryKind::Priority,
        &category("b", "Low")
      )
      .expect_err("second edit");
    assert!(matches!(
      err,
      CategoryError::EditInProgress
    ));
    assert!(first.is_editing(
      CategoryKind::Status,
      "a"
    ));
  }

  #[test]
  fn draft_requires_an_active_edit() {
    assert!(matches!(
      EditState::Idle.with_draft("x"),
      Err(CategoryError::NoActiveEdit)
    ));

    let active = EditState::Idle
      .begin(
        CategoryKind::Status,
        &category("a", "Completed")
      )
      .expect("begin")
      .with_draft("Done")
      .expect("draft");
    let edit =
      active.active().expect("active");
    assert_eq!(edit.draft, "Done");
    assert_eq!(edit.original_name, "Completed");
    assert_eq!(active.cancel(), EditState::Idle);
  }

  #[test]
  fn validate_name_trims_and_checks_duplicates()
  {
    let list = vec![
      category("a", "Completed"),
      category("b", "In Progress"),
    ];

    assert_eq!(
      validate_name(
        CategoryKind::Status,
        &list,
        "  Blocked ",
        None
      )
      .expect("valid"),
      "Blocked"
    );
    assert!(matches!(
      validate_name(
        CategoryKind::Status,
        &list,
        "   ",
        None
      ),
      Err(CategoryError::EmptyName)
    ));
    assert!(matches!(
      validate_name(
        CategoryKind::Status,
        &list,
        "completed",
        Some("b")
      ),
      Err(CategoryError::DuplicateName { .. })
    ));
    assert_eq!(
      validate_name(
        CategoryKind::Status,
        &list,
        "COMPLETED",
        Some("a")
      )
      .expect("own name"),
      "COMPLETED"
    );
  }
}
