use tracing::{
  debug,
  info,
  warn
};

use crate::category::{
  Category,
  CategoryKind
};
use crate::config::CategoryConfig;
use crate::edit::{
  ActiveEdit,
  EditState,
  RowMode,
  RowView,
  validate_name
};
use crate::error::CategoryError;
use crate::notice::Notice;
use crate::store::KeyValueStore;

pub const UPDATED_MESSAGE: &str =
  "Category updated successfully!";
pub const DELETED_MESSAGE: &str =
  "Category deleted successfully!";
pub const ADDED_MESSAGE: &str =
  "Category added successfully!";

/// Owns both category lists, the edit state and the store
/// they are persisted to. Every successful mutation is
/// written back before its notice is returned.
#[derive(Debug)]
pub struct CategoryManager<S> {
  store:    S,
  config:   CategoryConfig,
  status:   Vec<Category>,
  priority: Vec<Category>,
  edit:     EditState
}

impl<S: KeyValueStore> CategoryManager<S> {
  /// Restores both lists from `store`. A missing slot is
  /// seeded from the configured defaults; unreadable or
  /// malformed data in either slot reseeds both lists.
  /// Nothing is written back.
  #[tracing::instrument(skip_all)]
  pub fn load(
    store: S,
    config: CategoryConfig
  ) -> Self {
    let (status, priority) =
      match read_lists(&store, &config) {
        | Ok(lists) => lists,
        | Err(error) => {
          warn!(
            %error,
            "stored categories unusable; \
             falling back to defaults"
          );
          (
            config
              .defaults
              .seed(CategoryKind::Status),
            config
              .defaults
              .seed(CategoryKind::Priority)
          )
        }
      };

    info!(
      status = status.len(),
      priority = priority.len(),
      "loaded categories"
    );

    Self {
      store,
      config,
      status,
      priority,
      edit: EditState::Idle
    }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn list(
    &self,
    kind: CategoryKind
  ) -> &[Category] {
    match kind {
      | CategoryKind::Status => &self.status,
      | CategoryKind::Priority => {
        &self.priority
      }
    }
  }

  fn list_mut(
    &mut self,
    kind: CategoryKind
  ) -> &mut Vec<Category> {
    match kind {
      | CategoryKind::Status => {
        &mut self.status
      }
      | CategoryKind::Priority => {
        &mut self.priority
      }
    }
  }

  pub fn find(
    &self,
    kind: CategoryKind,
    id: &str
  ) -> Option<&Category> {
    self
      .list(kind)
      .iter()
      .find(|category| category.id == id)
  }

  /// Resolves a row by id first, then by name ignoring case.
  pub fn resolve(
    &self,
    kind: CategoryKind,
    id_or_name: &str
  ) -> Option<&Category> {
    let needle = id_or_name.trim();
    self.find(kind, needle).or_else(|| {
      self
        .list(kind)
        .iter()
        .find(|category| {
          category.has_name(needle)
        })
    })
  }

  pub fn edit_state(&self) -> &EditState {
    &self.edit
  }

  /// Rows of `kind` whose name contains `query` (trimmed,
  /// ignoring case). The row being edited always stays.
  pub fn rows(
    &self,
    kind: CategoryKind,
    query: &str
  ) -> Vec<RowView> {
    let needle =
      query.trim().to_lowercase();
    self
      .list(kind)
      .iter()
      .filter_map(|category| {
        let mode = match self.edit.active() {
          | Some(edit)
            if edit.kind == kind
              && edit.id == category.id =>
          {
            RowMode::Editing {
              draft: edit.draft.clone()
            }
          }
          | _ => RowMode::Viewing
        };

        let matches = needle.is_empty()
          || category
            .name
            .to_lowercase()
            .contains(&needle);
        if !matches
          && mode == RowMode::Viewing
        {
          return None;
        }

        Some(RowView {
          id: category.id.clone(),
          kind,
          name: category.name.clone(),
          mode
        })
      })
      .collect()
  }

  #[tracing::instrument(skip(self))]
  pub fn begin_edit(
    &mut self,
    kind: CategoryKind,
    id: &str
  ) -> Result<(), CategoryError> {
    let category =
      self.find(kind, id).ok_or_else(|| {
        CategoryError::NotFound {
          kind,
          id: id.to_string()
        }
      })?;
    let next =
      self.edit.begin(kind, category)?;
    debug!("edit started");
    self.edit = next;
    Ok(())
  }

  pub fn update_draft(
    &mut self,
    draft: &str
  ) -> Result<(), CategoryError> {
    self.edit = self.edit.with_draft(draft)?;
    Ok(())
  }

  /// Commits the active edit of row `id`. Validation
  /// failures keep the row in edit mode.
  #[tracing::instrument(skip(self))]
  pub fn save_edit(
    &mut self,
    kind: CategoryKind,
    id: &str
  ) -> Result<Notice, CategoryError> {
    let edit = self.active_row(kind, id)?;
    let name = validate_name(
      kind,
      self.list(kind),
      &edit.draft,
      Some(id)
    )?;

    let Some(index) = self
      .list(kind)
      .iter()
      .position(|category| category.id == id)
    else {
      self.edit = self.edit.cancel();
      return Err(CategoryError::NotFound {
        kind,
        id: id.to_string()
      });
    };
    let previous = std::mem::replace(
      &mut self.list_mut(kind)[index].name,
      name.clone()
    );

    if let Err(error) = self.persist() {
      self.list_mut(kind)[index].name =
        previous;
      return Err(error);
    }

    info!(
      from = %edit.original_name,
      to = %name,
      "category renamed"
    );
    self.edit = self.edit.cancel();
    Ok(Notice::success(UPDATED_MESSAGE))
  }

  /// Reverts row `id` to its name from before the edit.
  /// No storage write happens.
  pub fn cancel_edit(
    &mut self,
    kind: CategoryKind,
    id: &str
  ) -> Result<(), CategoryError> {
    self.active_row(kind, id)?;
    self.edit = self.edit.cancel();
    debug!(%kind, id, "edit cancelled");
    Ok(())
  }

  /// Global cancel (Escape anywhere, or another global
  /// action starting). Returns the discarded edit, if any.
  pub fn cancel_all(
    &mut self
  ) -> Option<ActiveEdit> {
    let discarded =
      self.edit.active().cloned();
    self.edit = self.edit.cancel();
    if let Some(edit) = &discarded {
      debug!(
        kind = %edit.kind,
        id = %edit.id,
        "active edit cancelled"
      );
    }
    discarded
  }

  /// Starting the add flow abandons any inline edit.
  pub fn open_add(
    &mut self
  ) -> Option<ActiveEdit> {
    self.cancel_all()
  }

  #[tracing::instrument(skip(self))]
  pub fn add(
    &mut self,
    kind: CategoryKind,
    raw_name: &str
  ) -> Result<Notice, CategoryError> {
    self.cancel_all();
    let name = validate_name(
      kind,
      self.list(kind),
      raw_name,
      None
    )?;

    let category = Category::new(&name);
    let id = category.id.clone();
    self.list_mut(kind).push(category);

    if let Err(error) = self.persist() {
      self
        .list_mut(kind)
        .retain(|category| category.id != id);
      return Err(error);
    }

    info!(%kind, %name, %id, "category added");
    Ok(Notice::success(ADDED_MESSAGE))
  }

  /// Removes row `id` once `confirm` agrees. Declining
  /// returns `Ok(None)`; an unknown id is ignored the same
  /// way.
  #[tracing::instrument(skip(self, confirm))]
  pub fn delete<F>(
    &mut self,
    kind: CategoryKind,
    id: &str,
    confirm: F
  ) -> Result<Option<Notice>, CategoryError>
  where
    F: FnOnce(&Category) -> bool
  {
    if self.edit.is_active() {
      return Err(
        CategoryError::DeleteWhileEditing
      );
    }

    let Some(index) = self
      .list(kind)
      .iter()
      .position(|category| category.id == id)
    else {
      debug!("delete target not found");
      return Ok(None);
    };

    if !confirm(&self.list(kind)[index]) {
      debug!("delete declined");
      return Ok(None);
    }

    let removed =
      self.list_mut(kind).remove(index);
    if let Err(error) = self.persist() {
      self
        .list_mut(kind)
        .insert(index, removed);
      return Err(error);
    }

    info!(
      %kind,
      name = %removed.name,
      "category deleted"
    );
    Ok(Some(Notice::success(
      DELETED_MESSAGE
    )))
  }

  fn active_row(
    &self,
    kind: CategoryKind,
    id: &str
  ) -> Result<ActiveEdit, CategoryError> {
    match self.edit.active() {
      | Some(edit)
        if edit.kind == kind && edit.id == id =>
      {
        Ok(edit.clone())
      }
      | _ => Err(CategoryError::NoActiveEdit)
    }
  }

  /// Writes both lists back to their slots. If a later
  /// write fails, slots already written get their previous
  /// contents back.
  fn persist(
    &mut self
  ) -> Result<(), CategoryError> {
    let mut pending = Vec::with_capacity(2);
    for kind in CategoryKind::all() {
      let key = self
        .config
        .storage
        .key(kind)
        .to_string();
      let json =
        serde_json::to_string(self.list(kind))
          .map_err(|err| {
            CategoryError::Storage(err.into())
          })?;
      let previous = self
        .store
        .get(&key)
        .map_err(CategoryError::Storage)?;
      pending.push(PendingSlot {
        key,
        json,
        previous
      });
    }

    for (index, slot) in
      pending.iter().enumerate()
    {
      if let Err(error) =
        self.store.set(&slot.key, &slot.json)
      {
        self.restore_slots(&pending[..index]);
        return Err(CategoryError::Storage(
          error
        ));
      }
    }
    debug!("categories persisted");
    Ok(())
  }

  fn restore_slots(
    &mut self,
    written: &[PendingSlot]
  ) {
    for slot in written.iter().rev() {
      let restored = match &slot.previous {
        | Some(raw) => {
          self.store.set(&slot.key, raw)
        }
        | None => self.store.remove(&slot.key)
      };
      if let Err(error) = restored {
        warn!(
          key = %slot.key,
          error = %format!("{error:#}"),
          "could not restore slot after failed write"
        );
      }
    }
  }
}

struct PendingSlot {
  key:      String,
  json:     String,
  previous: Option<String>
}

fn read_lists<S: KeyValueStore>(
  store: &S,
  config: &CategoryConfig
) -> Result<
  (Vec<Category>, Vec<Category>),
  CategoryError
> {
  Ok((
    read_list(
      store,
      config,
      CategoryKind::Status
    )?,
    read_list(
      store,
      config,
      CategoryKind::Priority
    )?
  ))
}

fn read_list<S: KeyValueStore>(
  store: &S,
  config: &CategoryConfig,
  kind: CategoryKind
) -> Result<Vec<Category>, CategoryError> {
  let key = config.storage.key(kind);
  let stored = store
    .get(key)
    .map_err(CategoryError::Storage)?;

  match stored {
    | Some(raw) => {
      serde_json::from_str(&raw).map_err(
        |source| {
          CategoryError::StorageParse {
            kind,
            source
          }
        }
      )
    }
    | None => {
      debug!(%kind, key, "no stored list; seeding");
      Ok(config.defaults.seed(kind))
    }
  }
}
