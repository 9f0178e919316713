use serde::{
  Deserialize,
  Serialize
};

use crate::category::{
  Category,
  CategoryKind,
  name_taken
};

pub const DEFAULT_STATUS_KEY: &str =
  "todoStatusCategories";
pub const DEFAULT_PRIORITY_KEY: &str =
  "todoPriorityCategories";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct CategoryConfig {
  #[serde(default = "default_version")]
  pub version:  u32,
  #[serde(default)]
  pub storage:  StorageKeys,
  #[serde(default)]
  pub defaults: SeedDefaults
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct StorageKeys {
  #[serde(default = "default_status_key")]
  pub status_key:   String,
  #[serde(
    default = "default_priority_key"
  )]
  pub priority_key: String
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct SeedDefaults {
  #[serde(default = "default_status_names")]
  pub status:   Vec<String>,
  #[serde(
    default = "default_priority_names"
  )]
  pub priority: Vec<String>
}

impl StorageKeys {
  pub fn key(
    &self,
    kind: CategoryKind
  ) -> &str {
    match kind {
      | CategoryKind::Status => {
        &self.status_key
      }
      | CategoryKind::Priority => {
        &self.priority_key
      }
    }
  }

  /// Both lists need their own slot; a shared key would let
  /// one list overwrite the other.
  pub fn distinct(&self) -> bool {
    self.status_key != self.priority_key
  }
}

impl SeedDefaults {
  pub fn names(
    &self,
    kind: CategoryKind
  ) -> &[String] {
    match kind {
      | CategoryKind::Status => {
        &self.status
      }
      | CategoryKind::Priority => {
        &self.priority
      }
    }
  }

  /// Fresh records for `kind`. Blank and repeated names in
  /// the configuration are dropped so the seeded list is
  /// already valid.
  pub fn seed(
    &self,
    kind: CategoryKind
  ) -> Vec<Category> {
    let mut out: Vec<Category> = vec![];
    for raw in self.names(kind) {
      let name = raw.trim();
      if name.is_empty()
        || name_taken(&out, name, None)
      {
        continue;
      }
      out.push(Category::new(name));
    }
    out
  }
}

impl Default for CategoryConfig {
  fn default() -> Self {
    Self {
      version:  default_version(),
      storage:  StorageKeys::default(),
      defaults: SeedDefaults::default()
    }
  }
}

impl Default for StorageKeys {
  fn default() -> Self {
    Self {
      status_key:   default_status_key(),
      priority_key: default_priority_key()
    }
  }
}

impl Default for SeedDefaults {
  fn default() -> Self {
    Self {
      status:   default_status_names(),
      priority: default_priority_names()
    }
  }
}

fn default_version() -> u32 {
  1
}

fn default_status_key() -> String {
  DEFAULT_STATUS_KEY.to_string()
}

fn default_priority_key() -> String {
  DEFAULT_PRIORITY_KEY.to_string()
}

fn default_status_names() -> Vec<String>
{
  vec![
    "Completed".to_string(),
    "In Progress".to_string(),
    "Not Started".to_string(),
  ]
}

fn default_priority_names()
-> Vec<String> {
  vec![
    "Extreme".to_string(),
    "Moderate".to_string(),
    "Low".to_string(),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_missing_defaults()
  {
    let cfg: CategoryConfig =
      toml::from_str(
        r#"
[storage]
status_key = "custom.status"

[defaults]
priority = ["High", "Low"]
"#
      )
      .expect("parse config");

    assert_eq!(cfg.version, 1);
    assert_eq!(
      cfg
        .storage
        .key(CategoryKind::Status),
      "custom.status"
    );
    assert_eq!(
      cfg
        .storage
        .key(CategoryKind::Priority),
      DEFAULT_PRIORITY_KEY
    );
    assert_eq!(
      cfg
        .defaults
        .names(CategoryKind::Status)
        .len(),
      3
    );
    assert_eq!(
      cfg
        .defaults
        .names(CategoryKind::Priority),
      ["High", "Low"]
    );
  }

  #[test]
  fn seed_drops_blank_and_repeated_names()
  {
    let defaults = SeedDefaults {
      status:   vec![
        "Open".to_string(),
        "  ".to_string(),
        "open".to_string(),
        " Done ".to_string(),
      ],
      priority: vec![]
    };

    let names: Vec<String> = defaults
      .seed(CategoryKind::Status)
      .into_iter()
      .map(|category| category.name)
      .collect();
    assert_eq!(names, ["Open", "Done"]);
    assert!(
      defaults
        .seed(CategoryKind::Priority)
        .is_empty()
    );
  }
}
