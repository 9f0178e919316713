use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
  Status,
  Priority
}

impl CategoryKind {
  pub fn all() -> [Self; 2] {
    [Self::Status, Self::Priority]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Status => "status",
      | Self::Priority => "priority"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::Status => "Status",
      | Self::Priority => "Priority"
    }
  }

  /// Accepts the full key or any unambiguous prefix of it,
  /// ignoring case.
  pub fn from_key(
    value: &str
  ) -> Option<Self> {
    let needle =
      value.trim().to_ascii_lowercase();
    if needle.is_empty() {
      return None;
    }

    let mut matches = Self::all()
      .into_iter()
      .filter(|kind| {
        kind.as_key().starts_with(&needle)
      });
    let first = matches.next()?;
    if matches.next().is_some() {
      None
    } else {
      Some(first)
    }
  }
}

impl fmt::Display for CategoryKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_key())
  }
}

impl FromStr for CategoryKind {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    Self::from_key(s).ok_or_else(|| {
      anyhow!(
        "unknown category list: {s} \
         (expected status or priority)"
      )
    })
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Category {
  pub id:   String,
  pub name: String
}

impl Category {
  pub fn new(name: &str) -> Self {
    Self {
      id:   generate_id(),
      name: name.to_string()
    }
  }

  pub fn has_name(
    &self,
    name: &str
  ) -> bool {
    names_equal(&self.name, name)
  }
}

/// Random v4 id. Not checked against existing records.
pub fn generate_id() -> String {
  Uuid::new_v4().to_string()
}

pub fn names_equal(
  left: &str,
  right: &str
) -> bool {
  left.to_lowercase()
    == right.to_lowercase()
}

/// True when another entry of `list` (ignoring `except_id`)
/// already carries `name`.
pub fn name_taken(
  list: &[Category],
  name: &str,
  except_id: Option<&str>
) -> bool {
  list.iter().any(|category| {
    Some(category.id.as_str())
      != except_id
      && category.has_name(name)
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kind_parses_prefixes_and_case() {
    assert_eq!(
      CategoryKind::from_key("Status"),
      Some(CategoryKind::Status)
    );
    assert_eq!(
      CategoryKind::from_key("pri"),
      Some(CategoryKind::Priority)
    );
    assert_eq!(
      CategoryKind::from_key(""),
      None
    );
    assert!(
      "tags"
        .parse::<CategoryKind>()
        .is_err()
    );
  }

  #[test]
  fn kind_serializes_lowercase() {
    let json = serde_json::to_string(
      &CategoryKind::Priority
    )
    .expect("serialize kind");
    assert_eq!(json, "\"priority\"");
  }

  #[test]
  fn name_taken_ignores_case_and_self()
  {
    let list = vec![
      Category {
        id:   "a".to_string(),
        name: "Completed".to_string()
      },
      Category {
        id:   "b".to_string(),
        name: "In Progress".to_string()
      },
    ];

    assert!(name_taken(
      &list,
      "completed",
      Some("b")
    ));
    assert!(!name_taken(
      &list,
      "COMPLETED",
      Some("a")
    ));
    assert!(!name_taken(
      &list, "Blocked", None
    ));
  }

  #[test]
  fn generated_ids_differ() {
    assert_ne!(
      generate_id(),
      generate_id()
    );
  }
}
