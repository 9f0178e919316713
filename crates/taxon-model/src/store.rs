use std::collections::BTreeMap;

use anyhow::anyhow;

/// Durable string slots the manager persists into.
pub trait KeyValueStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;

  fn remove(
    &mut self,
    key: &str
  ) -> anyhow::Result<()>;
}

/// In-memory store. Counts writes so callers can assert
/// that an operation did not persist anything.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  slots:       BTreeMap<String, String>,
  writes:      usize,
  attempts:    usize,
  fail_writes: bool,
  fail_at:     Option<usize>
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_slot(
    mut self,
    key: &str,
    value: &str
  ) -> Self {
    self
      .slots
      .insert(key.to_string(), value.to_string());
    self
  }

  pub fn writes(&self) -> usize {
    self.writes
  }

  pub fn slot(
    &self,
    key: &str
  ) -> Option<&str> {
    self.slots.get(key).map(String::as_str)
  }

  /// Makes every following `set` fail, as a full quota would.
  pub fn fail_writes(
    &mut self,
    fail: bool
  ) {
    self.fail_writes = fail;
  }

  /// Makes only the `n`th following `set` fail (1-based).
  pub fn fail_write_at(
    &mut self,
    n: usize
  ) {
    self.fail_at =
      Some(self.attempts.saturating_add(n));
  }
}

impl KeyValueStore for MemoryStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.slots.get(key).cloned())
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self.attempts = self.attempts.saturating_add(1);
    if self.fail_writes
      || self.fail_at == Some(self.attempts)
    {
      return Err(anyhow!(
        "storage rejected write to {key}"
      ));
    }
    self
      .slots
      .insert(key.to_string(), value.to_string());
    self.writes = self.writes.saturating_add(1);
    Ok(())
  }

  fn remove(
    &mut self,
    key: &str
  ) -> anyhow::Result<()> {
    if self.fail_writes {
      return Err(anyhow!(
        "storage rejected removal of {key}"
      ));
    }
    self.slots.remove(key);
    Ok(())
  }
}
