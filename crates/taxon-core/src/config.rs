use std::collections::BTreeMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use taxon_model::{
  CategoryConfig,
  CategoryKind
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

#[derive(Debug, Clone)]
pub struct Config {
  map:              BTreeMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Config {
  /// Built-in defaults only, no rc file.
  pub fn defaults() -> Self {
    let mut cfg = Config {
      map:          BTreeMap::new(),
      loaded_files: vec![]
    };

    let category_defaults =
      CategoryConfig::default();
    let pairs = [
      ("data.location", "~/.taxon".to_string()),
      ("default.command", "list".to_string()),
      ("color", "on".to_string()),
      ("confirmation", "on".to_string()),
      (
        "storage.status_key",
        category_defaults.storage.status_key
      ),
      (
        "storage.priority_key",
        category_defaults.storage.priority_key
      ),
      (
        "defaults.status",
        category_defaults.defaults.status.join(",")
      ),
      (
        "defaults.priority",
        category_defaults
          .defaults
          .priority
          .join(",")
      ),
    ];
    for (key, value) in pairs {
      cfg.map.insert(key.to_string(), value);
    }

    cfg
  }

  #[tracing::instrument(skip(
    taxonrc_override
  ))]
  pub fn load(
    taxonrc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::defaults();

    let taxonrc = resolve_taxonrc_path(
      taxonrc_override
    )?;
    if let Some(path) = taxonrc {
      info!(taxonrc = %path.display(), "loading taxonrc");
      cfg.load_file(&path)?;
    } else {
      warn!(
        "no taxonrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = (&String, &String)>
  {
    self.map.iter()
  }

  /// Storage keys and seeded names for the category
  /// manager. Seed lists are comma separated.
  pub fn category_config(
    &self
  ) -> anyhow::Result<CategoryConfig> {
    let mut out = CategoryConfig::default();

    if let Some(key) =
      self.get("storage.status_key")
    {
      out.storage.status_key = key;
    }
    if let Some(key) =
      self.get("storage.priority_key")
    {
      out.storage.priority_key = key;
    }

    for kind in CategoryKind::all() {
      let Some(raw) = self.get(&format!(
        "defaults.{}",
        kind.as_key()
      )) else {
        continue;
      };
      let names = split_list(&raw);
      match kind {
        | CategoryKind::Status => {
          out.defaults.status = names;
        }
        | CategoryKind::Priority => {
          out.defaults.priority = names;
        }
      }
    }

    if !out.storage.distinct() {
      return Err(anyhow!(
        "storage.status_key and \
         storage.priority_key must \
         differ (both are {:?})",
        out.storage.status_key
      ));
    }

    Ok(out)
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        if self
          .loaded_files
          .contains(&include_path)
        {
          warn!(include = %include_path.display(), "include cycle; skipping");
          continue;
        }
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self
            .load_file(&include_path)?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else if let Some(cfg_value) =
    cfg.get("data.location")
  {
    expand_tilde(Path::new(&cfg_value))
  } else {
    default_data_dir()?
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_taxonrc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(taxonrc_env) =
    std::env::var("TAXONRC")
  {
    if taxonrc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      taxonrc_env
    )));
  }

  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory"
      )
    })?;
  let candidate = home.join(".taxonrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn default_data_dir()
-> anyhow::Result<PathBuf> {
  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory"
      )
    })?;
  Ok(home.join(".taxon"))
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn split_list(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(ToString::to_string)
    .collect()
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn rc_file_and_includes_override_defaults()
  {
    let temp = tempdir().expect("tempdir");
    let extra = temp.path().join("extra.rc");
    fs::write(
      &extra,
      "defaults.priority = High, ,Low\n"
    )
    .expect("write include");
    let main = temp.path().join("taxonrc");
    fs::write(
      &main,
      "# comment\n\
       color=off # trailing\n\
       storage.status_key = my.status\n\
       include extra.rc\n"
    )
    .expect("write rc");

    let cfg = Config::load(Some(main.as_path()))
      .expect("load config");
    assert_eq!(
      cfg.get_bool("color"),
      Some(false)
    );
    assert_eq!(cfg.loaded_files.len(), 2);

    let categories = cfg
      .category_config()
      .expect("category config");
    assert_eq!(
      categories.storage.status_key,
      "my.status"
    );
    assert_eq!(
      categories.defaults.priority,
      ["High", "Low"]
    );
    assert_eq!(
      categories.defaults.status.len(),
      3
    );
  }

  #[test]
  fn shared_storage_key_is_rejected() {
    let mut cfg = Config::defaults();
    cfg.apply_overrides([(
      "rc.storage.priority_key".to_string(),
      "todoStatusCategories".to_string()
    )]);
    let err = cfg
      .category_config()
      .expect_err("keys collide");
    assert!(
      err
        .to_string()
        .contains("must differ")
    );
  }

  #[test]
  fn overrides_strip_rc_prefix() {
    let mut cfg = Config::defaults();
    cfg.apply_overrides([(
      "rc.confirmation".to_string(),
      "off".to_string()
    )]);
    assert_eq!(
      cfg.get_bool("confirmation"),
      Some(false)
    );
    assert_eq!(
      cfg.get("default.command").as_deref(),
      Some("list")
    );
  }

  #[test]
  fn malformed_line_is_an_error() {
    let temp = tempdir().expect("tempdir");
    let rc = temp.path().join("taxonrc");
    fs::write(&rc, "not a pair\n")
      .expect("write rc");
    assert!(Config::load(Some(rc.as_path())).is_err());
  }
}
