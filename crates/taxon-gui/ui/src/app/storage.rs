use anyhow::anyhow;
use taxon_model::{
  CategoryConfig,
  KeyValueStore
};
use wasm_bindgen::JsValue;

const CATEGORY_CONFIG_TOML: &str =
  include_str!("../../assets/categories.toml");

/// `window.localStorage` as a key-value store.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
  fn storage()
  -> anyhow::Result<web_sys::Storage> {
    web_sys::window()
      .ok_or_else(|| anyhow!("no window"))?
      .local_storage()
      .map_err(js_error)?
      .ok_or_else(|| {
        anyhow!(
          "local storage is not \
           available"
        )
      })
  }
}

impl KeyValueStore for LocalStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Self::storage()?
      .get_item(key)
      .map_err(js_error)
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    Self::storage()?
      .set_item(key, value)
      .map_err(js_error)
  }

  fn remove(
    &mut self,
    key: &str
  ) -> anyhow::Result<()> {
    Self::storage()?
      .remove_item(key)
      .map_err(js_error)
  }
}

fn js_error(
  err: JsValue
) -> anyhow::Error {
  anyhow!("{err:?}")
}

pub fn load_category_config()
-> CategoryConfig {
  parse_category_config(
    CATEGORY_CONFIG_TOML
  )
}

fn parse_category_config(
  raw: &str
) -> CategoryConfig {
  match toml::from_str::<CategoryConfig>(
    raw
  ) {
    | Ok(config) if !config.storage.distinct() => {
      tracing::error!(
        key = %config.storage.status_key,
        "status and priority share a storage key; using built-in defaults"
      );
      CategoryConfig::default()
    }
    | Ok(config) => {
      tracing::info!(
        version = config.version,
        status_key = %config.storage.status_key,
        priority_key = %config.storage.priority_key,
        "loaded category config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(%error, "failed to parse category config; using built-in defaults");
      CategoryConfig::default()
    }
  }
}

#[cfg(test)]
mod storage_tests {
  use taxon_model::CategoryKind;

  use super::*;

  #[test]
  fn bundled_config_matches_builtin_defaults()
  {
    assert_eq!(
      load_category_config(),
      CategoryConfig::default()
    );
  }

  #[test]
  fn broken_config_falls_back() {
    let config =
      parse_category_config("version = [");
    assert_eq!(
      config
        .defaults
        .names(CategoryKind::Priority),
      ["Extreme", "Moderate", "Low"]
    );
  }

  #[test]
  fn shared_storage_key_falls_back() {
    let config = parse_category_config(
      "[storage]\n\
       status_key = \"slot\"\n\
       priority_key = \"slot\"\n"
    );
    assert_eq!(
      config,
      CategoryConfig::default()
    );
  }
}
