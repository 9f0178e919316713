use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Success,
  Error,
  Warning
}

impl Severity {
  pub fn as_class(self) -> &'static str {
    match self {
      | Self::Success => "success",
      | Self::Error => "error",
      | Self::Warning => "warning"
    }
  }
}

/// Transient message for the notification surface.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Notice {
  pub message:  String,
  pub severity: Severity
}

impl Notice {
  pub fn success(
    message: impl Into<String>
  ) -> Self {
    Self {
      message:  message.into(),
      severity: Severity::Success
    }
  }

  pub fn error(
    message: impl Into<String>
  ) -> Self {
    Self {
      message:  message.into(),
      severity: Severity::Error
    }
  }

  pub fn warning(
    message: impl Into<String>
  ) -> Self {
    Self {
      message:  message.into(),
      severity: Severity::Warning
    }
  }
}
