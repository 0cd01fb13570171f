//! Write requests flowing through the guard pipeline

use crate::core::field::WriteData;
use crate::core::validation::ValidationRule;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of write being performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WriteAction {
    Create,
    Update,
    UpdateMany,
    Upsert,
}

impl WriteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteAction::Create => "create",
            WriteAction::Update => "update",
            WriteAction::UpdateMany => "updateMany",
            WriteAction::Upsert => "upsert",
        }
    }

    /// Whether validation runs every rule regardless of field presence
    pub fn validates_all_fields(&self) -> bool {
        matches!(self, WriteAction::Create)
    }
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload(s) of a write
///
/// Serialized untagged. On input, an object is read as upsert branches only
/// when its fields are exactly `create` and `update` and both are objects;
/// anything else is a single payload and keeps every field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WriteArgs {
    /// Both branches of an upsert
    Upsert { create: WriteData, update: WriteData },

    /// Single payload used by create, update and updateMany
    Data(WriteData),
}

impl<'de> Deserialize<'de> for WriteArgs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = WriteData::deserialize(deserializer)?;

        let is_upsert = data.len() == 2
            && matches!(data.get("create"), Some(Value::Object(_)))
            && matches!(data.get("update"), Some(Value::Object(_)));
        if !is_upsert {
            return Ok(WriteArgs::Data(data));
        }

        let branch = |name: &str| {
            data.get(name)
                .cloned()
                .and_then(WriteData::from_json)
                .unwrap_or_default()
        };
        Ok(WriteArgs::Upsert {
            create: branch("create"),
            update: branch("update"),
        })
    }
}

/// What the persistence executor receives
///
/// Per-call guard options are not part of this type, so an executor can
/// never observe them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteParams {
    /// Target model name (e.g., "User")
    pub model: String,

    pub action: WriteAction,

    pub args: WriteArgs,

    /// Equality filter selecting existing rows (ignored by create)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<WriteData>,
}

/// Per-call control options consumed by the validation stage
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Drop the built-in rules for this call
    pub skip_default_validations: bool,

    /// Extra rules, run after the defaults in the order given
    pub custom_validations: Vec<ValidationRule>,
}

impl WriteOptions {
    pub fn is_empty(&self) -> bool {
        !self.skip_default_validations && self.custom_validations.is_empty()
    }
}

/// A single pending write against a model
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub params: WriteParams,
    pub options: WriteOptions,
}

impl WriteRequest {
    /// Create a request from raw parts
    pub fn new(model: impl Into<String>, action: WriteAction, args: WriteArgs) -> Self {
        Self {
            params: WriteParams {
                model: model.into(),
                action,
                args,
                selector: None,
            },
            options: WriteOptions::default(),
        }
    }

    pub fn create(model: impl Into<String>, data: WriteData) -> Self {
        Self::new(model, WriteAction::Create, WriteArgs::Data(data))
    }

    pub fn update(model: impl Into<String>, selector: WriteData, data: WriteData) -> Self {
        Self::new(model, WriteAction::Update, WriteArgs::Data(data)).with_selector(selector)
    }

    pub fn update_many(model: impl Into<String>, selector: WriteData, data: WriteData) -> Self {
        Self::new(model, WriteAction::UpdateMany, WriteArgs::Data(data)).with_selector(selector)
    }

    pub fn upsert(
        model: impl Into<String>,
        selector: WriteData,
        create: WriteData,
        update: WriteData,
    ) -> Self {
        Self::new(model, WriteAction::Upsert, WriteArgs::Upsert { create, update })
            .with_selector(selector)
    }

    /// Set the row selector
    pub fn with_selector(mut self, selector: WriteData) -> Self {
        self.params.selector = Some(selector);
        self
    }

    /// Disable the built-in validation rules for this call
    pub fn skip_default_validations(mut self) -> Self {
        self.options.skip_default_validations = true;
        self
    }

    /// Append a custom validation rule for this call
    pub fn with_custom_validation(mut self, rule: ValidationRule) -> Self {
        self.options.custom_validations.push(rule);
        self
    }

    pub fn model(&self) -> &str {
        &self.params.model
    }

    pub fn action(&self) -> WriteAction {
        self.params.action
    }

    /// Split off the options, leaving a request that carries none
    pub fn take_options(self) -> (Self, WriteOptions) {
        let WriteRequest { params, options } = self;
        (
            WriteRequest {
                params,
                options: WriteOptions::default(),
            },
            options,
        )
    }
}
