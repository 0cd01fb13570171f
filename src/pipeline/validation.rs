//! Validation stage

use super::WriteStage;
use crate::config::GuardConfig;
use crate::core::request::{WriteAction, WriteArgs, WriteRequest};
use crate::core::validation::{ValidationRule, default_rules, validate_payload};
use anyhow::Result;
use async_trait::async_trait;

/// Rejects writes to the user entity that fail a validation rule
///
/// Always consumes the per-call options, whatever the outcome.
pub struct ValidationStage {
    config: GuardConfig,
    defaults: Vec<ValidationRule>,
}

impl ValidationStage {
    pub fn new(config: GuardConfig) -> Self {
        let defaults = default_rules(&config);
        Self { config, defaults }
    }

    fn effective_rules(
        &self,
        skip_defaults: bool,
        custom: Vec<ValidationRule>,
    ) -> Vec<ValidationRule> {
        let mut rules = if skip_defaults {
            Vec::new()
        } else {
            self.defaults.clone()
        };
        rules.extend(custom);
        rules
    }
}

#[async_trait]
impl WriteStage for ValidationStage {
    fn name(&self) -> &'static str {
        "validation"
    }

    async fn apply(&self, request: WriteRequest) -> Result<WriteRequest> {
        let (request, options) = request.take_options();

        if !self.config.governs(request.model()) {
            return Ok(request);
        }

        let rules = self.effective_rules(
            options.skip_default_validations,
            options.custom_validations,
        );

        tracing::debug!(
            model = %request.model(),
            action = %request.action(),
            rules = rules.len(),
            "Validating write"
        );

        let outcome = match (&request.params.action, &request.params.args) {
            (WriteAction::Upsert, WriteArgs::Upsert { create, update }) => {
                validate_payload(create, &rules, true)
                    .and_then(|_| validate_payload(update, &rules, false))
            }
            (WriteAction::Upsert, WriteArgs::Data(_)) => {
                anyhow::bail!("upsert write is missing its create/update payloads")
            }
            (action, WriteArgs::Data(data)) => {
                validate_payload(data, &rules, action.validates_all_fields())
            }
            (action, WriteArgs::Upsert { .. }) => {
                anyhow::bail!("{} write carries upsert payloads", action)
            }
        };

        if let Err(e) = outcome {
            tracing::warn!(
                model = %request.model(),
                action = %request.action(),
                reason = %e,
                "Write rejected by validation"
            );
            return Err(e.into());
        }

        Ok(request)
    }
}
