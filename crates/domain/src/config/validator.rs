use thiserror::Error;

use super::{CounterConfig, CounterDraft};
use notestat_shared_kernel::DomainError;

/// First rule a counter definition violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("property name is required")]
    PropertyNameRequired,

    #[error("property '{0}' is already used by another counter")]
    DuplicateProperty(String),

    #[error("counter type is required")]
    TypeRequired,

    #[error("parameter must be an integer between {min} and {max}")]
    ParameterOutOfRange { min: i64, max: i64 },

    #[error("counter id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("no counter with id '{0}'")]
    UnknownCounter(String),
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidConfiguration { reason: err.to_string() }
    }
}

/// Side-effect free checks for a single counter definition.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check `candidate` against the rest of the collection, in rule order.
    ///
    /// Configs sharing the candidate's id are the candidate itself and are skipped
    /// by the uniqueness check, so re-validating an edited counter never trips on
    /// its own previous property.
    ///
    /// # Errors
    ///
    /// Returns only the first violated rule.
    pub fn validate(candidate: &CounterDraft, existing: &[CounterConfig]) -> Result<(), ValidationError> {
        let property = candidate.property.trim();
        if property.is_empty() {
            return Err(ValidationError::PropertyNameRequired);
        }

        let duplicate = existing.iter().any(|other| {
            candidate.id.as_ref() != Some(other.id()) && other.property().trim() == property
        });
        if duplicate {
            return Err(ValidationError::DuplicateProperty(property.to_string()));
        }

        let counter_type = candidate.counter_type.ok_or(ValidationError::TypeRequired)?;

        if let (Some(spec), Some(parameter)) = (counter_type.descriptor().parameter, &candidate.parameter) {
            let in_range = parameter.as_integer().is_some_and(|value| spec.contains(value));
            if !in_range {
                return Err(ValidationError::ParameterOutOfRange { min: spec.min, max: spec.max });
            }
        }

        Ok(())
    }
}
