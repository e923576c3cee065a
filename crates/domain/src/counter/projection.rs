use crate::{
    config::CounterConfig,
    model::{FileStats, HeadingLevel},
};
use notestat_shared_kernel::{DomainError, DomainResult};

/// Derive the scalar `config` asks for from `stats`.
///
/// Parameterised counters fail with [`DomainError::InvalidParameter`] when the
/// parameter is missing or out of range; the caller decides whether that
/// aborts anything beyond this one counter.
pub fn project(config: &CounterConfig, stats: &FileStats) -> DomainResult<u64> {
    let descriptor = config.counter_type().descriptor();
    let level = match descriptor.parameter {
        Some(_) => Some(resolve_level(config)?),
        None => None,
    };
    let value = (descriptor.projection)(stats, level);
    Ok(u64::try_from(value).unwrap_or(u64::MAX))
}

fn resolve_level(config: &CounterConfig) -> DomainResult<HeadingLevel> {
    let invalid = |reason: String| DomainError::InvalidParameter {
        property: config.property().to_string(),
        reason,
    };

    let parameter = config
        .parameter()
        .ok_or_else(|| invalid("heading level is required".to_string()))?;
    let raw = parameter
        .as_integer()
        .ok_or_else(|| invalid(format!("'{parameter}' is not an integer")))?;

    u8::try_from(raw)
        .ok()
        .and_then(HeadingLevel::new)
        .ok_or_else(|| invalid(format!("heading level {raw} is outside 1..=6")))
}
