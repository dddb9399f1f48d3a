use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::SqlitePool;

use crate::model::bracket::{DeductionBracket, DeductionType};
use crate::store;

/// The bracket table is read-only reference data seeded by migration, so a
/// long TTL is safe; the cache exists to keep per-calculation lookups off
/// the database.
static BRACKET_CACHE: Lazy<Cache<DeductionType, Arc<Vec<DeductionBracket>>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(8)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

pub async fn active_brackets(
    pool: &SqlitePool,
    deduction_type: DeductionType,
) -> Result<Arc<Vec<DeductionBracket>>, sqlx::Error> {
    if let Some(brackets) = BRACKET_CACHE.get(&deduction_type).await {
        return Ok(brackets);
    }

    let brackets = Arc::new(store::brackets::active_brackets(pool, deduction_type).await?);
    BRACKET_CACHE
        .insert(deduction_type, brackets.clone())
        .await;

    Ok(brackets)
}

/// Load all bracket tables into the in-memory cache at startup
pub async fn warmup_bracket_cache(pool: &SqlitePool) -> Result<()> {
    let mut total = 0usize;

    for deduction_type in [
        DeductionType::Sss,
        DeductionType::Philhealth,
        DeductionType::Pagibig,
    ] {
        let brackets = Arc::new(store::brackets::active_brackets(pool, deduction_type).await?);
        total += brackets.len();
        BRACKET_CACHE.insert(deduction_type, brackets).await;
    }

    log::info!("Bracket cache warmup complete: {} brackets", total);

    Ok(())
}
