use sqlx::SqlitePool;

use crate::model::bracket::{DeductionBracket, DeductionType};

/// Active brackets for one contribution type, lowest salary band first.
pub async fn active_brackets(
    pool: &SqlitePool,
    deduction_type: DeductionType,
) -> Result<Vec<DeductionBracket>, sqlx::Error> {
    sqlx::query_as::<_, DeductionBracket>(
        r#"
        SELECT * FROM deduction_brackets
        WHERE deduction_type = ? AND active = 1
        ORDER BY salary_min
        "#,
    )
    .bind(deduction_type)
    .fetch_all(pool)
    .await
}
