use sqlx::SqlitePool;

use crate::model::shift::Shift;

pub async fn get_shift(pool: &SqlitePool, id: i64) -> Result<Option<Shift>, sqlx::Error> {
    sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}
