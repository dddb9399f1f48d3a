use sqlx::SqlitePool;

use crate::model::position::Position;

pub async fn get_position(pool: &SqlitePool, id: i64) -> Result<Option<Position>, sqlx::Error> {
    sqlx::query_as::<_, Position>("SELECT * FROM positions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}
