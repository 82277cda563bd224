use sqlx::FromRow;

/// A row of the `products` table. Read-only from the application side.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
}
