use sqlx::FromRow;

/// A row of the `users` table. The password is stored and compared in
/// plaintext; the credential check happens inside the spliced SQL, never
/// against this field in Rust.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Projection rendered in the admin panel's user listing.
#[derive(Debug, Clone, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub role: String,
}
