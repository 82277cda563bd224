/// A SQL command assembled by splicing raw client-supplied text into a
/// fixed template. Substitution is verbatim: no escaping, no bound
/// parameters. Swapping this for prepared statements would remove the
/// injection surface the range exists to teach, so don't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedQuery {
    sql: String,
}

impl SplicedQuery {
    /// Credential lookup. Both values land inside the quotes untouched.
    pub fn user_lookup(username: &str, password: &str) -> Self {
        SplicedQuery {
            sql: format!(
                "SELECT * FROM users WHERE username = '{username}' AND password = '{password}'"
            ),
        }
    }

    /// Substring match over the catalog, term spliced between wildcards.
    pub fn product_search(term: &str) -> Self {
        SplicedQuery {
            sql: format!("SELECT * FROM products WHERE name LIKE '%{term}%'"),
        }
    }

    /// Full user listing for the admin panel. Fixed text, no substitution.
    pub fn user_list() -> Self {
        SplicedQuery {
            sql: "SELECT id, username, role FROM users".to_string(),
        }
    }

    pub fn as_sql(&self) -> &str {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_lookup_embeds_both_values_verbatim() {
        let q = SplicedQuery::user_lookup("alice", "password123");
        assert_eq!(
            q.as_sql(),
            "SELECT * FROM users WHERE username = 'alice' AND password = 'password123'"
        );
    }

    #[test]
    fn user_lookup_passes_quote_metacharacters_through() {
        let q = SplicedQuery::user_lookup("admin' OR '1'='1", "x");
        assert_eq!(
            q.as_sql(),
            "SELECT * FROM users WHERE username = 'admin' OR '1'='1' AND password = 'x'"
        );
    }

    #[test]
    fn product_search_wraps_term_in_wildcards() {
        let q = SplicedQuery::product_search("Laptop");
        assert_eq!(
            q.as_sql(),
            "SELECT * FROM products WHERE name LIKE '%Laptop%'"
        );
    }

    #[test]
    fn product_search_keeps_markup_and_quotes_raw() {
        let q = SplicedQuery::product_search("<b>hi</b>' --");
        assert_eq!(
            q.as_sql(),
            "SELECT * FROM products WHERE name LIKE '%<b>hi</b>' --%'"
        );
    }

    #[test]
    fn user_list_is_the_fixed_panel_query() {
        assert_eq!(
            SplicedQuery::user_list().as_sql(),
            "SELECT id, username, role FROM users"
        );
    }
}
