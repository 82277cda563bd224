//! Renders the single HTML document each request gets back.
//!
//! Encoding here is deliberately inconsistent and must stay that way: the
//! nav logout label and the admin user-list cells go through
//! `encode_safe`, while the message slot, search results and the admin
//! welcome line interpolate raw. The raw spots are the training surface.

use html_escape::encode_safe;

use crate::models::{Product, UserSummary};
use crate::routes::Page;
use crate::session::Session;

const STYLE: &str = include_str!("../static/style.css");

pub fn render(
    page: &Page,
    session: Option<&Session>,
    message: &str,
    results: &[Product],
    admin_users: Option<&[UserSummary]>,
) -> String {
    let body = match page {
        Page::Home => home_body(results),
        Page::Login => login_body(),
        Page::Admin => admin_body(session, admin_users),
        // `products` exists in the nav but has no body of its own
        Page::Products | Page::Other => String::new(),
    };
    shell(session, message, &body)
}

fn shell(session: Option<&Session>, message: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>RangeShop - Vulnerable Demo App</title>
    <style>
{STYLE}    </style>
</head>
<body>
    <div class="warning-banner">
        &#9888;&#65039; INTENTIONALLY VULNERABLE APPLICATION - FOR TRAINING ONLY &#9888;&#65039;
    </div>

    <header>
        <h1>RangeShop</h1>
        <nav>{nav}</nav>
    </header>

    <div class="container">
        {message}
        {body}
        <div class="card">
            <h3>Known Vulnerabilities (Training)</h3>
            <ul>
                <li><strong>SQL Injection:</strong> Login form, search functionality</li>
                <li><strong>Cross-Site Scripting (XSS):</strong> Search results display</li>
                <li><strong>Information Disclosure:</strong> Verbose error messages</li>
                <li><strong>Weak Authentication:</strong> Plain text passwords in database</li>
            </ul>
        </div>
    </div>
</body>
</html>
"#,
        nav = nav(session),
    )
}

fn nav(session: Option<&Session>) -> String {
    let mut nav = String::from(
        r#"<a href="?page=home">Home</a> <a href="?page=products">Products</a> <a href="?page=login">Login</a>"#,
    );
    if let Some(s) = session {
        nav.push_str(&format!(
            r#" <a href="?page=admin">Admin</a> <a href="?logout=1">Logout ({})</a>"#,
            encode_safe(&s.user),
        ));
    }
    nav
}

fn home_body(results: &[Product]) -> String {
    let mut body = String::from(
        r#"<div class="card">
    <h2>Welcome to RangeShop</h2>
    <p>This is a deliberately vulnerable web application for security training.</p>
    <br>
    <h3>Search Products</h3>
    <form method="GET">
        <input type="hidden" name="page" value="home">
        <input type="text" name="search" placeholder="Search...">
        <button type="submit">Search</button>
    </form>
"#,
    );
    if !results.is_empty() {
        body.push_str(
            "    <h3>Results:</h3>\n    <table>\n        <tr><th>ID</th><th>Name</th><th>Price</th></tr>\n",
        );
        for product in results {
            // name stays raw: seeded markup in the catalog renders as markup
            body.push_str(&format!(
                "        <tr><td>{}</td><td>{}</td><td>${:.2}</td></tr>\n",
                product.id, product.name, product.price,
            ));
        }
        body.push_str("    </table>\n");
    }
    body.push_str("</div>");
    body
}

fn login_body() -> String {
    String::from(
        r#"<div class="card">
    <h2>Login</h2>
    <form method="POST">
        <input type="text" name="username" placeholder="Username" required><br>
        <input type="password" name="password" placeholder="Password" required><br>
        <button type="submit" name="login">Login</button>
    </form>
    <br>
    <p><small>Hint: Try SQL injection on the login form</small></p>
</div>"#,
    )
}

fn admin_body(session: Option<&Session>, users: Option<&[UserSummary]>) -> String {
    let mut body = String::from("<div class=\"card\">\n    <h2>Admin Panel</h2>\n");
    match session {
        None => {
            body.push_str("    <p>Please <a href=\"?page=login\">login</a> first.</p>\n");
        }
        Some(s) => {
            // raw on purpose; the nav encodes the same username
            body.push_str(&format!(
                "    <p>Welcome, {}!</p>\n    <p>Role: {}</p>\n",
                s.user, s.role,
            ));
            match users {
                Some(rows) => {
                    body.push_str(
                        "    <h3>User List</h3>\n    <table>\n        <tr><th>ID</th><th>Username</th><th>Role</th></tr>\n",
                    );
                    for u in rows {
                        body.push_str(&format!(
                            "        <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                            u.id,
                            encode_safe(&u.username),
                            encode_safe(&u.role),
                        ));
                    }
                    body.push_str("    </table>\n");
                }
                None => {
                    body.push_str("    <p>Access denied. Admin role required.</p>\n");
                }
            }
        }
    }
    body.push_str("</div>");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(user: &str, role: &str) -> Session {
        Session {
            user: user.into(),
            role: role.into(),
        }
    }

    #[test]
    fn message_slot_interpolates_raw() {
        let msg = r#"<div class="alert info">Search results for: <b>hi</b></div>"#;
        let html = render(&Page::Home, None, msg, &[], None);
        assert!(html.contains("Search results for: <b>hi</b>"));
    }

    #[test]
    fn home_without_results_has_no_table() {
        let html = render(&Page::Home, None, "", &[], None);
        assert!(html.contains("Search Products"));
        assert!(!html.contains("<h3>Results:</h3>"));
    }

    #[test]
    fn result_names_render_unencoded() {
        let rows = vec![Product {
            id: 7,
            name: "<img src=x onerror=alert(1)>".into(),
            price: 19.99,
        }];
        let html = render(&Page::Home, None, "", &rows, None);
        assert!(html.contains("<td><img src=x onerror=alert(1)></td>"));
        assert!(html.contains("<td>$19.99</td>"));
    }

    #[test]
    fn nav_encodes_username_but_admin_welcome_does_not() {
        let s = session("bob<script>", "user");
        let html = render(&Page::Admin, Some(&s), "", &[], None);
        // encoded in the nav
        assert!(html.contains("Logout (bob&lt;script&gt;)"));
        // raw in the panel body
        assert!(html.contains("Welcome, bob<script>!"));
    }

    #[test]
    fn admin_without_session_prompts_login() {
        let html = render(&Page::Admin, None, "", &[], None);
        assert!(html.contains(r#"Please <a href="?page=login">login</a> first."#));
        assert!(!html.contains("User List"));
    }

    #[test]
    fn admin_without_user_rows_shows_access_denied() {
        let s = session("alice", "user");
        let html = render(&Page::Admin, Some(&s), "", &[], None);
        assert!(html.contains("Access denied. Admin role required."));
        assert!(!html.contains("User List"));
    }

    #[test]
    fn admin_user_list_cells_are_encoded() {
        let s = session("admin", "admin");
        let rows = vec![UserSummary {
            id: 1,
            username: "eve<svg>".into(),
            role: "admin".into(),
        }];
        let html = render(&Page::Admin, Some(&s), "", &[], Some(&rows));
        assert!(html.contains("<td>eve&lt;svg&gt;</td>"));
        assert!(!html.contains("<td>eve<svg></td>"));
    }

    #[test]
    fn products_and_unknown_pages_render_shell_only() {
        for page in [Page::Products, Page::Other] {
            let html = render(&page, None, "", &[], None);
            assert!(html.contains("Known Vulnerabilities (Training)"));
            assert!(!html.contains("Welcome to RangeShop"));
            assert!(!html.contains("Admin Panel"));
            assert!(!html.contains("Hint: Try SQL injection"));
        }
    }

    #[test]
    fn shell_always_carries_banner_and_nav() {
        let html = render(&Page::Other, None, "", &[], None);
        assert!(html.contains("INTENTIONALLY VULNERABLE APPLICATION"));
        assert!(html.contains(r#"<a href="?page=home">Home</a>"#));
        assert!(html.contains(r#"<a href="?page=products">Products</a>"#));
        assert!(html.contains(r#"<a href="?page=login">Login</a>"#));
        // anonymous shell has no session links
        assert!(!html.contains("Logout ("));
    }
}
