//! Backend-specific SQL construction.
//!
//! Repositories write every statement once, with `?` placeholders and
//! portable SQL. Anything the two backends disagree on goes through
//! [`Dialect`]: placeholder style, conflict-tolerant inserts, the password
//! digest expression and binary collation for ordering.

use std::borrow::Cow;

/// The relational backend behind the connection pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
}

impl Dialect {
    /// Pick the dialect from a connection URL scheme.
    pub fn from_url(url: &str) -> Result<Self, sqlx::Error> {
        let scheme = url.split_once("://").map(|(s, _)| s).unwrap_or_default();
        match scheme {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::MySql),
            _ => Err(sqlx::Error::Configuration(
                format!("unsupported database URL scheme '{scheme}'").into(),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
        }
    }

    /// Rewrite `?` placeholders into the backend's native style.
    ///
    /// PostgreSQL gets numbered `$n` parameters. Question marks inside
    /// single-quoted literals are left alone.
    pub fn sql<'a>(&self, query: &'a str) -> Cow<'a, str> {
        match self {
            Self::MySql => Cow::Borrowed(query),
            Self::Postgres => {
                if !query.contains('?') {
                    return Cow::Borrowed(query);
                }
                let mut out = String::with_capacity(query.len() + 8);
                let mut n = 0;
                let mut in_literal = false;
                for c in query.chars() {
                    match c {
                        '\'' => {
                            in_literal = !in_literal;
                            out.push(c);
                        }
                        '?' if !in_literal => {
                            n += 1;
                            out.push('$');
                            out.push_str(&n.to_string());
                        }
                        _ => out.push(c),
                    }
                }
                Cow::Owned(out)
            }
        }
    }

    /// An `INSERT` that silently does nothing when a unique key already exists.
    ///
    /// MySQL gets a no-op `ON DUPLICATE KEY UPDATE` on the first column rather
    /// than `INSERT IGNORE`, which would also swallow truncation and other
    /// data errors. Returned SQL is already in native placeholder style.
    pub fn insert_ignore(&self, table: &str, columns: &[&str]) -> String {
        let cols = columns.join(", ");
        let values = placeholders(columns.len());
        let query = match self {
            Self::Postgres => {
                format!("INSERT INTO {table} ({cols}) VALUES ({values}) ON CONFLICT DO NOTHING")
            }
            Self::MySql => {
                let first = columns.first().copied().unwrap_or("id");
                format!(
                    "INSERT INTO {table} ({cols}) VALUES ({values}) \
                     ON DUPLICATE KEY UPDATE {first} = {first}"
                )
            }
        };
        self.sql(&query).into_owned()
    }

    /// Hex-encoded SHA-224 of `password || salt`, evaluated by the store.
    ///
    /// Both arguments are SQL expressions: placeholders or column names.
    pub fn password_digest(&self, password: &str, salt: &str) -> String {
        match self {
            Self::Postgres => format!(
                "encode(sha224(convert_to(CAST({password} AS TEXT) || CAST({salt} AS TEXT), 'UTF8')), 'hex')"
            ),
            Self::MySql => format!("SHA2(CONCAT({password}, {salt}), 224)"),
        }
    }

    /// Order `expr` byte-wise so sorting is case-sensitive on both backends.
    pub fn binary_order(&self, expr: &str) -> String {
        match self {
            Self::Postgres => format!("{expr} COLLATE \"C\""),
            Self::MySql => format!("{expr} COLLATE utf8mb4_bin"),
        }
    }
}

/// Most values bound into one `IN (...)` list. Longer key sets are split
/// across statements; both backends reject more than 65535 parameters.
pub const MAX_IN_LIST: usize = 1000;

/// `n` comma-separated `?` placeholders, for `IN (...)` lists and `VALUES`.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Wrap a user-supplied fragment as a `LIKE` substring pattern.
///
/// `%`, `_` and `\` are escaped so they match literally.
pub fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
