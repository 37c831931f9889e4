/// Mask the password of a DSN so it can be logged.
///
/// DSNs without credentials are returned as-is; unparsable DSNs that look
/// like they carry credentials collapse to `***`.
pub fn redact_credentials_in_dsn(dsn: Option<&str>) -> String {
    match dsn {
        Some(dsn) if dsn.contains('@') => {
            if let Ok(mut parsed) = url::Url::parse(dsn.trim()) {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            } else {
                "***".to_string()
            }
        }
        Some(dsn) => dsn.to_string(),
        None => "none".to_string(),
    }
}

/// True for DSNs that point at a private in-memory SQLite database.
pub fn is_in_memory_sqlite(dsn: &str) -> bool {
    dsn.contains(":memory:") || dsn.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_masked() {
        let out = redact_credentials_in_dsn(Some("mysql://raven:s3cret@db:3306/users"));
        assert_eq!(out, "mysql://raven:***@db:3306/users");
    }

    #[test]
    fn dsn_without_credentials_is_unchanged() {
        assert_eq!(
            redact_credentials_in_dsn(Some("sqlite://data/registry.db")),
            "sqlite://data/registry.db"
        );
        assert_eq!(redact_credentials_in_dsn(None), "none");
    }

    #[test]
    fn garbage_with_at_sign_is_fully_masked() {
        assert_eq!(redact_credentials_in_dsn(Some("not a url @ all")), "***");
    }

    #[test]
    fn memory_detection() {
        assert!(is_in_memory_sqlite("sqlite::memory:"));
        assert!(is_in_memory_sqlite("sqlite:file:reg?mode=memory&cache=shared"));
        assert!(!is_in_memory_sqlite("sqlite://data/registry.db"));
    }
}
