#[derive(Debug)]
pub enum CatalogRepositoryError {
    EmailAlreadyExists,
    CategoryNotFound,
    NotFound,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for CatalogRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogRepositoryError::EmailAlreadyExists => write!(f, "email already exists"),
            CatalogRepositoryError::CategoryNotFound => write!(f, "category does not exist"),
            CatalogRepositoryError::NotFound => write!(f, "not found"),
            CatalogRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CatalogRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogRepositoryError::Sqlx(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for CatalogRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    // msg_lower is already lowercased
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = msg_lower.get(start..)?;
    let end = rest.find('\'')?;
    rest.get(..end).map(str::to_string)
}

pub fn map_sqlx_error(err: sqlx::Error) -> CatalogRepositoryError {
    const USER_EMAIL_UNIQUE: &str = "user_email_unique";
    const FK_PRODUCTS_CATEGORY: &str = "fk_products_category";

    if let sqlx::Error::Database(db_err) = &err {
        let msg = db_err.message().to_lowercase();
        let is_integrity_violation = db_err.code().as_deref() == Some("23000");

        // "Duplicate entry 'root@root.com' for key 'users.user_email_unique'"
        if is_integrity_violation && msg.contains("duplicate entry") {
            let key = extract_mysql_key_name(&msg).unwrap_or_default();
            if key.ends_with(USER_EMAIL_UNIQUE) || msg.contains(USER_EMAIL_UNIQUE) {
                return CatalogRepositoryError::EmailAlreadyExists;
            }
        }

        // "Cannot add or update a child row: a foreign key constraint fails (... CONSTRAINT `fk_products_category` ...)"
        if is_integrity_violation
            && msg.contains("foreign key constraint fails")
            && msg.contains(FK_PRODUCTS_CATEGORY)
        {
            return CatalogRepositoryError::CategoryNotFound;
        }
    }

    CatalogRepositoryError::Sqlx(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_key_name_from_duplicate_entry_message() {
        let msg = "duplicate entry 'a@b.com' for key 'users.user_email_unique'";
        assert_eq!(
            extract_mysql_key_name(msg).as_deref(),
            Some("users.user_email_unique")
        );
    }

    #[test]
    fn missing_key_marker_yields_none() {
        assert!(extract_mysql_key_name("some other failure").is_none());
    }

    #[test]
    fn non_database_errors_pass_through() {
        let mapped = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(mapped, CatalogRepositoryError::Sqlx(_)));
    }
}
