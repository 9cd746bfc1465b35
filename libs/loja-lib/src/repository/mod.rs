pub mod user_repository;
pub mod category_repository;
pub mod product_repository;
pub mod memory;
pub mod models;
pub mod errors;
pub mod traits;

pub use user_repository::UserRepository;
pub use category_repository::CategoryRepository;
pub use product_repository::ProductRepository;
pub use memory::MemoryRepository;
pub use errors::CatalogRepositoryError;

/// `LIKE` pattern matching `needle` anywhere, compared against a `LOWER(...)` column.
/// Wildcards typed by the caller are matched literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_wraps_lowercased_needle() {
        assert_eq!(contains_pattern("Produto 07"), "%produto 07%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
