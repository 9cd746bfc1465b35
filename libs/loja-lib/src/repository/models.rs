use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub photo: Option<String>,
    pub birth_date: NaiveDate,
}

/// Column values written by insert and update; the id is owned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub photo: Option<String>,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: String,
    pub kind: String,
}

/// Product joined with the kind of its category.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub photo: Option<String>,
    pub category_id: String,
    pub category_kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: String,
    pub price: Decimal,
    pub photo: Option<String>,
    pub category_id: Uuid,
}
