use chrono::NaiveDate;
use loja_lib::entities::{
    Category, CategorySummary, Product, ProductDraft, ProductSummary, Session, User, UserDraft,
};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::ApiError;

fn password_length(password: &SecretString) -> Result<(), ValidationError> {
    if password.expose_secret().chars().count() < loja_lib::MIN_PASSWORD_LENGTH {
        let mut err = ValidationError::new("length");
        err.message = Some("password must have at least 8 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Update requests carry the id of the record in the body.
fn required_id(id: Option<Uuid>) -> Result<Uuid, ApiError> {
    id.ok_or_else(|| ApiError::BadRequest("id is required".to_string()))
}

// ==================== USERS ====================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UserRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[serde(rename = "usuario")]
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[serde(rename = "senha")]
    #[schema(value_type = String, format = Password)]
    #[validate(custom(function = "password_length"))]
    pub password: SecretString,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
}

impl UserRequest {
    pub fn into_draft(self) -> UserDraft {
        UserDraft {
            name: self.name,
            email: self.email,
            password: self.password,
            photo: self.photo,
            birth_date: self.birth_date,
        }
    }

    pub fn into_update(self) -> Result<(Uuid, UserDraft), ApiError> {
        let id = required_id(self.id)?;
        Ok((id, self.into_draft()))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub email: String,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            photo: user.photo,
            birth_date: user.birth_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[serde(rename = "usuario")]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(rename = "senha")]
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "usuario")]
    pub email: String,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
    pub token: String,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        let Session { user, token } = session;
        LoginResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            photo: user.photo,
            birth_date: user.birth_date,
            token,
        }
    }
}

// ==================== CATEGORIES ====================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CategoryRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "tipo")]
    #[validate(length(max = 255, message = "type must have at most 255 characters"))]
    pub kind: String,
}

impl CategoryRequest {
    pub fn into_update(self) -> Result<(Uuid, String), ApiError> {
        let id = required_id(self.id)?;
        Ok((id, self.kind))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductSummaryResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(product: ProductSummary) -> Self {
        ProductSummaryResponse {
            id: product.id,
            name: product.name,
            price: product.price,
            photo: product.photo,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "produto")]
    pub products: Vec<ProductSummaryResponse>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id,
            kind: category.kind,
            products: category
                .products
                .into_iter()
                .map(ProductSummaryResponse::from)
                .collect(),
        }
    }
}

// ==================== PRODUCTS ====================

/// Category reference inside a product request; only the id is used.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: Uuid,
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ProductRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 255, message = "name must have between 1 and 255 characters"))]
    pub name: String,
    #[serde(rename = "preco")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(rename = "categoria")]
    pub category: CategoryRef,
}

impl ProductRequest {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            price: self.price,
            photo: self.photo,
            category_id: self.category.id,
        }
    }

    pub fn into_update(self) -> Result<(Uuid, ProductDraft), ApiError> {
        let id = required_id(self.id)?;
        Ok((id, self.into_draft()))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryResponse {
    pub id: Uuid,
    #[serde(rename = "tipo")]
    pub kind: String,
}

impl From<CategorySummary> for CategorySummaryResponse {
    fn from(category: CategorySummary) -> Self {
        CategorySummaryResponse {
            id: category.id,
            kind: category.kind,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
    #[serde(rename = "categoria")]
    pub category: CategorySummaryResponse,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id,
            name: product.name,
            price: product.price,
            photo: product.photo,
            category: CategorySummaryResponse::from(product.category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_request_uses_portuguese_keys() {
        let request: UserRequest = serde_json::from_value(serde_json::json!({
            "nome": "Paulo Antunes",
            "usuario": "paulo_antunes@email.com.br",
            "senha": "13465278",
            "foto": "https://i.imgur.com/JR7kUFU.jpg",
            "dataNascimento": "2000-07-13"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert!(request.id.is_none());
        assert_eq!(request.email, "paulo_antunes@email.com.br");
        assert!(request.into_update().is_err());
    }

    #[test]
    fn short_password_fails_validation() {
        let request: UserRequest = serde_json::from_value(serde_json::json!({
            "nome": "Paulo",
            "usuario": "paulo@email.com",
            "senha": "123",
            "dataNascimento": "2000-07-13"
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn user_response_never_contains_password() {
        let response = UserResponse {
            id: Uuid::new_v4(),
            name: "Maria".to_string(),
            email: "maria@email.com".to_string(),
            photo: None,
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("senha").is_none());
        assert_eq!(json["usuario"], "maria@email.com");
        assert_eq!(json["dataNascimento"], "1990-01-01");
        assert!(json["foto"].is_null());
    }

    #[test]
    fn product_request_reads_nested_category() {
        let category_id = Uuid::new_v4();
        let request: ProductRequest = serde_json::from_value(serde_json::json!({
            "nome": "Produto 01",
            "preco": 250.50,
            "categoria": { "id": category_id, "tipo": "Aventura" }
        }))
        .unwrap();

        let draft = request.into_draft();
        assert_eq!(draft.category_id, category_id);
        assert_eq!(draft.price, Decimal::new(25050, 2));
    }

    #[test]
    fn price_serializes_as_number() {
        let response = ProductSummaryResponse {
            id: Uuid::new_v4(),
            name: "Produto".to_string(),
            price: Decimal::new(25050, 2),
            photo: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["preco"].as_f64(), Some(250.5));
    }
}
