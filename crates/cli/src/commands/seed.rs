//! Seed the product catalog from a YAML file.
//!
//! ```yaml
//! products:
//!   - name: Ceramic Mug
//!     price: 12.5
//!     category: kitchen
//!     stock: 40
//!     thumbnails: [/static/img/mug.jpg]
//! ```
//!
//! Every product is validated before the database is touched.

use std::path::Path;

use serde::Deserialize;
use tienda_storefront::db::{PgProductStore, ProductStore};
use tienda_storefront::models::ProductFields;
use tracing::{error, info};

use super::{CommandError, connect};

/// Top-level structure of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub products: Vec<ProductFields>,
}

impl SeedFile {
    /// Parse seed YAML.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Yaml` if the document does not match the format.
    pub fn parse(content: &str) -> Result<Self, CommandError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Validation failures as `(index, message)` pairs.
    #[must_use]
    pub fn validate(&self) -> Vec<(usize, String)> {
        self.products
            .iter()
            .enumerate()
            .filter_map(|(i, fields)| fields.validate().err().map(|e| (i, e.to_string())))
            .collect()
    }
}

/// Insert every product in `file_path`.
///
/// # Errors
///
/// Returns `CommandError` if the file is unreadable or invalid, or if a
/// database operation fails.
pub async fn products(file_path: &Path, clear_existing: bool) -> Result<(), CommandError> {
    info!(path = %file_path.display(), "Loading products from file");

    let content = tokio::fs::read_to_string(file_path)
        .await
        .map_err(|source| CommandError::Io {
            path: file_path.display().to_string(),
            source,
        })?;
    let seed = SeedFile::parse(&content)?;

    let errors = seed.validate();
    if !errors.is_empty() {
        error!("Seed validation failed:");
        for (index, message) in &errors {
            error!("  - product #{index}: {message}");
        }
        return Err(CommandError::InvalidSeed(errors.len()));
    }
    info!(products = seed.products.len(), "Seed file validated");

    let pool = connect().await?;

    if clear_existing {
        let removed = sqlx::query("DELETE FROM shop.product")
            .execute(&pool)
            .await?
            .rows_affected();
        info!(removed, "Cleared existing products");
    }

    let store = PgProductStore::new(pool);
    for fields in seed.products {
        let product = store.create(fields).await?;
        info!(product_id = %product.id, name = %product.name, "Inserted product");
    }

    info!("Seeding complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_applies_field_defaults() {
        let seed = SeedFile::parse(
            r"
products:
  - name: Mug
    price: 12.5
    category: kitchen
  - name: Lamp
    price: 40
    category: lighting
    available: false
    stock: 3
    description: Brass desk lamp
",
        )
        .unwrap();

        assert_eq!(seed.products.len(), 2);
        let mug = &seed.products[0];
        assert!(mug.available);
        assert_eq!(mug.stock, 0);
        assert!(mug.thumbnails.is_empty());
        assert!(!seed.products[1].available);
        assert!(seed.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_blank_fields() {
        let seed = SeedFile::parse(
            r#"
products:
  - name: ""
    price: 1
    category: x
"#,
        )
        .unwrap();
        let errors = seed.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 0);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let result = SeedFile::parse(
            r"
products:
  - name: Bad
    price: -2
    category: x
",
        );
        assert!(result.is_err());
    }
}
