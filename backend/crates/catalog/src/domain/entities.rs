//! Catalog Entities

use super::value_objects::{CategoryId, Price, ProductId};

/// Product category
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self {
            category_id: CategoryId::new(),
            name,
        }
    }

    pub fn from_parts(category_id: CategoryId, name: String) -> Self {
        Self { category_id, name }
    }
}

/// Sellable product
///
/// `category_id` is a plain reference; deleting the category does not
/// cascade to its products.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub price: Price,
    /// Relative path of the stored product image, e.g. `uploads/<name>.png`
    pub picture: String,
}

impl Product {
    pub fn new(category_id: CategoryId, name: String, price: Price, picture: String) -> Self {
        Self {
            product_id: ProductId::new(),
            category_id,
            name,
            price,
            picture,
        }
    }

    pub fn from_parts(
        product_id: ProductId,
        category_id: CategoryId,
        name: String,
        price: Price,
        picture: String,
    ) -> Self {
        Self {
            product_id,
            category_id,
            name,
            price,
            picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_gets_fresh_id() {
        let a = Category::new("Drinks".to_string());
        let b = Category::new("Drinks".to_string());
        assert_ne!(a.category_id, b.category_id);
    }

    #[test]
    fn test_new_product_keeps_fields() {
        let category_id = CategoryId::new();
        let product = Product::new(
            category_id,
            "Iced Tea".to_string(),
            Price::new(3.5).unwrap(),
            "uploads/tea.png".to_string(),
        );
        assert_eq!(product.category_id, category_id);
        assert_eq!(product.name, "Iced Tea");
        assert_eq!(product.price.get(), 3.5);
        assert_eq!(product.picture, "uploads/tea.png");
    }
}
