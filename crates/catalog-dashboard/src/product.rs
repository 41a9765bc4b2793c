//! The product record and the inputs that create or change it.
//!
//! [`Product`] is what the store holds. [`ProductInput`] is the set of
//! fields a caller may set; it comes either from the JSON API directly or
//! from the HTML form via [`ProductForm::parse`].

use catalog_seeker::{Number, Seekable, Timestamp, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::views::ValidationError;

/// Delivery options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub standard: bool,
}

impl Default for Delivery {
    fn default() -> Self {
        Self { standard: true }
    }
}

/// Product variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variants {
    #[serde(default)]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: u64,
    pub product_name: String,
    /// Shown as "Category".
    pub product_type: String,
    pub brand: String,
    pub material: String,
    pub price: f64,
    pub delivery: Delivery,
    pub variants: Variants,
    pub features: Vec<String>,
    pub faqs: Vec<Faq>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Builds a product from validated input.
    pub fn new(product_id: u64, input: ProductInput, created_at: DateTime<Utc>) -> Self {
        let mut product = Product {
            product_id,
            product_name: String::new(),
            product_type: String::new(),
            brand: String::new(),
            material: String::new(),
            price: 0.0,
            delivery: Delivery::default(),
            variants: Variants::default(),
            features: Vec::new(),
            faqs: Vec::new(),
            created_at,
        };
        product.apply(input);
        product
    }

    /// Replaces every mutable field. Id and creation time are kept.
    pub fn apply(&mut self, input: ProductInput) {
        self.product_name = input.product_name.trim().to_string();
        self.product_type = input.product_type.trim().to_string();
        self.brand = input.brand.trim().to_string();
        self.material = input.material.trim().to_string();
        self.price = input.price.unwrap_or_default();
        self.delivery = input.delivery;
        self.variants = input.variants;
        self.features = input.features;
        self.faqs = input.faqs;
    }

    /// Comma-separated colors, as the form field expects them.
    pub fn colors_text(&self) -> String {
        self.variants.colors.join(", ")
    }
}

impl Seekable for Product {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "product_id" | "id" => Value::Number(Number::from(self.product_id)),
            "product_name" | "name" => Value::String(&self.product_name),
            "product_type" | "category" => Value::String(&self.product_type),
            "brand" => Value::String(&self.brand),
            "material" => Value::String(&self.material),
            "price" => Value::Number(Number::F64(self.price)),
            "standard_delivery" => Value::Bool(self.delivery.standard),
            "created_at" => Value::Timestamp(Timestamp::from_millis(
                self.created_at.timestamp_millis(),
            )),
            _ => Value::None,
        }
    }
}

/// The caller-settable fields of a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub product_name: String,
    pub product_type: String,
    pub brand: String,
    pub material: String,
    pub price: Option<f64>,
    pub delivery: Delivery,
    pub variants: Variants,
    pub features: Vec<String>,
    pub faqs: Vec<Faq>,
}

impl ProductInput {
    /// Checks the required fields.
    ///
    /// The name must not be blank and the price must be present, finite and
    /// not negative.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.product_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "product_name",
                "Product name is required",
            ));
        }

        match self.price {
            None => errors.push(ValidationError::new("price", "Price is required")),
            Some(p) if !p.is_finite() => {
                errors.push(ValidationError::new("price", "Price must be a number"))
            }
            Some(p) if p < 0.0 => {
                errors.push(ValidationError::new("price", "Price must not be negative"))
            }
            Some(_) => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        ProductInput {
            product_name: product.product_name.clone(),
            product_type: product.product_type.clone(),
            brand: product.brand.clone(),
            material: product.material.clone(),
            price: Some(product.price),
            delivery: product.delivery.clone(),
            variants: product.variants.clone(),
            features: product.features.clone(),
            faqs: product.faqs.clone(),
        }
    }
}

/// Raw values of the add/edit form, exactly as posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub product_name: String,
    pub product_type: String,
    pub brand: String,
    pub material: String,
    pub price: String,
    /// Comma-separated.
    pub colors: String,
    /// One feature per line.
    pub features_list: String,
}

impl ProductForm {
    /// Converts the posted strings into a validated [`ProductInput`].
    ///
    /// Colors are split on commas and trimmed, features on newlines; empty
    /// entries are dropped from both. Delivery is always standard and the
    /// FAQ list starts empty.
    pub fn parse(&self) -> Result<ProductInput, Vec<ValidationError>> {
        let raw_price = self.price.trim();
        let (price, price_error) = if raw_price.is_empty() {
            (None, None)
        } else {
            match raw_price.parse::<f64>() {
                Ok(p) => (Some(p), None),
                Err(_) => (
                    Some(f64::NAN),
                    Some(ValidationError::new("price", "Price must be a number")),
                ),
            }
        };

        let input = ProductInput {
            product_name: self.product_name.clone(),
            product_type: self.product_type.clone(),
            brand: self.brand.clone(),
            material: self.material.clone(),
            price,
            delivery: Delivery::default(),
            variants: Variants {
                colors: split_list(&self.colors, ','),
            },
            features: split_list(&self.features_list, '\n'),
            faqs: Vec::new(),
        };

        match (input.validate(), price_error) {
            (Ok(()), None) => Ok(input),
            (Ok(()), Some(err)) => Err(vec![err]),
            (Err(mut errors), Some(err)) => {
                errors.retain(|e| e.field != "price");
                errors.push(err);
                Err(errors)
            }
            (Err(errors), None) => Err(errors),
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        ProductForm {
            product_name: product.product_name.clone(),
            product_type: product.product_type.clone(),
            brand: product.brand.clone(),
            material: product.material.clone(),
            price: format!("{:.2}", product.price),
            colors: product.colors_text(),
            features_list: product.features.join("\n"),
        }
    }
}

fn split_list(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
