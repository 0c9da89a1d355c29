//! Produce listings offered by farmers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::validation::{self, FieldErrors};
use crate::domain::Resource;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Cost basis used to compute a fair price band for the listing.
    pub production_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fair_profit_margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Resource for Product {
    fn resource_name() -> &'static str {
        "products"
    }

    fn resource_name_singular() -> &'static str {
        "product"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub production_cost: Option<f64>,
    #[serde(default)]
    pub fair_profit_margin: Option<f64>,
    #[serde(default)]
    pub farmer: Option<String>,
}

impl ProductInput {
    /// Only `name` and `productionCost` are required; a zero cost is legal.
    fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        errors.check("name", validation::required(self.name.as_deref()));
        if self.production_cost.is_none() {
            errors.insert("productionCost", "is required");
        }
        errors
    }

    pub fn into_new_product(self) -> Result<Product, FieldErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.assemble(Uuid::new_v4(), Utc::now()))
    }

    pub fn into_update_of(self, existing: &Product) -> Result<Product, FieldErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.assemble(existing.id, existing.created_at))
    }

    fn assemble(self, id: Uuid, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name.unwrap_or_default(),
            category: self.category,
            price: self.price,
            quantity: self.quantity,
            production_cost: self.production_cost.unwrap_or_default(),
            fair_profit_margin: self.fair_profit_margin,
            farmer: self.farmer,
            created_at,
        }
    }
}
