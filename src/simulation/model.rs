//! Per-visit attribute model
//!
//! This module describes how the purchased product, the buyer's age and the
//! buyer's sex are drawn for every visit. Product choice is independent of the
//! clock; age and sex are conditioned on the chosen product.

use rand::distributions::WeightedIndex;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{Product, Sex};

/// Normal age distribution of a product's buyers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeProfile {
    /// Mean age in years
    pub mean: f64,
    /// Standard deviation in years
    pub std_dev: f64,
}

/// Buyer profile for one product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductProfile {
    /// Product this profile describes
    pub product: Product,
    /// Relative weight of the product in the purchase mix
    pub weight: f64,
    /// Age distribution of the product's buyers
    pub age: AgeProfile,
    /// Probability that a buyer is 男
    pub male_share: f64,
}

/// Complete attribute model for simulated visits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitModel {
    /// One profile per product, in draw order
    pub products: Vec<ProductProfile>,
}

impl VisitModel {
    /// The survey's product mix and buyer profiles
    pub fn standard() -> Self {
        Self {
            products: vec![
                ProductProfile {
                    product: Product::A,
                    weight: 0.6,
                    age: AgeProfile { mean: 35.0, std_dev: 15.0 },
                    male_share: 0.75,
                },
                ProductProfile {
                    product: Product::B,
                    weight: 0.3,
                    age: AgeProfile { mean: 50.0, std_dev: 20.0 },
                    male_share: 0.4,
                },
                ProductProfile {
                    product: Product::C,
                    weight: 0.1,
                    age: AgeProfile { mean: 65.0, std_dev: 10.0 },
                    male_share: 0.2,
                },
            ],
        }
    }

    /// Build the samplers for this model
    pub fn sampler(&self) -> SimulationResult<AttributeSampler> {
        AttributeSampler::new(self)
    }
}

impl Default for VisitModel {
    fn default() -> Self {
        Self::standard()
    }
}

/// Attributes drawn for one visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitAttributes {
    /// Purchased product
    pub product: Product,
    /// Rounded buyer age, never clamped
    pub buyer_age: i32,
    /// Buyer sex
    pub buyer_sex: Sex,
}

#[derive(Debug, Clone)]
struct ProductSampler {
    product: Product,
    age: Normal<f64>,
    sex: WeightedIndex<f64>,
}

/// Prebuilt distributions of a [`VisitModel`]
#[derive(Debug, Clone)]
pub struct AttributeSampler {
    product_index: WeightedIndex<f64>,
    products: Vec<ProductSampler>,
}

impl AttributeSampler {
    /// Validate the model and build its distributions
    pub fn new(model: &VisitModel) -> SimulationResult<Self> {
        if model.products.is_empty() {
            return Err(SimulationError::model_error("at least one product is required"));
        }

        let mut seen = HashSet::new();
        for profile in &model.products {
            if !seen.insert(profile.product) {
                return Err(SimulationError::model_error(format!(
                    "product {} is listed more than once",
                    profile.product
                )));
            }
        }

        let product_index =
            WeightedIndex::new(model.products.iter().map(|profile| profile.weight)).map_err(|e| {
                SimulationError::model_error(format!("invalid product weights: {}", e))
            })?;

        let products = model
            .products
            .iter()
            .map(|profile| {
                // Normal::new only rejects a non-finite deviation
                if !(profile.age.std_dev >= 0.0) {
                    return Err(SimulationError::model_error(format!(
                        "age std dev for {} must be non-negative, got {}",
                        profile.product, profile.age.std_dev
                    )));
                }
                let age = Normal::new(profile.age.mean, profile.age.std_dev).map_err(|e| {
                    SimulationError::model_error(format!(
                        "invalid age profile for {}: {}",
                        profile.product, e
                    ))
                })?;

                if !(0.0..=1.0).contains(&profile.male_share) {
                    return Err(SimulationError::model_error(format!(
                        "male share for {} must be between 0.0 and 1.0, got {}",
                        profile.product, profile.male_share
                    )));
                }
                let sex = WeightedIndex::new([profile.male_share, 1.0 - profile.male_share])
                    .map_err(|e| {
                        SimulationError::model_error(format!(
                            "invalid sex mix for {}: {}",
                            profile.product, e
                        ))
                    })?;

                Ok(ProductSampler { product: profile.product, age, sex })
            })
            .collect::<SimulationResult<Vec<_>>>()?;

        Ok(Self { product_index, products })
    }

    /// Draw product, then age, then sex for one visit
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> VisitAttributes {
        let sampler = &self.products[self.product_index.sample(rng)];
        let buyer_age = sampler.age.sample(rng).round() as i32;
        let buyer_sex = Sex::ALL[sampler.sex.sample(rng)];

        VisitAttributes { product: sampler.product, buyer_age, buyer_sex }
    }
}
