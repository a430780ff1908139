//! Enumeration types for the store visit simulator
//!
//! This module contains the categorical values attached to each visit
//! (purchased product and buyer sex) and the supported output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Products tracked by the store survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Product {
    /// 商品A, the best seller
    #[serde(rename = "商品A")]
    A,
    /// 商品B
    #[serde(rename = "商品B")]
    B,
    /// 商品C, the niche item
    #[serde(rename = "商品C")]
    C,
}

impl Product {
    /// All products in survey order
    pub const ALL: [Product; 3] = [Product::A, Product::B, Product::C];

    /// Label used in the output table
    pub fn label(&self) -> &'static str {
        match self {
            Product::A => "商品A",
            Product::B => "商品B",
            Product::C => "商品C",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "商品A" | "A" | "a" => Ok(Product::A),
            "商品B" | "B" | "b" => Ok(Product::B),
            "商品C" | "C" | "c" => Ok(Product::C),
            _ => Err(format!("Unknown product: {}", s)),
        }
    }
}

/// Sex of the buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    /// 男
    #[serde(rename = "男")]
    Male,
    /// 女
    #[serde(rename = "女")]
    Female,
}

impl Sex {
    /// Both categories in table order
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Label used in the output table
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "男",
            Sex::Female => "女",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "男" | "male" | "m" => Ok(Sex::Male),
            "女" | "female" | "f" => Ok(Sex::Female),
            _ => Err(format!("Unknown sex: {}", s)),
        }
    }
}

/// Output formats for the generated visit table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// JSON Lines, one object per visit
    Json,
    /// CSV with a header row
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
