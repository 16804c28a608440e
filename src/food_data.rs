use serde::{Deserialize, Serialize};

// Field names follow the USDA Foundation Foods JSON export. Anything not listed
// here is ignored on load.

/// Root envelope of the Foundation Foods export.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FoundationFoodsData {
    #[serde(rename = "FoundationFoods")]
    pub foundation_foods: Vec<FoodRecord>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    pub fdc_id: i64,
    pub description: String,
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
    #[serde(default)]
    pub food_portions: Vec<FoodPortion>,
    #[serde(default)]
    pub food_category: FoodCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndb_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
}

impl FoodRecord {
    /// Minimal record, mostly useful for building fixtures.
    pub fn new(fdc_id: i64, description: impl Into<String>) -> Self {
        Self {
            fdc_id,
            description: description.into(),
            food_nutrients: Vec::new(),
            food_portions: Vec::new(),
            food_category: FoodCategory::default(),
            food_class: None,
            data_type: None,
            ndb_number: None,
            publication_date: None,
        }
    }

    pub fn category_label(&self) -> &str {
        self.food_category.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FoodCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    pub nutrient: Nutrient,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodPortion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default)]
    pub measure_unit: MeasureUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gram_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MeasureUnit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}
