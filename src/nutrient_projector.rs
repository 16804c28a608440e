use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::food_data::{FoodNutrient, FoodPortion, FoodRecord};

/// Nutrients returned when a caller asks for simplified output without naming
/// any. Energy, the macronutrients and the commonly tracked vitamins/minerals.
pub const DEFAULT_NUTRIENTS: &[&str] = &[
    // Energy and macronutrients
    "Energy",
    "Water",
    "Protein",
    "Total lipid (fat)",
    "Carbohydrate, by difference",
    "Fiber, total dietary",
    "Sugars, Total",
    "Fatty acids, total saturated",
    "Fatty acids, total monounsaturated",
    "Fatty acids, total polyunsaturated",
    "Fatty acids, total trans",
    "Cholesterol",
    // Vitamins
    "Vitamin A, RAE",
    "Vitamin C, total ascorbic acid",
    "Vitamin D (D2 + D3)",
    "Vitamin E (alpha-tocopherol)",
    "Vitamin K (phylloquinone)",
    "Thiamin",
    "Riboflavin",
    "Niacin",
    "Vitamin B-6",
    "Folate, total",
    "Vitamin B-12",
    "Choline, total",
    "Pantothenic acid",
    // Minerals
    "Calcium, Ca",
    "Iron, Fe",
    "Magnesium, Mg",
    "Phosphorus, P",
    "Potassium, K",
    "Sodium, Na",
    "Zinc, Zn",
    "Copper, Cu",
    "Manganese, Mn",
    "Selenium, Se",
];

const PUFA_PREFIX: &str = "pufa ";
const VITAMIN_C_FULL_NAME: &str = "vitamin c, total ascorbic acid";
const VITAMIN_C_SHORT_NAME: &str = "vitamin c";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedNutrient {
    pub name: String,
    pub amount: f64,
    pub unit_name: String,
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
pub struct SimplifiedMeasureUnit {
    pub name: String,
    pub abbreviation: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedFoodPortion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub measure_unit: SimplifiedMeasureUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gram_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedFood {
    pub fdc_id: i64,
    pub name: String,
    pub category: String,
    pub nutrients: Vec<SimplifiedNutrient>,
    pub food_portions: Vec<SimplifiedFoodPortion>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimplifiedNutrientResponse {
    pub found: bool,
    pub count: usize,
    pub foods: Vec<SimplifiedFood>,
}

impl SimplifiedNutrientResponse {
    pub fn from_foods(foods: Vec<SimplifiedFood>) -> Self {
        Self {
            found: !foods.is_empty(),
            count: foods.len(),
            foods,
        }
    }
}

fn normalize_nutrient_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A request's nutrient allow-list, normalized once. An empty filter allows
/// everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientFilter {
    names: Vec<String>,
}

impl NutrientFilter {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            names: names.iter().map(|n| normalize_nutrient_name(n.as_ref())).collect(),
        }
    }

    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn includes(&self, nutrient_name: &str) -> bool {
        if self.names.is_empty() {
            return true;
        }
        let data_name = normalize_nutrient_name(nutrient_name);
        self.names
            .iter()
            .any(|filter_name| *filter_name == data_name || is_alternative_nutrient_name(&data_name, filter_name))
    }
}

/// Whether two normalized names refer to the same nutrient under the known
/// naming variants: an optional "PUFA " qualifier on either side, and the two
/// spellings of vitamin C.
pub fn is_alternative_nutrient_name(data_name: &str, filter_name: &str) -> bool {
    if filter_name.strip_prefix(PUFA_PREFIX) == Some(data_name) {
        return true;
    }
    if data_name.strip_prefix(PUFA_PREFIX) == Some(filter_name) {
        return true;
    }

    matches!(
        (filter_name, data_name),
        (VITAMIN_C_FULL_NAME, VITAMIN_C_SHORT_NAME) | (VITAMIN_C_SHORT_NAME, VITAMIN_C_FULL_NAME)
    )
}

// Energy is reported in both kcal and kJ; only the kcal reading is kept.
fn is_kilojoule_energy(nutrient: &FoodNutrient) -> bool {
    normalize_nutrient_name(&nutrient.nutrient.name) == "energy"
        && normalize_nutrient_name(&nutrient.nutrient.unit_name) == "kj"
}

fn simplify_nutrient(nutrient: &FoodNutrient) -> SimplifiedNutrient {
    SimplifiedNutrient {
        name: nutrient.nutrient.name.clone(),
        amount: nutrient.amount,
        unit_name: nutrient.nutrient.unit_name.clone(),
        data_points: nutrient.data_points,
        min: nutrient.min,
        max: nutrient.max,
        median: nutrient.median,
    }
}

fn simplify_portion(portion: &FoodPortion) -> SimplifiedFoodPortion {
    SimplifiedFoodPortion {
        value: portion.value,
        measure_unit: SimplifiedMeasureUnit {
            name: portion.measure_unit.name.clone(),
            abbreviation: portion.measure_unit.abbreviation.clone(),
        },
        gram_weight: portion.gram_weight,
        amount: portion.amount,
    }
}

/// Reduces a full record to its filtered nutrient view. Portions are carried
/// over one-to-one.
pub fn simplify_food(food: &FoodRecord, filter: &NutrientFilter) -> SimplifiedFood {
    let nutrients = food
        .food_nutrients
        .iter()
        .filter(|n| !is_kilojoule_energy(n))
        .filter(|n| filter.includes(&n.nutrient.name))
        .map(simplify_nutrient)
        .collect();

    SimplifiedFood {
        fdc_id: food.fdc_id,
        name: food.description.clone(),
        category: food.category_label().to_string(),
        nutrients,
        food_portions: food.food_portions.iter().map(simplify_portion).collect(),
    }
}

/// Builds simplified views, falling back to a configured default nutrient list
/// when the caller gives no filter.
#[derive(Debug, Clone)]
pub struct NutrientProjector {
    default_filter: Arc<NutrientFilter>,
}

impl Default for NutrientProjector {
    fn default() -> Self {
        Self::new(DEFAULT_NUTRIENTS)
    }
}

impl NutrientProjector {
    pub fn new<S: AsRef<str>>(default_nutrients: &[S]) -> Self {
        Self {
            default_filter: Arc::new(NutrientFilter::new(default_nutrients)),
        }
    }

    /// `None` applies the default list, `Some(&[])` keeps every nutrient, and
    /// any other slice is used as the allow-list.
    pub fn project<'a, I>(&self, records: I, nutrient_filter: Option<&[String]>) -> SimplifiedNutrientResponse
    where
        I: IntoIterator<Item = &'a FoodRecord>,
    {
        let requested;
        let filter = match nutrient_filter {
            Some(names) => {
                requested = NutrientFilter::new(names);
                &requested
            }
            None => self.default_filter.as_ref(),
        };

        let foods = records.into_iter().map(|food| simplify_food(food, filter)).collect();
        SimplifiedNutrientResponse::from_foods(foods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food_data::{MeasureUnit, Nutrient};

    fn nutrient(name: &str, unit: &str, amount: f64) -> FoodNutrient {
        FoodNutrient {
            nutrient: Nutrient {
                id: None,
                number: None,
                name: name.to_string(),
                unit_name: unit.to_string(),
                rank: None,
            },
            amount,
            data_points: None,
            min: None,
            max: None,
            median: None,
        }
    }

    fn milk_record() -> FoodRecord {
        let mut milk = FoodRecord::new(746782, "Milk, whole, 3.25% milkfat");
        let mut protein = nutrient("Protein", "g", 3.27);
        protein.data_points = Some(12);
        protein.min = Some(3.1);
        protein.max = Some(3.4);
        protein.median = Some(3.28);
        milk.food_nutrients = vec![
            nutrient("Energy", "kcal", 61.0),
            nutrient("Energy", "kJ", 255.0),
            protein,
            nutrient("Vitamin C, total ascorbic acid", "mg", 0.0),
            nutrient("PUFA 18:2", "g", 0.11),
            nutrient("Calcium, Ca", "mg", 123.0),
            nutrient("Lutein + zeaxanthin", "ug", 9.0),
        ];
        milk.food_portions = vec![FoodPortion {
            value: Some(1.0),
            measure_unit: MeasureUnit {
                id: Some(1000),
                name: "cup".to_string(),
                abbreviation: "cup".to_string(),
            },
            gram_weight: Some(244.0),
            amount: Some(1.0),
            sequence_number: Some(1),
        }];
        milk
    }

    fn names(food: &SimplifiedFood) -> Vec<&str> {
        food.nutrients.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_energy_keeps_only_kcal() {
        let milk = milk_record();
        let food = simplify_food(&milk, &NutrientFilter::new(&["Energy"]));
        assert_eq!(food.nutrients.len(), 1);
        assert_eq!(food.nutrients[0].unit_name, "kcal");
        assert_eq!(food.nutrients[0].amount, 61.0);
    }

    #[test]
    fn test_empty_filter_keeps_everything_but_kj() {
        let milk = milk_record();
        let food = simplify_food(&milk, &NutrientFilter::allow_all());
        assert_eq!(food.nutrients.len(), 6);
        assert!(food.nutrients.iter().all(|n| n.unit_name != "kJ"));
        // original order kept
        assert_eq!(names(&food)[0], "Energy");
        assert_eq!(names(&food)[5], "Lutein + zeaxanthin");
    }

    #[test]
    fn test_filter_is_case_and_whitespace_insensitive() {
        let milk = milk_record();
        let food = simplify_food(&milk, &NutrientFilter::new(&["  calcium, CA ", "PROTEIN"]));
        assert_eq!(names(&food), vec!["Protein", "Calcium, Ca"]);
    }

    #[test]
    fn test_statistics_are_carried_through() {
        let milk = milk_record();
        let food = simplify_food(&milk, &NutrientFilter::new(&["Protein"]));
        let protein = &food.nutrients[0];
        assert_eq!(protein.data_points, Some(12));
        assert_eq!(protein.min, Some(3.1));
        assert_eq!(protein.max, Some(3.4));
        assert_eq!(protein.median, Some(3.28));
    }

    #[test]
    fn test_vitamin_c_alias() {
        let milk = milk_record();
        let food = simplify_food(&milk, &NutrientFilter::new(&["Vitamin C"]));
        assert_eq!(names(&food), vec!["Vitamin C, total ascorbic acid"]);

        assert!(is_alternative_nutrient_name("vitamin c", "vitamin c, total ascorbic acid"));
        assert!(is_alternative_nutrient_name("vitamin c, total ascorbic acid", "vitamin c"));
    }

    #[test]
    fn test_pufa_prefix_is_optional_on_either_side() {
        let milk = milk_record();
        let food = simplify_food(&milk, &NutrientFilter::new(&["18:2"]));
        assert_eq!(names(&food), vec!["PUFA 18:2"]);

        assert!(is_alternative_nutrient_name("18:3", "pufa 18:3"));
        assert!(is_alternative_nutrient_name("pufa 18:3", "18:3"));
        assert!(!is_alternative_nutrient_name("pufa 18:3", "pufa 18:2"));
    }

    #[test]
    fn test_unknown_filter_names_yield_empty_nutrients() {
        let milk = milk_record();
        let food = simplify_food(&milk, &NutrientFilter::new(&["Unobtainium"]));
        assert!(food.nutrients.is_empty());
        // portions are never filtered
        assert_eq!(food.food_portions.len(), 1);
        assert_eq!(food.food_portions[0].gram_weight, Some(244.0));
        assert_eq!(food.food_portions[0].measure_unit.name, "cup");
    }

    #[test]
    fn test_projector_default_and_explicit_filters() {
        let milk = milk_record();
        let projector = NutrientProjector::new(&["Energy", "Calcium, Ca"]);

        let defaulted = projector.project([&milk], None);
        assert!(defaulted.found);
        assert_eq!(defaulted.count, 1);
        assert_eq!(names(&defaulted.foods[0]), vec!["Energy", "Calcium, Ca"]);

        let no_names: Vec<String> = Vec::new();
        let everything = projector.project([&milk], Some(no_names.as_slice()));
        assert_eq!(everything.foods[0].nutrients.len(), 6);

        let explicit = vec!["Protein".to_string()];
        let only_protein = projector.project([&milk], Some(explicit.as_slice()));
        assert_eq!(names(&only_protein.foods[0]), vec!["Protein"]);
    }

    #[test]
    fn test_projector_empty_input() {
        let response = NutrientProjector::default().project(std::iter::empty(), None);
        assert!(!response.found);
        assert_eq!(response.count, 0);
        assert!(response.foods.is_empty());
    }

    #[test]
    fn test_default_list_covers_core_nutrients() {
        let filter = NutrientFilter::new(DEFAULT_NUTRIENTS);
        for name in ["Energy", "Protein", "Vitamin C", "Calcium, Ca", "Selenium, Se"] {
            assert!(filter.includes(name), "{name} should be in the default list");
        }
        assert!(DEFAULT_NUTRIENTS.len() >= 25);
    }
}
