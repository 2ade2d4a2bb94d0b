use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const RECOMMENDATION_VERSION: &str = "1.0";

/// Outcome of extracting one value: either read from the input, or a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extracted<T> {
    Found(T),
    Defaulted(T),
}

impl<T> Extracted<T> {
    pub fn value(&self) -> &T {
        match self {
            Extracted::Found(value) | Extracted::Defaulted(value) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Extracted::Found(value) | Extracted::Defaulted(value) => value,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Extracted::Found(_))
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Extracted::Defaulted(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Extracted<U> {
        match self {
            Extracted::Found(value) => Extracted::Found(f(value)),
            Extracted::Defaulted(value) => Extracted::Defaulted(f(value)),
        }
    }
}

/// Daily targets. Serialized as display strings, e.g. `"Calories": "2000 kcal"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "NutritionGoalsWire", try_from = "NutritionGoalsWire")]
pub struct NutritionGoals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl NutritionGoals {
    pub const fn new(calories: u32, protein: u32, carbs: u32, fat: u32) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct NutritionGoalsWire {
    #[serde(rename = "Calories")]
    calories: String,
    #[serde(rename = "Protein")]
    protein: String,
    #[serde(rename = "Carbs")]
    carbs: String,
    #[serde(rename = "Fat")]
    fat: String,
}

impl From<NutritionGoals> for NutritionGoalsWire {
    fn from(goals: NutritionGoals) -> Self {
        Self {
            calories: format!("{} kcal", goals.calories),
            protein: format!("{}g", goals.protein),
            carbs: format!("{}g", goals.carbs),
            fat: format!("{}g", goals.fat),
        }
    }
}

impl TryFrom<NutritionGoalsWire> for NutritionGoals {
    type Error = String;

    fn try_from(wire: NutritionGoalsWire) -> Result<Self, Self::Error> {
        Ok(Self {
            calories: parse_amount(&wire.calories, "kcal")?,
            protein: parse_amount(&wire.protein, "g")?,
            carbs: parse_amount(&wire.carbs, "g")?,
            fat: parse_amount(&wire.fat, "g")?,
        })
    }
}

fn parse_amount(value: &str, unit: &str) -> Result<u32, String> {
    value
        .trim()
        .strip_suffix(unit)
        .and_then(|n| n.trim().parse().ok())
        .ok_or_else(|| format!("invalid amount `{value}`, expected `<n>{unit}`"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }

    /// Catalog category holding dishes for this slot.
    pub fn category(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            MealSlot::Breakfast => 0,
            MealSlot::Lunch => 1,
            MealSlot::Dinner => 2,
        }
    }

    /// This slot's part of the daily calories: 30% breakfast, 40% lunch, 30% dinner.
    pub fn calorie_share(&self, daily_calories: u32) -> u32 {
        let percent: u64 = match self {
            MealSlot::Breakfast | MealSlot::Dinner => 30,
            MealSlot::Lunch => 40,
        };
        (u64::from(daily_calories) * percent / 100) as u32
    }
}

/// One suggested meal; `calories` renders as `"<n> calories"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecommendedMenuItem {
    pub name: String,
    #[serde(with = "calorie_label")]
    #[schema(value_type = String, example = "350 calories")]
    pub calories: u32,
    pub description: String,
}

impl RecommendedMenuItem {
    pub fn new(slot: MealSlot, dish: &str, calories: u32, description: &str) -> Self {
        Self {
            name: format!("{}: {}", slot.label(), dish.trim()),
            calories,
            description: description.trim().to_string(),
        }
    }
}

mod calorie_label {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(calories: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{calories} calories"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let label = String::deserialize(deserializer)?;
        label
            .trim()
            .trim_end_matches("calories")
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid calorie label `{label}`")))
    }
}

/// Final, always fully populated recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    #[serde(rename = "nutritionGoals")]
    #[schema(value_type = Object, example = json!({
        "Calories": "2000 kcal", "Protein": "75g", "Carbs": "250g", "Fat": "65g"
    }))]
    pub nutrition_goals: NutritionGoals,
    /// Breakfast, lunch and dinner, in that order.
    #[serde(rename = "menuItems")]
    pub menu_items: Vec<RecommendedMenuItem>,
    /// Newline separated `• ` bullets.
    #[serde(rename = "healthAdvice")]
    pub health_advice: String,
    pub generated_at: DateTime<Utc>,
    pub version: String,
}

impl Recommendation {
    pub fn new(
        nutrition_goals: NutritionGoals,
        menu_items: [RecommendedMenuItem; 3],
        health_advice: String,
    ) -> Self {
        Self {
            nutrition_goals,
            menu_items: menu_items.into(),
            health_advice,
            generated_at: Utc::now(),
            version: RECOMMENDATION_VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nutrition_goals_wire_format() {
        let goals = NutritionGoals::new(2000, 75, 250, 65);
        let value = serde_json::to_value(goals).unwrap();

        assert_eq!(
            value,
            json!({"Calories": "2000 kcal", "Protein": "75g", "Carbs": "250g", "Fat": "65g"})
        );

        let back: NutritionGoals = serde_json::from_value(value).unwrap();
        assert_eq!(back, goals);
    }

    #[test]
    fn test_calorie_share_truncates() {
        assert_eq!(MealSlot::Breakfast.calorie_share(2155), 646);
        assert_eq!(MealSlot::Lunch.calorie_share(2155), 862);
        assert_eq!(MealSlot::Dinner.calorie_share(2155), 646);
        assert_eq!(MealSlot::Lunch.calorie_share(u32::MAX), 1_717_986_918);
    }

    #[test]
    fn test_nutrition_goals_rejects_missing_unit() {
        let value = json!({"Calories": "2000", "Protein": "75g", "Carbs": "250g", "Fat": "65g"});
        assert!(serde_json::from_value::<NutritionGoals>(value).is_err());
    }

    #[test]
    fn test_recommendation_json_keys() {
        let item = |slot, dish| RecommendedMenuItem::new(slot, dish, 400, "desc");
        let recommendation = Recommendation::new(
            NutritionGoals::new(1800, 70, 220, 60),
            [
                item(MealSlot::Breakfast, "Oats"),
                item(MealSlot::Lunch, "Salad"),
                item(MealSlot::Dinner, "Soup"),
            ],
            "• Stay hydrated".to_string(),
        );

        let value = serde_json::to_value(&recommendation).unwrap();
        assert_eq!(value["nutritionGoals"]["Calories"], "1800 kcal");
        assert_eq!(value["menuItems"][0]["name"], "Breakfast: Oats");
        assert_eq!(value["menuItems"][2]["calories"], "400 calories");
        assert_eq!(value["healthAdvice"], "• Stay hydrated");
        assert_eq!(value["version"], "1.0");
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_extracted_accessors() {
        let found = Extracted::Found(3);
        let defaulted = Extracted::Defaulted(4).map(|v| v * 2);

        assert!(found.is_found());
        assert_eq!(*found.value(), 3);
        assert!(defaulted.is_defaulted());
        assert_eq!(defaulted.into_value(), 8);
    }
}
