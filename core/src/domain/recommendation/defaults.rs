use crate::domain::recommendation::entities::{
    MealSlot, NutritionGoals, Recommendation, RecommendedMenuItem,
};

/// Goals of the canonical recommendation served without a usable reply.
pub const FALLBACK_NUTRITION_GOALS: NutritionGoals = NutritionGoals::new(1800, 70, 220, 60);

pub const FALLBACK_HEALTH_ADVICE: &str =
    "• Maintain consistent meal timing\n• Stay hydrated\n• Exercise regularly";

/// Advice used when a reply carries no bullet at all.
pub const DEFAULT_HEALTH_ADVICE: [&str; 4] = [
    "• Maintain consistent meal timing for optimal metabolism",
    "• Stay hydrated by drinking at least 8 glasses of water daily",
    "• Consider moderate exercise 3-4 times per week",
    "• Monitor your portion sizes and eat mindfully",
];

pub fn default_health_advice() -> String {
    DEFAULT_HEALTH_ADVICE.join("\n")
}

/// Calories assumed for a suggested meal that does not state any.
pub fn placeholder_calories(slot: MealSlot) -> u32 {
    match slot {
        MealSlot::Breakfast => 400,
        MealSlot::Lunch => 500,
        MealSlot::Dinner => 450,
    }
}

/// Description used when a suggested meal has no text of its own.
pub fn default_description(slot: MealSlot) -> &'static str {
    match slot {
        MealSlot::Breakfast => "Nutritious breakfast with whole grains and fresh fruits",
        MealSlot::Lunch => "Balanced lunch with lean protein and vegetables",
        MealSlot::Dinner => "Light and nutritious dinner option with lean protein",
    }
}

/// Item standing in for a meal slot the reply did not mention.
pub fn default_menu_item(slot: MealSlot) -> RecommendedMenuItem {
    let dish = match slot {
        MealSlot::Breakfast => "Healthy Breakfast Bowl",
        MealSlot::Lunch => "Garden Fresh Plate",
        MealSlot::Dinner => "Grilled Fish with Vegetables",
    };

    RecommendedMenuItem::new(
        slot,
        dish,
        placeholder_calories(slot),
        default_description(slot),
    )
}

fn fallback_menu_items() -> [RecommendedMenuItem; 3] {
    [
        RecommendedMenuItem::new(
            MealSlot::Breakfast,
            "Healthy Morning Bowl",
            350,
            "A nutritious breakfast option with whole grains and fresh fruits",
        ),
        RecommendedMenuItem::new(
            MealSlot::Lunch,
            "Fresh Garden Plate",
            450,
            "A balanced mix of vegetables and lean protein",
        ),
        RecommendedMenuItem::new(
            MealSlot::Dinner,
            "Light Evening Meal",
            400,
            "Light and nutritious dinner option",
        ),
    ]
}

/// Canonical recommendation for a missing profile or a failed completion call.
pub fn fallback_recommendation() -> Recommendation {
    Recommendation::new(
        FALLBACK_NUTRITION_GOALS,
        fallback_menu_items(),
        FALLBACK_HEALTH_ADVICE.to_string(),
    )
}
