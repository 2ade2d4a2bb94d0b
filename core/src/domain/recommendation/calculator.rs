use crate::domain::{
    health_profile::entities::HealthProfile,
    recommendation::{
        entities::{Extracted, NutritionGoals},
        value_objects::RecommendationRequest,
    },
};

/// Targets used when there is nothing to compute from.
pub const DEFAULT_NUTRITION_GOALS: NutritionGoals = NutritionGoals::new(2000, 75, 250, 65);

const CALORIE_ADJUSTMENT: f64 = 500.0;
const FAT_SHARE: f64 = 0.25;

/// Daily targets from the Mifflin-St Jeor equation.
///
/// Uses the male constant (+5) for everyone since the profile carries no sex.
/// Never fails: missing or out-of-range metrics, or a non-positive calorie or
/// carb figure, give [`DEFAULT_NUTRITION_GOALS`] as `Extracted::Defaulted`.
pub fn calculate_nutrition_goals(
    profile: &HealthProfile,
    request: &RecommendationRequest,
) -> Extracted<NutritionGoals> {
    if !profile.has_body_metrics() {
        return Extracted::Defaulted(DEFAULT_NUTRITION_GOALS);
    }

    let weight = profile.weight;
    let bmr = 10.0 * weight + 6.25 * profile.height - 5.0 * f64::from(profile.age) + 5.0;
    let tdee = bmr * request.activity().multiplier();

    let adjustment = if request.has_goal("weight_loss") {
        -CALORIE_ADJUSTMENT
    } else if request.has_goal("weight_gain") {
        CALORIE_ADJUSTMENT
    } else {
        0.0
    };

    let total = (tdee + adjustment).trunc();
    if total <= 0.0 {
        return Extracted::Defaulted(DEFAULT_NUTRITION_GOALS);
    }

    let protein_per_kg = if request.has_goal("muscle_gain") { 2.0 } else { 1.6 };
    let protein = (weight * protein_per_kg).floor();
    let fat_calories = total * FAT_SHARE;
    let fat = (fat_calories / 9.0).floor();
    let carbs = ((total - protein * 4.0 - fat_calories) / 4.0).floor();

    if carbs <= 0.0 {
        return Extracted::Defaulted(DEFAULT_NUTRITION_GOALS);
    }

    Extracted::Found(NutritionGoals::new(
        total as u32,
        protein as u32,
        carbs as u32,
        fat as u32,
    ))
}
