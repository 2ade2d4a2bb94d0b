use crate::domain::{
    health_profile::entities::HealthProfile,
    recommendation::value_objects::RecommendationRequest,
};

const OPENING: &str = "As a dietary catering consultant, please provide menu recommendations for a customer with the following profile:";
const NOT_SPECIFIED: &str = "Not specified";
const NONE_SPECIFIED: &str = "None specified";

const CLOSING: [&str; 5] = [
    "\nPlease provide:",
    "1. Daily nutritional targets (calories, protein, carbs, fat)",
    "2. Suggested menu items for each meal (breakfast, lunch, dinner) with brief descriptions",
    "3. General health recommendations",
    "\nNote: Provide menu names and brief descriptions only, no detailed recipes needed.",
];

/// Builds the user message for the completion call. Pure and deterministic.
pub fn build_prompt(profile: &HealthProfile, request: &RecommendationRequest) -> String {
    let mut lines = vec![
        OPENING.to_string(),
        format!("Age: {}", number_or_unspecified(f64::from(profile.age), "")),
        format!("Weight: {}", number_or_unspecified(profile.weight, " kg")),
        format!("Height: {}", number_or_unspecified(profile.height, " cm")),
        format!("Medical Conditions: {}", join_or_none(&profile.medical_conditions)),
        format!("Allergies: {}", join_or_none(&profile.allergies)),
        format!("Dietary Preferences: {}", join_or_none(&profile.dietary_preferences)),
    ];

    if !request.goals.is_empty() {
        lines.push(format!("Goals: {}", request.goals.join(", ")));
    }
    if let Some(activity_level) = non_blank(request.activity_level.as_deref()) {
        lines.push(format!("Activity Level: {activity_level}"));
    }
    if !request.restrictions.is_empty() {
        lines.push(format!(
            "Additional Restrictions: {}",
            request.restrictions.join(", ")
        ));
    }
    if let Some(conditions) = non_blank(request.health_conditions.as_deref()) {
        lines.push(format!("Health Conditions: {conditions}"));
    }

    lines.extend(CLOSING.iter().map(|line| line.to_string()));
    lines.join("\n")
}

fn number_or_unspecified(value: f64, unit: &str) -> String {
    if value > 0.0 {
        format!("{value}{unit}")
    } else {
        NOT_SPECIFIED.to_string()
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        NONE_SPECIFIED.to_string()
    } else {
        values.join(", ")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
