/// Physical activity level used to scale the basal metabolic rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Lenient parse: unknown or missing values fall back to `Light`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ActivityLevel::default();
        };

        match normalize_token(raw).as_str() {
            "sedentary" | "inactive" => ActivityLevel::Sedentary,
            "light" | "lightly_active" | "low" => ActivityLevel::Light,
            "moderate" | "moderately_active" | "medium" => ActivityLevel::Moderate,
            "active" | "high" => ActivityLevel::Active,
            "very_active" | "extra_active" | "very_high" => ActivityLevel::VeryActive,
            _ => ActivityLevel::default(),
        }
    }
}

/// Lowercase snake case: `"Weight Loss"` and `"weight-loss"` become `weight_loss`.
pub fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Optional overrides supplied with a recommendation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationRequest {
    pub activity_level: Option<String>,
    pub goals: Vec<String>,
    pub restrictions: Vec<String>,
    pub health_conditions: Option<String>,
}

impl RecommendationRequest {
    pub fn activity(&self) -> ActivityLevel {
        ActivityLevel::from_raw(self.activity_level.as_deref())
    }

    pub fn has_goal(&self, goal: &str) -> bool {
        self.goals.iter().any(|g| normalize_token(g) == goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_lenient_parse() {
        assert_eq!(ActivityLevel::from_raw(None), ActivityLevel::Light);
        assert_eq!(ActivityLevel::from_raw(Some("Sedentary")), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::from_raw(Some("very active")), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from_raw(Some("Very-Active")), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from_raw(Some("couch potato")), ActivityLevel::Light);
    }

    #[test]
    fn test_has_goal_matches_normalized_tokens() {
        let request = RecommendationRequest {
            goals: vec!["Weight Loss".to_string(), "muscle-gain".to_string()],
            ..Default::default()
        };

        assert!(request.has_goal("weight_loss"));
        assert!(request.has_goal("muscle_gain"));
        assert!(!request.has_goal("weight_gain"));
    }
}
