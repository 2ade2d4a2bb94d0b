use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{
    authentication::{ports::TokenVerifier, value_objects::Identity},
    common::{RecommendationConfig, entities::app_errors::CoreError, services::Service},
    diet_plan::ports::DietPlanRepository,
    health::ports::HealthCheckRepository,
    health_profile::ports::UserRepository,
    menu::ports::MenuItemRepository,
    recommendation::{
        calculator::calculate_nutrition_goals,
        defaults::fallback_recommendation,
        entities::{Extracted, MealSlot, NutritionGoals, Recommendation, RecommendedMenuItem},
        parser::{ParsedReply, parse_reply},
        ports::{LLMClient, RecommendationService},
        prompt::build_prompt,
        value_objects::RecommendationRequest,
    },
};

const REPLY_LOG_LIMIT: usize = 200;

impl<U, MI, DP, HC, LLM, TV> RecommendationService for Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    #[instrument(skip_all, fields(subject = %identity.subject))]
    async fn generate_recommendation(
        &self,
        identity: Identity,
        request: RecommendationRequest,
    ) -> Result<Recommendation, CoreError> {
        // 1. Load the stored profile
        let user = match self.user_repository.get_by_subject(identity.subject).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!(stage = "profile", error = %CoreError::ProfileUnavailable, "serving fallback recommendation");
                return Ok(fallback_recommendation());
            }
            Err(e) => {
                warn!(stage = "profile", error = %e, "profile lookup failed, serving fallback recommendation");
                return Ok(fallback_recommendation());
            }
        };

        // 2. Targets from the body metrics
        let calculated = calculate_nutrition_goals(&user.health_profile, &request);

        // 3. Prompt
        let prompt = build_prompt(&user.health_profile, &request);

        // 4. Completion call, bounded by retries and the overall deadline
        let recommendation =
            match complete_with_retry(&*self.llm_client, &self.recommendation_config, prompt).await
            {
                Ok(reply) => {
                    let parsed = parse_reply(&reply);
                    if parsed.is_empty() {
                        warn!(
                            stage = "parse",
                            user_id = %user.id,
                            reply = %excerpt(&reply),
                            "reply had no usable content, serving fallback recommendation"
                        );
                        fallback_with(calculated)
                    } else {
                        self.assemble(user.id, parsed, calculated, &request).await
                    }
                }
                Err(e) => {
                    warn!(
                        stage = "completion",
                        user_id = %user.id,
                        error = %e,
                        "completion failed, serving fallback recommendation"
                    );
                    fallback_with(calculated)
                }
            };

        // 5. Keep the latest result on the user's diet plan
        if let Err(e) = self
            .diet_plan_repository
            .upsert_recommendation(
                user.id,
                recommendation.clone(),
                request.goals,
                request.restrictions,
            )
            .await
        {
            error!(stage = "persist", user_id = %user.id, error = %e, "failed to store recommendation");
        }

        info!(user_id = %user.id, "recommendation generated");
        Ok(recommendation)
    }
}

impl<U, MI, DP, HC, LLM, TV> Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    async fn assemble(
        &self,
        user_id: Uuid,
        parsed: ParsedReply,
        calculated: Extracted<NutritionGoals>,
        request: &RecommendationRequest,
    ) -> Recommendation {
        let nutrition_goals = match calculated {
            Extracted::Found(goals) => goals,
            Extracted::Defaulted(_) => parsed.nutrition_goals().into_value(),
        };

        let [breakfast, lunch, dinner] = parsed.menu_items;
        let menu_items = [
            self.resolve_slot(user_id, MealSlot::Breakfast, breakfast, &nutrition_goals, request)
                .await,
            self.resolve_slot(user_id, MealSlot::Lunch, lunch, &nutrition_goals, request)
                .await,
            self.resolve_slot(user_id, MealSlot::Dinner, dinner, &nutrition_goals, request)
                .await,
        ];

        Recommendation::new(
            nutrition_goals,
            menu_items,
            parsed.health_advice.into_value(),
        )
    }

    /// Swaps a placeholder meal for the first compatible catalog dish, sized
    /// to the slot's share of the daily calories.
    async fn resolve_slot(
        &self,
        user_id: Uuid,
        slot: MealSlot,
        item: Extracted<RecommendedMenuItem>,
        goals: &NutritionGoals,
        request: &RecommendationRequest,
    ) -> RecommendedMenuItem {
        let placeholder = match item {
            Extracted::Found(item) => return item,
            Extracted::Defaulted(item) => item,
        };

        match self
            .menu_item_repository
            .list_by_category(slot.category().to_string())
            .await
        {
            Ok(items) => items
                .into_iter()
                .find(|item| item.is_compatible_with(&request.restrictions))
                .map(|item| {
                    RecommendedMenuItem::new(
                        slot,
                        &item.name,
                        slot.calorie_share(goals.calories),
                        &item.description,
                    )
                })
                .unwrap_or(placeholder),
            Err(e) => {
                warn!(stage = "catalog", user_id = %user_id, slot = slot.category(), error = %e, "catalog lookup failed");
                placeholder
            }
        }
    }
}

/// One attempt plus `max_retries` retries with a fixed backoff, all under
/// the configured deadline.
pub(crate) async fn complete_with_retry<L: LLMClient>(
    client: &L,
    config: &RecommendationConfig,
    prompt: String,
) -> Result<String, CoreError> {
    let attempts = async {
        let mut attempt = 0;
        loop {
            match client.complete(prompt.clone()).await {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_retryable() && attempt < config.max_retries => {
                    attempt += 1;
                    warn!(stage = "completion", attempt, error = %e, "retrying completion call");
                    tokio::time::sleep(config.retry_backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    };

    tokio::time::timeout(config.deadline, attempts)
        .await
        .map_err(|_| {
            CoreError::RecommendationServiceUnavailable("deadline exceeded".to_string())
        })?
}

fn fallback_with(calculated: Extracted<NutritionGoals>) -> Recommendation {
    let mut recommendation = fallback_recommendation();
    if let Extracted::Found(goals) = calculated {
        recommendation.nutrition_goals = goals;
    }
    recommendation
}

fn excerpt(reply: &str) -> String {
    reply.chars().take(REPLY_LOG_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{
        common::test_support::{FakeLLMClient, TestHarness},
        health_profile::entities::HealthProfile,
        recommendation::{
            calculator::DEFAULT_NUTRITION_GOALS,
            defaults::{FALLBACK_HEALTH_ADVICE, FALLBACK_NUTRITION_GOALS},
        },
    };

    const REPLY: &str = "\
Nutritional Goals
Calories: 1900 kcal, 110g protein, 200g carbs, 62g fat

Menu Recommendations
Breakfast: Veggie Omelette (330 calories)
Lunch: Chicken Wrap - whole wheat wrap with grilled chicken
Dinner: Lentil Curry (520 calories)

Health Advice
- Drink water
- Sleep well";

    fn profile_a() -> HealthProfile {
        HealthProfile {
            age: 30,
            weight: 65.0,
            height: 170.0,
            ..Default::default()
        }
    }

    fn same_content(a: &Recommendation, b: &Recommendation) -> bool {
        a.nutrition_goals == b.nutrition_goals
            && a.menu_items == b.menu_items
            && a.health_advice == b.health_advice
            && a.version == b.version
    }

    #[tokio::test]
    async fn test_profile_goals_override_reply_goals() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok(REPLY)]));
        let identity = harness.with_user(profile_a());

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await
            .unwrap();

        assert_eq!(
            recommendation.nutrition_goals,
            NutritionGoals::new(2155, 104, 300, 59)
        );
        assert_eq!(recommendation.menu_items[0].name, "Breakfast: Veggie Omelette");
        assert_eq!(recommendation.menu_items[0].calories, 330);
        assert_eq!(recommendation.menu_items[1].name, "Lunch: Chicken Wrap");
        assert_eq!(recommendation.menu_items[1].calories, 500);
        assert_eq!(recommendation.health_advice, "• Drink water\n• Sleep well");
        assert_eq!(harness.llm_calls(), 1);
    }

    #[tokio::test]
    async fn test_reply_goals_used_without_body_metrics() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok(REPLY)]));
        let identity = harness.with_user(HealthProfile::default());

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await
            .unwrap();

        assert_eq!(
            recommendation.nutrition_goals,
            NutritionGoals::new(1900, 110, 200, 62)
        );
    }

    #[tokio::test]
    async fn test_remote_failure_serves_canonical_fallback() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[
            Err(CoreError::RecommendationServiceUnavailable("503".to_string())),
            Err(CoreError::RecommendationServiceUnavailable("503".to_string())),
        ]));
        let identity = harness.with_user(HealthProfile::default());
        let before = chrono::Utc::now();

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await
            .unwrap();

        assert!(same_content(&recommendation, &fallback_recommendation()));
        assert!(recommendation.generated_at >= before);
        assert_eq!(harness.llm_calls(), 2);
    }

    #[tokio::test]
    async fn test_rejected_request_is_not_retried() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[
            Err(CoreError::RecommendationRequestFailed("401".to_string())),
            Ok(REPLY),
        ]));
        let identity = harness.with_user(profile_a());

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await
            .unwrap();

        assert_eq!(recommendation.health_advice, FALLBACK_HEALTH_ADVICE);
        assert_eq!(harness.llm_calls(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_keeps_calculated_goals() {
        let harness = TestHarness::new(FakeLLMClient::failing());
        let identity = harness.with_user(profile_a());

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await
            .unwrap();

        assert_eq!(
            recommendation.nutrition_goals,
            NutritionGoals::new(2155, 104, 300, 59)
        );
        assert_eq!(recommendation.health_advice, FALLBACK_HEALTH_ADVICE);
    }

    #[tokio::test]
    async fn test_missing_user_skips_completion() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok(REPLY)]));

        let recommendation = harness
            .service
            .generate_recommendation(
                Identity::new("unknown"),
                RecommendationRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(recommendation.nutrition_goals, FALLBACK_NUTRITION_GOALS);
        assert_eq!(harness.llm_calls(), 0);
        assert!(harness.stored_plans().is_empty());
    }

    #[tokio::test]
    async fn test_empty_profile_prompts_with_unspecified_fields() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok(
            "Breakfast: Toast\nLunch: Soup\nDinner: Rice",
        )]));
        let identity = harness.with_user(HealthProfile::default());

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await
            .unwrap();

        assert_eq!(recommendation.nutrition_goals, DEFAULT_NUTRITION_GOALS);
        let prompt = harness.prompts().remove(0);
        assert!(prompt.contains("Age: Not specified"));
        assert!(prompt.contains("Allergies: None specified"));
    }

    #[tokio::test]
    async fn test_unusable_reply_serves_fallback() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok("Sorry, no idea.")]));
        let identity = harness.with_user(HealthProfile::default());

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await
            .unwrap();

        assert!(same_content(&recommendation, &fallback_recommendation()));
    }

    #[tokio::test]
    async fn test_defaulted_slot_uses_compatible_catalog_dish() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok(
            "Breakfast: Porridge\nHealth Advice\n- Walk",
        )]));
        harness.add_menu_item("Peanut Noodles", "lunch", 610, &["peanuts"]);
        harness.add_menu_item("Tofu Bowl", "lunch", 540, &["soy"]);
        let identity = harness.with_user(HealthProfile::default());
        let request = RecommendationRequest {
            restrictions: vec!["peanuts".to_string()],
            ..Default::default()
        };

        let recommendation = harness
            .service
            .generate_recommendation(identity, request)
            .await
            .unwrap();

        assert_eq!(recommendation.menu_items[1].name, "Lunch: Tofu Bowl");
        assert_eq!(recommendation.menu_items[1].calories, 800);
        assert_eq!(
            recommendation.menu_items[2].name,
            "Dinner: Grilled Fish with Vegetables"
        );
    }

    #[tokio::test]
    async fn test_catalog_dishes_follow_daily_calorie_split() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok(
            "Lunch: Lentil Soup (520 calories)\nHealth Advice\n- Walk",
        )]));
        harness.add_menu_item("Greek Yogurt", "breakfast", 320, &[]);
        harness.add_menu_item("Lentil Stew", "dinner", 700, &[]);
        let identity = harness.with_user(profile_a());

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await
            .unwrap();

        assert_eq!(recommendation.nutrition_goals.calories, 2155);
        assert_eq!(recommendation.menu_items[0].name, "Breakfast: Greek Yogurt");
        assert_eq!(recommendation.menu_items[0].calories, 646);
        assert_eq!(recommendation.menu_items[1].calories, 520);
        assert_eq!(recommendation.menu_items[2].name, "Dinner: Lentil Stew");
        assert_eq!(recommendation.menu_items[2].calories, 646);
    }

    #[tokio::test]
    async fn test_recommendation_is_stored_on_latest_plan() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok(REPLY), Ok(REPLY)]));
        let identity = harness.with_user(profile_a());
        let request = RecommendationRequest {
            goals: vec!["weight_loss".to_string()],
            ..Default::default()
        };

        let first = harness
            .service
            .generate_recommendation(identity.clone(), request.clone())
            .await
            .unwrap();
        let second = harness
            .service
            .generate_recommendation(identity, request)
            .await
            .unwrap();

        assert!(same_content(&first, &second));
        let plans = harness.stored_plans();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].calories_target, Some(1655));
        assert_eq!(plans[0].goals, vec!["weight_loss".to_string()]);
        assert_eq!(plans[0].recommendation.as_ref(), Some(&second));
    }

    #[tokio::test]
    async fn test_persistence_failure_is_not_fatal() {
        let harness = TestHarness::new(FakeLLMClient::replying(&[Ok(REPLY)]));
        harness.fail_persistence();
        let identity = harness.with_user(profile_a());

        let recommendation = harness
            .service
            .generate_recommendation(identity, RecommendationRequest::default())
            .await;

        assert!(recommendation.is_ok());
    }

    #[tokio::test]
    async fn test_retry_stops_after_success() {
        let client = FakeLLMClient::replying(&[
            Err(CoreError::RecommendationServiceUnavailable("timeout".to_string())),
            Ok("reply"),
        ]);
        let config = RecommendationConfig {
            max_retries: 3,
            retry_backoff: Duration::from_millis(1),
            deadline: Duration::from_secs(5),
        };

        let reply = complete_with_retry(&client, &config, "prompt".to_string()).await;

        assert_eq!(reply, Ok("reply".to_string()));
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_is_returned_at_once() {
        let client = FakeLLMClient::replying(&[Err(CoreError::InternalServerError), Ok("reply")]);

        let reply =
            complete_with_retry(&client, &RecommendationConfig::default(), "p".to_string()).await;

        assert_eq!(reply, Err(CoreError::InternalServerError));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_bounds_slow_completion() {
        let client = FakeLLMClient::slow(Duration::from_secs(120));
        let config = RecommendationConfig {
            deadline: Duration::from_secs(60),
            ..Default::default()
        };

        let reply = complete_with_retry(&client, &config, "p".to_string()).await;

        assert!(matches!(
            reply,
            Err(CoreError::RecommendationServiceUnavailable(_))
        ));
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let reply = "é".repeat(500);
        assert_eq!(excerpt(&reply).chars().count(), REPLY_LOG_LIMIT);
    }
}
