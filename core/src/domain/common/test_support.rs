//! In-memory port implementations for service tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use uuid::Uuid;

use crate::domain::{
    authentication::{ports::TokenVerifier, value_objects::Identity},
    common::{RecommendationConfig, entities::app_errors::CoreError, services::Service},
    diet_plan::{entities::DietPlan, ports::DietPlanRepository},
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
    health_profile::{
        entities::{HealthProfile, User},
        ports::UserRepository,
    },
    menu::{
        entities::{MenuItem, MenuItemConfig, NutritionInfo},
        ports::MenuItemRepository,
        value_objects::GetMenuItemsFilter,
    },
    recommendation::{entities::Recommendation, ports::LLMClient},
};

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl UserRepository for InMemoryUserRepository {
    async fn get_by_subject(&self, subject: String) -> Result<Option<User>, CoreError> {
        let users = self.users.lock().map_err(|_| CoreError::InternalServerError)?;
        Ok(users.iter().find(|u| u.subject == subject).cloned())
    }

    async fn upsert(&self, user: User) -> Result<User, CoreError> {
        let mut users = self.users.lock().map_err(|_| CoreError::InternalServerError)?;
        users.retain(|u| u.subject != user.subject);
        users.push(user.clone());
        Ok(user)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryMenuItemRepository {
    items: Arc<Mutex<Vec<MenuItem>>>,
}

impl MenuItemRepository for InMemoryMenuItemRepository {
    async fn list(&self, filter: GetMenuItemsFilter) -> Result<Vec<MenuItem>, CoreError> {
        let items = self.items.lock().map_err(|_| CoreError::InternalServerError)?;
        Ok(items
            .iter()
            .filter(|i| filter.category.as_ref().is_none_or(|c| &i.category == c))
            .filter(|i| i.is_compatible_with(&filter.exclude_restrictions))
            .cloned()
            .collect())
    }

    async fn list_by_category(&self, category: String) -> Result<Vec<MenuItem>, CoreError> {
        let items = self.items.lock().map_err(|_| CoreError::InternalServerError)?;
        let mut found: Vec<MenuItem> = items
            .iter()
            .filter(|i| i.category == category)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn create(&self, item: MenuItem) -> Result<MenuItem, CoreError> {
        let mut items = self.items.lock().map_err(|_| CoreError::InternalServerError)?;
        items.push(item.clone());
        Ok(item)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryDietPlanRepository {
    plans: Arc<Mutex<Vec<DietPlan>>>,
    failing: Arc<Mutex<bool>>,
}

impl InMemoryDietPlanRepository {
    fn check(&self) -> Result<(), CoreError> {
        let failing = self.failing.lock().map_err(|_| CoreError::InternalServerError)?;
        if *failing {
            return Err(CoreError::InternalServerError);
        }
        Ok(())
    }
}

impl DietPlanRepository for InMemoryDietPlanRepository {
    async fn create(&self, plan: DietPlan) -> Result<DietPlan, CoreError> {
        self.check()?;
        let mut plans = self.plans.lock().map_err(|_| CoreError::InternalServerError)?;
        plans.push(plan.clone());
        Ok(plan)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<DietPlan>, CoreError> {
        self.check()?;
        let plans = self.plans.lock().map_err(|_| CoreError::InternalServerError)?;
        let mut found: Vec<DietPlan> = plans
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(found)
    }

    async fn upsert_recommendation(
        &self,
        user_id: Uuid,
        recommendation: Recommendation,
        goals: Vec<String>,
        restrictions: Vec<String>,
    ) -> Result<DietPlan, CoreError> {
        self.check()?;
        let mut plans = self.plans.lock().map_err(|_| CoreError::InternalServerError)?;
        let latest = plans
            .iter_mut()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| p.updated_at);

        match latest {
            Some(plan) => {
                plan.apply_recommendation(recommendation, goals, restrictions);
                Ok(plan.clone())
            }
            None => {
                let plan =
                    DietPlan::from_recommendation(user_id, recommendation, goals, restrictions);
                plans.push(plan.clone());
                Ok(plan)
            }
        }
    }
}

#[derive(Default, Clone)]
pub struct StaticHealthCheck;

impl HealthCheckRepository for StaticHealthCheck {
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        Ok(DatabaseHealthStatus::up(1))
    }

    async fn health(&self) -> Result<u64, CoreError> {
        Ok(1)
    }
}

/// Replays scripted replies in order, then keeps failing.
#[derive(Default, Clone)]
pub struct FakeLLMClient {
    replies: Arc<Mutex<VecDeque<Result<String, CoreError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl FakeLLMClient {
    pub fn replying(replies: &[Result<&str, CoreError>]) -> Self {
        let replies = replies
            .iter()
            .map(|r| r.clone().map(str::to_string))
            .collect();
        Self {
            replies: Arc::new(Mutex::new(replies)),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::replying(&[Ok("late reply")])
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl LLMClient for FakeLLMClient {
    async fn complete(&self, prompt: String) -> Result<String, CoreError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .replies
            .lock()
            .map_err(|_| CoreError::InternalServerError)?
            .pop_front();
        next.unwrap_or_else(|| {
            Err(CoreError::RecommendationServiceUnavailable(
                "no scripted reply".to_string(),
            ))
        })
    }
}

#[derive(Default, Clone)]
pub struct StaticTokenVerifier;

impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: String) -> Result<Identity, CoreError> {
        match token.strip_prefix("valid:") {
            Some(subject) => Ok(Identity::new(subject)),
            None => Err(CoreError::Unauthorized),
        }
    }
}

pub type TestService = Service<
    InMemoryUserRepository,
    InMemoryMenuItemRepository,
    InMemoryDietPlanRepository,
    StaticHealthCheck,
    FakeLLMClient,
    StaticTokenVerifier,
>;

/// A service wired to in-memory ports, with handles kept for assertions.
pub struct TestHarness {
    pub service: TestService,
    users: InMemoryUserRepository,
    menu_items: InMemoryMenuItemRepository,
    diet_plans: InMemoryDietPlanRepository,
    llm: FakeLLMClient,
}

impl TestHarness {
    pub fn new(llm: FakeLLMClient) -> Self {
        let users = InMemoryUserRepository::default();
        let menu_items = InMemoryMenuItemRepository::default();
        let diet_plans = InMemoryDietPlanRepository::default();

        let service = Service::new(
            users.clone(),
            menu_items.clone(),
            diet_plans.clone(),
            StaticHealthCheck,
            llm.clone(),
            StaticTokenVerifier,
            RecommendationConfig {
                max_retries: 1,
                retry_backoff: Duration::from_millis(1),
                deadline: Duration::from_secs(5),
            },
        );

        Self {
            service,
            users,
            menu_items,
            diet_plans,
            llm,
        }
    }

    /// Stores a user with the given profile and returns its identity.
    pub fn with_user(&self, profile: HealthProfile) -> Identity {
        let subject = format!("auth0|{}", Uuid::new_v4());
        let mut user = User::new(
            subject.clone(),
            "Test User".to_string(),
            "test@example.com".to_string(),
            String::new(),
        );
        user.health_profile = profile;
        if let Ok(mut users) = self.users.users.lock() {
            users.push(user);
        }
        Identity::new(subject)
    }

    pub fn add_menu_item(&self, name: &str, category: &str, calories: u32, restrictions: &[&str]) {
        let item = MenuItem::new(MenuItemConfig {
            name: name.to_string(),
            description: format!("{name} from the kitchen"),
            nutrition_info: NutritionInfo {
                calories,
                ..Default::default()
            },
            price: 10.0,
            category: category.to_string(),
            restrictions: restrictions.iter().map(|r| r.to_string()).collect(),
        });
        if let Ok(mut items) = self.menu_items.items.lock() {
            items.push(item);
        }
    }

    pub fn fail_persistence(&self) {
        if let Ok(mut failing) = self.diet_plans.failing.lock() {
            *failing = true;
        }
    }

    pub fn stored_plans(&self) -> Vec<DietPlan> {
        self.diet_plans
            .plans
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn stored_users(&self) -> Vec<User> {
        self.users.users.lock().map(|u| u.clone()).unwrap_or_default()
    }

    pub fn llm_calls(&self) -> usize {
        self.llm.calls()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.llm.prompts()
    }
}
