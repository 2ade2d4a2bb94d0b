use tracing::{info, instrument};

use crate::domain::{
    authentication::{ports::TokenVerifier, value_objects::Identity},
    common::{entities::app_errors::CoreError, services::Service},
    diet_plan::ports::DietPlanRepository,
    health::ports::HealthCheckRepository,
    health_profile::ports::UserRepository,
    menu::{
        entities::{MenuItem, MenuItemConfig},
        ports::{MenuItemRepository, MenuService},
        value_objects::{CreateMenuItemInput, GetMenuItemsFilter},
    },
    recommendation::ports::LLMClient,
};

impl<U, MI, DP, HC, LLM, TV> MenuService for Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    async fn get_menu_items(&self, filter: GetMenuItemsFilter) -> Result<Vec<MenuItem>, CoreError> {
        self.menu_item_repository.list(filter).await
    }

    #[instrument(skip_all, fields(subject = %identity.subject, category = %input.category))]
    async fn create_menu_item(
        &self,
        identity: Identity,
        input: CreateMenuItemInput,
    ) -> Result<MenuItem, CoreError> {
        if input.name.trim().is_empty() || input.category.trim().is_empty() {
            return Err(CoreError::Invalid);
        }
        if input.price < 0.0 || !input.price.is_finite() {
            return Err(CoreError::Invalid);
        }

        let item = MenuItem::new(MenuItemConfig {
            name: input.name.trim().to_string(),
            description: input.description,
            nutrition_info: input.nutrition_info,
            price: input.price,
            category: input.category,
            restrictions: input.restrictions,
        });

        let item = self.menu_item_repository.create(item).await?;
        info!(menu_item_id = %item.id, "menu item created");

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::test_support::{FakeLLMClient, TestHarness},
        menu::entities::NutritionInfo,
    };

    fn input(name: &str, category: &str) -> CreateMenuItemInput {
        CreateMenuItemInput {
            name: name.to_string(),
            description: "House special".to_string(),
            nutrition_info: NutritionInfo {
                calories: 420,
                protein: 30.0,
                carbs: 40.0,
                fat: 12.0,
            },
            price: 55000.0,
            category: category.to_string(),
            restrictions: vec!["dairy".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_and_filter_menu_items() {
        let harness = TestHarness::new(FakeLLMClient::failing());
        let identity = Identity::new("auth0|chef");

        harness
            .service
            .create_menu_item(identity.clone(), input(" Paneer Wrap ", "Lunch"))
            .await
            .unwrap();
        harness.add_menu_item("Fruit Cup", "breakfast", 150, &[]);

        let lunch = harness
            .service
            .get_menu_items(GetMenuItemsFilter {
                category: Some("lunch".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(lunch.len(), 1);
        assert_eq!(lunch[0].name, "Paneer Wrap");

        let dairy_free = harness
            .service
            .get_menu_items(GetMenuItemsFilter {
                exclude_restrictions: vec!["dairy".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(dairy_free.len(), 1);
        assert_eq!(dairy_free[0].name, "Fruit Cup");
    }

    #[tokio::test]
    async fn test_create_menu_item_rejects_blank_name_and_negative_price() {
        let harness = TestHarness::new(FakeLLMClient::failing());
        let identity = Identity::new("auth0|chef");

        let blank = harness
            .service
            .create_menu_item(identity.clone(), input("  ", "lunch"))
            .await;
        assert_eq!(blank, Err(CoreError::Invalid));

        let negative = harness
            .service
            .create_menu_item(
                identity,
                CreateMenuItemInput {
                    price: -1.0,
                    ..input("Soup", "dinner")
                },
            )
            .await;
        assert_eq!(negative, Err(CoreError::Invalid));
    }
}
