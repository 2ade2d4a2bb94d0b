use crate::domain::menu::entities::NutritionInfo;

#[derive(Debug, Clone)]
pub struct CreateMenuItemInput {
    pub name: String,
    pub description: String,
    pub nutrition_info: NutritionInfo,
    pub price: f64,
    pub category: String,
    pub restrictions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MenuItemSort {
    #[default]
    NameAsc,
    NameDesc,
    CaloriesAsc,
    CaloriesDesc,
    PriceAsc,
    PriceDesc,
    CreatedAtDesc,
}

#[derive(Debug, Clone, Default)]
pub struct GetMenuItemsFilter {
    pub category: Option<String>,
    /// Items carrying any of these restrictions are left out.
    pub exclude_restrictions: Vec<String>,
    pub max_calories: Option<u32>,
    pub sort: MenuItemSort,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}
