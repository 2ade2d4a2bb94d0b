use crate::{
    domain::menu::entities::{MenuItem, NutritionInfo},
    entity::menu_items,
    infrastructure::user::mappers::string_list,
};

impl From<&menu_items::Model> for MenuItem {
    fn from(model: &menu_items::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            description: model.description.clone(),
            nutrition_info: NutritionInfo {
                calories: u32::try_from(model.calories).unwrap_or_default(),
                protein: model.protein,
                carbs: model.carbs,
                fat: model.fat,
            },
            price: model.price,
            category: model.category.clone(),
            restrictions: string_list(&model.restrictions),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<menu_items::Model> for MenuItem {
    fn from(model: menu_items::Model) -> Self {
        Self::from(&model)
    }
}
