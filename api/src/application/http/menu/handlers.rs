pub mod create_menu_item;
pub mod get_menu_items;
