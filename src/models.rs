use crate::schema::{buttons, materials, menu_button_builds, menus};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Debug, Queryable, Identifiable, Selectable)]
#[diesel(table_name = menus)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Menu {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = menus)]
pub struct NewMenu<'a> {
    pub name: &'a str,
}

#[derive(Debug, Queryable, Identifiable, Selectable, Associations)]
#[diesel(table_name = buttons)]
#[diesel(belongs_to(Menu, foreign_key = goes_to_menu_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Button {
    pub id: i32,
    pub name: String,
    pub goes_to_menu_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = buttons)]
pub struct NewButton<'a> {
    pub name: &'a str,
    pub goes_to_menu_id: Option<i32>,
}

#[derive(Debug, Queryable, Identifiable, Selectable, Associations)]
#[diesel(table_name = materials)]
#[diesel(belongs_to(Button))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Material {
    pub id: i32,
    pub file_name: String,
    pub message_id: i64,
    pub chat_id: i64,
    pub button_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = materials)]
pub struct NewMaterial<'a> {
    pub file_name: &'a str,
    pub message_id: i64,
    pub chat_id: i64,
    pub button_id: i32,
}

#[derive(Debug, Queryable, Identifiable, Insertable, Associations)]
#[diesel(table_name = menu_button_builds)]
#[diesel(primary_key(menu_id, button_id))]
#[diesel(belongs_to(Menu))]
#[diesel(belongs_to(Button))]
pub struct MenuButtonBuild {
    pub menu_id: i32,
    pub button_id: i32,
}
