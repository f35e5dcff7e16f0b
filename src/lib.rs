use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub mod db;
pub mod models;
pub mod schema;

use self::models::*;
use db::{DbError, PgPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Name of the menu that holds the top-level subject buttons.
pub const MAIN_MENU: &str = "main_menu";

pub fn find_menu_by_name(pool: &PgPool, menu_name: &str) -> Result<Option<Menu>, DbError> {
    use schema::menus::dsl::*;

    let conn = &mut pool.get()?;

    Ok(menus
        .filter(name.eq(menu_name))
        .first::<Menu>(conn)
        .optional()?)
}

pub fn create_menu(pool: &PgPool, menu_name: &str) -> Result<Menu, DbError> {
    use self::schema::menus;

    let conn = &mut pool.get()?;

    let new_menu = NewMenu { name: menu_name };

    Ok(diesel::insert_into(menus::table)
        .values(&new_menu)
        .get_result(conn)?)
}

pub fn find_button_by_name(pool: &PgPool, button_name: &str) -> Result<Option<Button>, DbError> {
    use schema::buttons::dsl::*;

    let conn = &mut pool.get()?;

    Ok(buttons
        .filter(name.eq(button_name))
        .first::<Button>(conn)
        .optional()?)
}

/// Buttons attached to a menu through the `menu_button_builds` edge table,
/// ordered by display name.
pub fn find_buttons_by_menu_id(pool: &PgPool, menu_id_value: i32) -> Result<Vec<Button>, DbError> {
    use self::schema::{buttons, menu_button_builds};

    let conn = &mut pool.get()?;

    Ok(buttons::table
        .inner_join(menu_button_builds::table)
        .filter(menu_button_builds::menu_id.eq(menu_id_value))
        .order(buttons::name.asc())
        .select(Button::as_select())
        .load::<Button>(conn)?)
}

/// Looks up the subject button by name, creating it (and linking it to the
/// root menu) when it does not exist yet.
pub fn get_or_create_subject_button(pool: &PgPool, subject: &str) -> Result<Button, DbError> {
    use self::schema::{buttons, menu_button_builds};

    if let Some(button) = find_button_by_name(pool, subject)? {
        return Ok(button);
    }

    let menu = match find_menu_by_name(pool, MAIN_MENU)? {
        Some(menu) => menu,
        None => create_menu(pool, MAIN_MENU)?,
    };

    let conn = &mut pool.get()?;

    let button: Button = diesel::insert_into(buttons::table)
        .values(&NewButton {
            name: subject,
            goes_to_menu_id: None,
        })
        .get_result(conn)?;

    diesel::insert_into(menu_button_builds::table)
        .values(&MenuButtonBuild {
            menu_id: menu.id,
            button_id: button.id,
        })
        .execute(conn)?;

    Ok(button)
}

pub fn find_materials_by_button_id(
    pool: &PgPool,
    button_id_value: i32,
) -> Result<Vec<Material>, DbError> {
    use schema::materials::dsl::*;

    let conn = &mut pool.get()?;

    Ok(materials
        .filter(button_id.eq(button_id_value))
        .order(file_name.asc())
        .load::<Material>(conn)?)
}

pub fn find_material_by_id(pool: &PgPool, material_id: i32) -> Result<Option<Material>, DbError> {
    use schema::materials::dsl::*;

    let conn = &mut pool.get()?;

    Ok(materials
        .filter(id.eq(material_id))
        .first::<Material>(conn)
        .optional()?)
}

pub fn create_material(pool: &PgPool, new_material: NewMaterial) -> Result<Material, DbError> {
    use self::schema::materials;

    let conn = &mut pool.get()?;

    Ok(diesel::insert_into(materials::table)
        .values(&new_material)
        .get_result(conn)?)
}
