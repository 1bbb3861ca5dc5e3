//! Effective CRUD permissions for (user, menu) pairs and the navigation tree.
//!
//! Resolution order: inactive menu denies everything; an overlay row is
//! authoritative when present; otherwise the menu's baseline flags apply.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use models::errors::ModelError;
use models::menus::{self, NewMenu};
use models::{user_menus, user_profile};

use crate::errors::ServiceError;
use crate::hierarchy;

/// Per-action CRUD flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    pub get: bool,
    pub post: bool,
    pub put: bool,
    pub delete: bool,
}

impl PermissionSet {
    pub const DENY: Self = Self { get: false, post: false, put: false, delete: false };

    pub fn from_menu(menu: &menus::Model) -> Self {
        Self { get: menu.can_get, post: menu.can_post, put: menu.can_put, delete: menu.can_delete }
    }

    pub fn from_overlay(overlay: &user_menus::Model) -> Self {
        Self {
            get: overlay.can_get,
            post: overlay.can_post,
            put: overlay.can_put,
            delete: overlay.can_delete,
        }
    }
}

/// Compute effective flags for a menu and an optional per-user overlay.
pub fn effective(menu: &menus::Model, overlay: Option<&user_menus::Model>) -> PermissionSet {
    if !menu.is_active {
        return PermissionSet::DENY;
    }
    match overlay {
        Some(o) => PermissionSet::from_overlay(o),
        None => PermissionSet::from_menu(menu),
    }
}

/// Effective permissions for a (user, menu) pair.
pub async fn effective_permissions(
    db: &DatabaseConnection,
    user_profile_id: i64,
    menu_id: i64,
) -> Result<PermissionSet, ServiceError> {
    let menu = menus::Entity::find_by_id(menu_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("menu"))?;
    let overlay = user_menus::Entity::find()
        .filter(user_menus::Column::UserProfileId.eq(user_profile_id))
        .filter(user_menus::Column::MenuId.eq(menu_id))
        .one(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(effective(&menu, overlay.as_ref()))
}

/// Upsert the overlay for a (user, menu) pair, keeping the pair unique.
pub async fn set_override(
    db: &DatabaseConnection,
    user_profile_id: i64,
    menu_id: i64,
    flags: PermissionSet,
    description: Option<&str>,
) -> Result<user_menus::Model, ServiceError> {
    user_profile::Entity::find_by_id(user_profile_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("user profile"))?;
    menus::Entity::find_by_id(menu_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("menu"))?;

    let now = Utc::now().into();
    let existing = user_menus::Entity::find()
        .filter(user_menus::Column::UserProfileId.eq(user_profile_id))
        .filter(user_menus::Column::MenuId.eq(menu_id))
        .one(db)
        .await
        .map_err(ServiceError::db)?;
    let updated = match existing {
        Some(row) => {
            let mut am: user_menus::ActiveModel = row.into();
            am.can_get = Set(flags.get);
            am.can_post = Set(flags.post);
            am.can_put = Set(flags.put);
            am.can_delete = Set(flags.delete);
            am.description = Set(description.map(|s| s.to_string()));
            am.updated_at = Set(now);
            am.update(db).await.map_err(ServiceError::db)?
        }
        None => {
            let am = user_menus::ActiveModel {
                user_profile_id: Set(user_profile_id),
                menu_id: Set(menu_id),
                can_get: Set(flags.get),
                can_post: Set(flags.post),
                can_put: Set(flags.put),
                can_delete: Set(flags.delete),
                description: Set(description.map(|s| s.to_string())),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            am.insert(db).await.map_err(ServiceError::db)?
        }
    };
    Ok(updated)
}

pub async fn clear_override(
    db: &DatabaseConnection,
    user_profile_id: i64,
    menu_id: i64,
) -> Result<(), ServiceError> {
    user_menus::Entity::delete_many()
        .filter(user_menus::Column::UserProfileId.eq(user_profile_id))
        .filter(user_menus::Column::MenuId.eq(menu_id))
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(())
}

/// One node of the effective navigation tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MenuNode {
    pub menu: menus::Model,
    pub children: Vec<MenuNode>,
}

/// Build a forest from active rows already ordered by `(sort, id)`.
/// A node whose parent is absent (inactive) is excluded with its subtree.
pub fn build_tree(rows: Vec<menus::Model>) -> Vec<MenuNode> {
    let present: std::collections::HashSet<i64> = rows.iter().map(|m| m.id).collect();
    let mut roots: Vec<i64> = Vec::new();
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    let mut by_id: HashMap<i64, menus::Model> = HashMap::new();
    for m in rows {
        match m.parent_id {
            None => roots.push(m.id),
            Some(p) if present.contains(&p) => children.entry(p).or_default().push(m.id),
            Some(_) => {}
        }
        by_id.insert(m.id, m);
    }

    fn assemble(
        id: i64,
        by_id: &HashMap<i64, menus::Model>,
        children: &HashMap<i64, Vec<i64>>,
    ) -> Option<MenuNode> {
        let menu = by_id.get(&id)?.clone();
        let kids = children
            .get(&id)
            .map(|ids| ids.iter().filter_map(|c| assemble(*c, by_id, children)).collect())
            .unwrap_or_default();
        Some(MenuNode { menu, children: kids })
    }

    roots.iter().filter_map(|id| assemble(*id, &by_id, &children)).collect()
}

/// The effective navigation forest: active nodes only, siblings ordered by
/// `(sort, id)` ascending.
pub async fn menu_tree(db: &DatabaseConnection) -> Result<Vec<MenuNode>, ServiceError> {
    let rows = menus::Entity::find()
        .filter(menus::Column::IsActive.eq(true))
        .order_by_asc(menus::Column::Sort)
        .order_by_asc(menus::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(build_tree(rows))
}

pub async fn create_menu(db: &DatabaseConnection, new: NewMenu) -> Result<menus::Model, ServiceError> {
    Ok(menus::create(db, new).await?)
}

/// Move a menu under a new parent, rejecting any assignment that would close
/// a loop in the tree.
pub async fn reparent_menu(
    db: &DatabaseConnection,
    menu_id: i64,
    new_parent: Option<i64>,
) -> Result<menus::Model, ServiceError> {
    let menu = menus::Entity::find_by_id(menu_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("menu"))?;
    if let Some(parent_id) = new_parent {
        menus::Entity::find_by_id(parent_id)
            .one(db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("parent menu"))?;
    }
    let parents: HashMap<i64, Option<i64>> = menus::Entity::find()
        .all(db)
        .await
        .map_err(ServiceError::db)?
        .into_iter()
        .map(|m| (m.id, m.parent_id))
        .collect();
    if hierarchy::would_cycle(menu_id, new_parent, &parents) {
        return Err(ServiceError::Model(ModelError::CycleDetected(format!(
            "menu {menu_id} cannot be parented under {new_parent:?}"
        ))));
    }
    let mut am: menus::ActiveModel = menu.into();
    am.parent_id = Set(new_parent);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ServiceError::db)
}

/// Delete a menu. Protected while child menus or overlays still point at it.
pub async fn delete_menu(db: &DatabaseConnection, menu_id: i64) -> Result<(), ServiceError> {
    menus::Entity::find_by_id(menu_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("menu"))?;
    let child_count = menus::Entity::find()
        .filter(menus::Column::ParentId.eq(menu_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    if child_count > 0 {
        return Err(ServiceError::Model(ModelError::ReferentialIntegrity(format!(
            "menu {menu_id} still has {child_count} child menus"
        ))));
    }
    let overlay_count = user_menus::Entity::find()
        .filter(user_menus::Column::MenuId.eq(menu_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    if overlay_count > 0 {
        return Err(ServiceError::Model(ModelError::ReferentialIntegrity(format!(
            "menu {menu_id} is referenced by {overlay_count} user overlays"
        ))));
    }
    menus::Entity::delete_by_id(menu_id).exec(db).await.map_err(ServiceError::db)?;
    info!(menu_id, "menu deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn menu(id: i64, parent_id: Option<i64>, sort: i32, is_active: bool) -> menus::Model {
        menus::Model {
            id,
            name: format!("menu-{id}"),
            parent_id,
            url: None,
            can_get: true,
            can_post: false,
            can_put: false,
            can_delete: false,
            sort,
            is_active,
            description: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn overlay(menu_id: i64, get: bool, post: bool) -> user_menus::Model {
        user_menus::Model {
            id: 1,
            user_profile_id: 9,
            menu_id,
            can_get: get,
            can_post: post,
            can_put: false,
            can_delete: false,
            description: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn baseline_applies_without_overlay() {
        let m = menu(1, None, 0, true);
        let eff = effective(&m, None);
        assert_eq!(eff, PermissionSet { get: true, post: false, put: false, delete: false });
    }

    #[test]
    fn overlay_is_authoritative() {
        let m = menu(1, None, 0, true);
        let o = overlay(1, false, true);
        let eff = effective(&m, Some(&o));
        assert_eq!(eff, PermissionSet { get: false, post: true, put: false, delete: false });
    }

    #[test]
    fn inactive_menu_denies_even_with_overlay() {
        let m = menu(1, None, 0, false);
        let o = overlay(1, true, true);
        assert_eq!(effective(&m, Some(&o)), PermissionSet::DENY);
        assert_eq!(effective(&m, None), PermissionSet::DENY);
    }

    #[test]
    fn tree_orders_siblings_and_nests_children() {
        // rows arrive in (sort, id) order, as the query produces them
        let rows = vec![
            menu(2, None, 0, true),
            menu(1, None, 5, true),
            menu(3, Some(2), 0, true),
            menu(4, Some(2), 1, true),
        ];
        let forest = build_tree(rows);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].menu.id, 2);
        assert_eq!(forest[1].menu.id, 1);
        let kids: Vec<i64> = forest[0].children.iter().map(|n| n.menu.id).collect();
        assert_eq!(kids, vec![3, 4]);
    }

    #[test]
    fn subtree_under_missing_parent_is_dropped() {
        // parent 2 is inactive and therefore absent from the rows
        let rows = vec![menu(1, None, 0, true), menu(3, Some(2), 0, true), menu(4, Some(3), 0, true)];
        let forest = build_tree(rows);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].menu.id, 1);
        assert!(forest[0].children.is_empty());
    }
}
