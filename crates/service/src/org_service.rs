//! Organizational directory: user profiles, the leader hierarchy, and
//! ops-contact links between business units and profiles.

use std::collections::{HashMap, HashSet, VecDeque};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use chrono::Utc;
use tracing::info;

use models::errors::ModelError;
use models::user_profile::{self, NewUserProfile};
use models::{asset, business_unit, business_unit_ops, domain, product_unit, tag, user_menus};

use crate::errors::ServiceError;
use crate::hierarchy;

pub async fn create_user_profile(
    db: &DatabaseConnection,
    new: NewUserProfile,
) -> Result<user_profile::Model, ServiceError> {
    business_unit::Entity::find_by_id(new.business_unit_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("business unit"))?;
    if let Some(leader_id) = new.leader_id {
        user_profile::Entity::find_by_id(leader_id)
            .one(db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("leader profile"))?;
    }
    Ok(user_profile::create(db, new).await?)
}

pub async fn get_profile(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<user_profile::Model, ServiceError> {
    user_profile::Entity::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("user profile"))
}

async fn leader_map(db: &DatabaseConnection) -> Result<HashMap<i64, Option<i64>>, ServiceError> {
    Ok(user_profile::Entity::find()
        .all(db)
        .await
        .map_err(ServiceError::db)?
        .into_iter()
        .map(|p| (p.id, p.leader_id))
        .collect())
}

/// Point a profile at a new leader, rejecting assignments that would make
/// anyone their own transitive leader.
pub async fn assign_leader(
    db: &DatabaseConnection,
    profile_id: i64,
    leader_id: Option<i64>,
) -> Result<user_profile::Model, ServiceError> {
    let profile = get_profile(db, profile_id).await?;
    if let Some(lid) = leader_id {
        user_profile::Entity::find_by_id(lid)
            .one(db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("leader profile"))?;
    }
    let parents = leader_map(db).await?;
    if hierarchy::would_cycle(profile_id, leader_id, &parents) {
        return Err(ServiceError::Model(ModelError::CycleDetected(format!(
            "profile {profile_id} cannot report to {leader_id:?}"
        ))));
    }
    let mut am: user_profile::ActiveModel = profile.into();
    am.leader_id = Set(leader_id);
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(ServiceError::db)
}

/// Walk the leader pointers from a profile to the top. A loop already present
/// in the data surfaces as `CycleDetected` rather than hanging.
pub async fn reporting_chain(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<user_profile::Model>, ServiceError> {
    get_profile(db, profile_id).await?;
    let parents = leader_map(db).await?;
    let ids = hierarchy::chain_from(profile_id, &parents).ok_or_else(|| {
        ServiceError::Model(ModelError::CycleDetected(format!(
            "leader chain from profile {profile_id} loops"
        )))
    })?;
    let rows = user_profile::Entity::find()
        .filter(user_profile::Column::Id.is_in(ids.clone()))
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    let by_id: HashMap<i64, user_profile::Model> = rows.into_iter().map(|p| (p.id, p)).collect();
    Ok(ids.into_iter().filter_map(|id| by_id.get(&id).cloned()).collect())
}

pub async fn direct_reports(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<user_profile::Model>, ServiceError> {
    user_profile::Entity::find()
        .filter(user_profile::Column::LeaderId.eq(profile_id))
        .order_by_asc(user_profile::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// Everyone below a profile in the leader hierarchy, breadth-first. A visited
/// set makes the walk safe against loops in existing data.
pub async fn transitive_reports(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Vec<user_profile::Model>, ServiceError> {
    get_profile(db, profile_id).await?;
    let all = user_profile::Entity::find().all(db).await.map_err(ServiceError::db)?;
    let mut children: HashMap<i64, Vec<&user_profile::Model>> = HashMap::new();
    for p in &all {
        if let Some(lid) = p.leader_id {
            children.entry(lid).or_default().push(p);
        }
    }
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([profile_id]);
    let mut out = Vec::new();
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        if let Some(kids) = children.get(&id) {
            for kid in kids {
                if !seen.contains(&kid.id) {
                    out.push((*kid).clone());
                    queue.push_back(kid.id);
                }
            }
        }
    }
    Ok(out)
}

/// Delete a profile. Every inbound reference protects the row: assets it
/// administers or proposed, tags it created, permission overlays, direct
/// reports, and ops-contact links.
pub async fn delete_user_profile(db: &DatabaseConnection, profile_id: i64) -> Result<(), ServiceError> {
    get_profile(db, profile_id).await?;

    let admin_refs = asset::Entity::find()
        .filter(asset::Column::AdminId.eq(profile_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    let proposer_refs = asset::Entity::find()
        .filter(asset::Column::ProposerId.eq(profile_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    if admin_refs + proposer_refs > 0 {
        return Err(ServiceError::Model(ModelError::ReferentialIntegrity(format!(
            "profile {profile_id} is referenced by {} assets",
            admin_refs + proposer_refs
        ))));
    }
    let tag_refs = tag::Entity::find()
        .filter(tag::Column::CreatorId.eq(profile_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    if tag_refs > 0 {
        return Err(ServiceError::Model(ModelError::ReferentialIntegrity(format!(
            "profile {profile_id} created {tag_refs} tags"
        ))));
    }
    let overlay_refs = user_menus::Entity::find()
        .filter(user_menus::Column::UserProfileId.eq(profile_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    if overlay_refs > 0 {
        return Err(ServiceError::Model(ModelError::ReferentialIntegrity(format!(
            "profile {profile_id} holds {overlay_refs} permission overlays"
        ))));
    }
    let report_refs = user_profile::Entity::find()
        .filter(user_profile::Column::LeaderId.eq(profile_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    if report_refs > 0 {
        return Err(ServiceError::Model(ModelError::ReferentialIntegrity(format!(
            "profile {profile_id} leads {report_refs} profiles"
        ))));
    }
    let ops_refs = business_unit_ops::Entity::find()
        .filter(business_unit_ops::Column::UserProfileId.eq(profile_id))
        .count(db)
        .await
        .map_err(ServiceError::db)?;
    if ops_refs > 0 {
        return Err(ServiceError::Model(ModelError::ReferentialIntegrity(format!(
            "profile {profile_id} is an ops contact for {ops_refs} business units"
        ))));
    }

    user_profile::Entity::delete_by_id(profile_id)
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    info!(profile_id, "user profile deleted");
    Ok(())
}

/// Link a profile as an ops contact of a business unit. Idempotent on repeat.
pub async fn add_ops_contact(
    db: &DatabaseConnection,
    business_unit_id: i64,
    user_profile_id: i64,
) -> Result<(), ServiceError> {
    business_unit::Entity::find_by_id(business_unit_id)
        .one(db)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::not_found("business unit"))?;
    get_profile(db, user_profile_id).await?;
    let existing = business_unit_ops::Entity::find_by_id((business_unit_id, user_profile_id))
        .one(db)
        .await
        .map_err(ServiceError::db)?;
    if existing.is_some() {
        return Ok(());
    }
    let am = business_unit_ops::ActiveModel {
        business_unit_id: Set(business_unit_id),
        user_profile_id: Set(user_profile_id),
    };
    am.insert(db).await.map_err(ServiceError::db)?;
    Ok(())
}

pub async fn remove_ops_contact(
    db: &DatabaseConnection,
    business_unit_id: i64,
    user_profile_id: i64,
) -> Result<(), ServiceError> {
    business_unit_ops::Entity::delete_by_id((business_unit_id, user_profile_id))
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(())
}

pub async fn ops_contacts_of(
    db: &DatabaseConnection,
    business_unit_id: i64,
) -> Result<Vec<user_profile::Model>, ServiceError> {
    let links = business_unit_ops::Entity::find()
        .filter(business_unit_ops::Column::BusinessUnitId.eq(business_unit_id))
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    let ids: Vec<i64> = links.into_iter().map(|l| l.user_profile_id).collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    user_profile::Entity::find()
        .filter(user_profile::Column::Id.is_in(ids))
        .order_by_asc(user_profile::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

pub async fn product_units_of(
    db: &DatabaseConnection,
    business_unit_id: i64,
) -> Result<Vec<product_unit::Model>, ServiceError> {
    product_unit::Entity::find()
        .filter(product_unit::Column::BusinessUnitId.eq(business_unit_id))
        .order_by_asc(product_unit::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

pub async fn domains_of(
    db: &DatabaseConnection,
    business_unit_id: i64,
) -> Result<Vec<domain::Model>, ServiceError> {
    domain::Entity::find()
        .filter(domain::Column::BusinessUnitId.eq(business_unit_id))
        .order_by_asc(domain::Column::Id)
        .all(db)
        .await
        .map_err(ServiceError::db)
}
