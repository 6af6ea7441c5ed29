use super::dto::DriverFields;
use crate::database::{error::DbError, filters::icontains};
use crate::modules::common::dto::Choice;
use chrono::Utc;
use entity::{car, car_driver, driver, manufacturer, session};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

/// Drivers ordered by id, filtered by a case insensitive username search
pub fn search(username: Option<&str>) -> Select<driver::Entity> {
    let mut query = driver::Entity::find();

    if let Some(username) = username {
        query = query.filter(icontains(driver::Column::Username, username));
    }

    query.order_by_asc(driver::Column::Id)
}

fn driver_not_found(id: i32) -> DbError {
    DbError(DbErr::RecordNotFound(format!("driver {}", id)))
}

pub async fn find_by_id(conn: &DatabaseConnection, id: i32) -> Result<driver::Model, DbError> {
    driver::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| driver_not_found(id))
}

/// cars the driver is assigned to along with their manufacturer, ordered by id
pub async fn cars_of(
    conn: &DatabaseConnection,
    driver: &driver::Model,
) -> Result<Vec<(car::Model, Option<manufacturer::Model>)>, DbError> {
    Ok(driver
        .find_related(car::Entity)
        .order_by_asc(car::Column::Id)
        .find_also_related(manufacturer::Entity)
        .all(conn)
        .await?)
}

/// checks if the username is taken by a driver other than `exclude_id`
pub async fn username_in_use(
    conn: &DatabaseConnection,
    username: &str,
    exclude_id: Option<i32>,
) -> Result<bool, DbError> {
    let mut query = driver::Entity::find().filter(driver::Column::Username.eq(username));

    if let Some(id) = exclude_id {
        query = query.filter(driver::Column::Id.ne(id));
    }

    Ok(query.count(conn).await? > 0)
}

/// checks if the license number is taken by a driver other than `exclude_id`
pub async fn license_number_in_use(
    conn: &DatabaseConnection,
    license_number: &str,
    exclude_id: Option<i32>,
) -> Result<bool, DbError> {
    let mut query =
        driver::Entity::find().filter(driver::Column::LicenseNumber.eq(license_number));

    if let Some(id) = exclude_id {
        query = query.filter(driver::Column::Id.ne(id));
    }

    Ok(query.count(conn).await? > 0)
}

pub async fn create_driver(
    conn: &DatabaseConnection,
    fields: &DriverFields<'_>,
    password_hash: String,
) -> Result<driver::Model, DbError> {
    let driver = driver::ActiveModel {
        date_joined: Set(Utc::now()),
        last_login: Set(None),
        username: Set(fields.username.to_owned()),
        password: Set(password_hash),
        first_name: Set(fields.first_name.to_owned()),
        last_name: Set(fields.last_name.to_owned()),
        license_number: Set(Some(fields.license_number.to_owned())),
        ..Default::default()
    };

    Ok(driver.insert(conn).await?)
}

pub async fn update_driver(
    conn: &DatabaseConnection,
    id: i32,
    fields: &DriverFields<'_>,
) -> Result<driver::Model, DbError> {
    let driver = driver::ActiveModel {
        id: Set(id),
        username: Set(fields.username.to_owned()),
        first_name: Set(fields.first_name.to_owned()),
        last_name: Set(fields.last_name.to_owned()),
        license_number: Set(Some(fields.license_number.to_owned())),
        ..Default::default()
    };

    Ok(driver.update(conn).await?)
}

/// Deletes a driver with its sessions and car assignments, the cars are kept
pub async fn delete_driver(conn: &DatabaseConnection, id: i32) -> Result<(), DbError> {
    let txn = conn.begin().await?;

    car_driver::Entity::delete_many()
        .filter(car_driver::Column::DriverId.eq(id))
        .exec(&txn)
        .await?;

    session::Entity::delete_many()
        .filter(session::Column::DriverId.eq(id))
        .exec(&txn)
        .await?;

    let deleted = driver::Entity::delete_by_id(id).exec(&txn).await?;

    if deleted.rows_affected == 0 {
        txn.rollback().await?;
        return Err(driver_not_found(id));
    }

    txn.commit().await?;

    Ok(())
}

/// Every driver as a checkbox option, ordered by id
pub async fn choices(
    conn: &DatabaseConnection,
    selected: &[i32],
) -> Result<Vec<Choice>, DbError> {
    let drivers = driver::Entity::find()
        .order_by_asc(driver::Column::Id)
        .all(conn)
        .await?;

    Ok(drivers
        .into_iter()
        .map(|d| Choice {
            value: d.id,
            selected: selected.contains(&d.id),
            label: d.to_string(),
        })
        .collect())
}

/// the ids among `ids` that belong to a driver
pub async fn existing_ids(conn: &DatabaseConnection, ids: &[i32]) -> Result<Vec<i32>, DbError> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    Ok(driver::Entity::find()
        .filter(driver::Column::Id.is_in(ids.iter().copied()))
        .select_only()
        .column(driver::Column::Id)
        .into_tuple::<i32>()
        .all(conn)
        .await?)
}
