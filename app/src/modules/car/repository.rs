use crate::database::{error::DbError, filters::icontains};
use entity::{car, car_driver, driver, manufacturer};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, SelectTwo, Set, TransactionTrait,
};

/// Cars ordered by id along with their manufacturer, filtered by a case insensitive model search
pub fn search(model: Option<&str>) -> SelectTwo<car::Entity, manufacturer::Entity> {
    let mut query = car::Entity::find();

    if let Some(model) = model {
        query = query.filter(icontains(car::Column::Model, model));
    }

    query
        .order_by_asc(car::Column::Id)
        .find_also_related(manufacturer::Entity)
}

fn car_not_found(id: i32) -> DbError {
    DbError(DbErr::RecordNotFound(format!("car {}", id)))
}

pub async fn find_by_id(conn: &DatabaseConnection, id: i32) -> Result<car::Model, DbError> {
    car::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| car_not_found(id))
}

pub async fn find_with_manufacturer(
    conn: &DatabaseConnection,
    id: i32,
) -> Result<(car::Model, Option<manufacturer::Model>), DbError> {
    car::Entity::find_by_id(id)
        .find_also_related(manufacturer::Entity)
        .one(conn)
        .await?
        .ok_or_else(|| car_not_found(id))
}

/// drivers assigned to the car, ordered by id
pub async fn drivers_of(
    conn: &DatabaseConnection,
    car: &car::Model,
) -> Result<Vec<driver::Model>, DbError> {
    Ok(car
        .find_related(driver::Entity)
        .order_by_asc(driver::Column::Id)
        .all(conn)
        .await?)
}

pub async fn driver_ids_of(conn: &DatabaseConnection, car_id: i32) -> Result<Vec<i32>, DbError> {
    Ok(car_driver::Entity::find()
        .filter(car_driver::Column::CarId.eq(car_id))
        .select_only()
        .column(car_driver::Column::DriverId)
        .order_by_asc(car_driver::Column::DriverId)
        .into_tuple::<i32>()
        .all(conn)
        .await?)
}

async fn insert_assignments<C: ConnectionTrait>(
    conn: &C,
    car_id: i32,
    driver_ids: &[i32],
) -> Result<(), DbErr> {
    if driver_ids.is_empty() {
        return Ok(());
    }

    let assignments = driver_ids.iter().map(|driver_id| car_driver::ActiveModel {
        car_id: Set(car_id),
        driver_id: Set(*driver_id),
    });

    car_driver::Entity::insert_many(assignments)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

/// Creates a car and assigns the drivers to it
pub async fn create_car(
    conn: &DatabaseConnection,
    model: &str,
    manufacturer_id: i32,
    driver_ids: &[i32],
) -> Result<car::Model, DbError> {
    let txn = conn.begin().await?;

    let car = car::ActiveModel {
        model: Set(model.to_owned()),
        manufacturer_id: Set(manufacturer_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    insert_assignments(&txn, car.id, driver_ids).await?;

    txn.commit().await?;

    Ok(car)
}

/// Updates a car, replacing its drivers with `driver_ids`
pub async fn update_car(
    conn: &DatabaseConnection,
    id: i32,
    model: &str,
    manufacturer_id: i32,
    driver_ids: &[i32],
) -> Result<car::Model, DbError> {
    let txn = conn.begin().await?;

    let car = car::ActiveModel {
        id: Set(id),
        model: Set(model.to_owned()),
        manufacturer_id: Set(manufacturer_id),
    }
    .update(&txn)
    .await?;

    car_driver::Entity::delete_many()
        .filter(car_driver::Column::CarId.eq(id))
        .exec(&txn)
        .await?;

    insert_assignments(&txn, id, driver_ids).await?;

    txn.commit().await?;

    Ok(car)
}

/// Deletes a car and its driver assignments, the drivers are kept
pub async fn delete_car(conn: &DatabaseConnection, id: i32) -> Result<(), DbError> {
    let txn = conn.begin().await?;

    car_driver::Entity::delete_many()
        .filter(car_driver::Column::CarId.eq(id))
        .exec(&txn)
        .await?;

    let deleted = car::Entity::delete_by_id(id).exec(&txn).await?;

    if deleted.rows_affected == 0 {
        txn.rollback().await?;
        return Err(car_not_found(id));
    }

    txn.commit().await?;

    Ok(())
}

/// Assigns the driver to the car or removes the assignment if it exists,
/// returns if the driver is assigned after the toggle
pub async fn toggle_assignment(
    conn: &DatabaseConnection,
    car_id: i32,
    driver_id: i32,
) -> Result<bool, DbError> {
    let txn = conn.begin().await?;

    let existing = car_driver::Entity::find_by_id((car_id, driver_id))
        .one(&txn)
        .await?;

    let assigned = match existing {
        Some(assignment) => {
            assignment.delete(&txn).await?;
            false
        }
        None => {
            insert_assignments(&txn, car_id, &[driver_id]).await?;
            true
        }
    };

    txn.commit().await?;

    Ok(assigned)
}
