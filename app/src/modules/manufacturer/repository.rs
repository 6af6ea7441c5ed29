use super::dto::ManufacturerForm;
use crate::database::{error::DbError, filters::icontains};
use crate::modules::common::dto::Choice;
use entity::{car, car_driver, manufacturer};
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

/// Manufacturers ordered by name, filtered by a case insensitive name search
pub fn search(name: Option<&str>) -> Select<manufacturer::Entity> {
    let mut query = manufacturer::Entity::find();

    if let Some(name) = name {
        query = query.filter(icontains(manufacturer::Column::Name, name));
    }

    query.order_by_asc(manufacturer::Column::Name)
}

pub async fn find_by_id(conn: &DatabaseConnection, id: i32) -> Result<manufacturer::Model, DbError> {
    manufacturer::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DbError(DbErr::RecordNotFound(format!("manufacturer {}", id))))
}

/// checks if the name is taken by a manufacturer other than `exclude_id`
pub async fn name_in_use(
    conn: &DatabaseConnection,
    name: &str,
    exclude_id: Option<i32>,
) -> Result<bool, DbError> {
    let mut query = manufacturer::Entity::find().filter(manufacturer::Column::Name.eq(name));

    if let Some(id) = exclude_id {
        query = query.filter(manufacturer::Column::Id.ne(id));
    }

    Ok(query.count(conn).await? > 0)
}

pub async fn create_manufacturer(
    conn: &DatabaseConnection,
    form: &ManufacturerForm,
) -> Result<manufacturer::Model, DbError> {
    let manufacturer = manufacturer::ActiveModel {
        name: Set(form.name.clone()),
        country: Set(form.country.clone()),
        ..Default::default()
    };

    Ok(manufacturer.insert(conn).await?)
}

pub async fn update_manufacturer(
    conn: &DatabaseConnection,
    id: i32,
    form: &ManufacturerForm,
) -> Result<manufacturer::Model, DbError> {
    let manufacturer = manufacturer::ActiveModel {
        id: Set(id),
        name: Set(form.name.clone()),
        country: Set(form.country.clone()),
    };

    Ok(manufacturer.update(conn).await?)
}

/// amount of cars made by the manufacturer
pub async fn count_cars(conn: &DatabaseConnection, id: i32) -> Result<u64, DbError> {
    Ok(car::Entity::find()
        .filter(car::Column::ManufacturerId.eq(id))
        .count(conn)
        .await?)
}

/// Deletes a manufacturer along with its cars and their driver assignments
pub async fn delete_manufacturer(conn: &DatabaseConnection, id: i32) -> Result<(), DbError> {
    let txn = conn.begin().await?;

    car_driver::Entity::delete_many()
        .filter(
            car_driver::Column::CarId.in_subquery(
                Query::select()
                    .column(car::Column::Id)
                    .from(car::Entity)
                    .and_where(car::Column::ManufacturerId.eq(id))
                    .to_owned(),
            ),
        )
        .exec(&txn)
        .await?;

    car::Entity::delete_many()
        .filter(car::Column::ManufacturerId.eq(id))
        .exec(&txn)
        .await?;

    let deleted = manufacturer::Entity::delete_by_id(id).exec(&txn).await?;

    if deleted.rows_affected == 0 {
        txn.rollback().await?;
        return Err(DbError(DbErr::RecordNotFound(format!("manufacturer {}", id))));
    }

    txn.commit().await?;

    Ok(())
}

/// Every manufacturer as a select option, in display order
pub async fn choices(
    conn: &DatabaseConnection,
    selected: Option<i32>,
) -> Result<Vec<Choice>, DbError> {
    let manufacturers = manufacturer::Entity::find()
        .order_by_asc(manufacturer::Column::Name)
        .all(conn)
        .await?;

    Ok(manufacturers
        .into_iter()
        .map(|m| Choice {
            value: m.id,
            selected: selected == Some(m.id),
            label: m.to_string(),
        })
        .collect())
}

/// checks a manufacturer exists, used to validate choice fields
pub async fn exists(conn: &DatabaseConnection, id: i32) -> Result<bool, DbError> {
    Ok(manufacturer::Entity::find()
        .filter(manufacturer::Column::Id.eq(id))
        .select_only()
        .column(manufacturer::Column::Id)
        .into_tuple::<i32>()
        .one(conn)
        .await?
        .is_some())
}
