use sea_orm::entity::prelude::*;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "car")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub model: String,
    pub manufacturer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Manufacturer,
    #[sea_orm(has_many = "super::car_driver::Entity")]
    CarDriver,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::car_driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarDriver.def()
    }
}

/// the drivers assigned to a car, through the `car_drivers` table
impl Related<super::driver::Entity> for Entity {
    fn to() -> RelationDef {
        super::car_driver::Relation::Driver.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::car_driver::Relation::Car.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// path of the car detail page
    pub fn get_absolute_url(&self) -> String {
        format!("/cars/{}/", self.id)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_model() {
        let car = Model {
            id: 3,
            model: String::from("test_model"),
            manufacturer_id: 1,
        };

        assert_eq!(car.to_string(), "test_model");
        assert_eq!(car.get_absolute_url(), "/cars/3/");
    }
}
