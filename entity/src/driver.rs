use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use std::fmt;

/// Human readable name of the entity
pub const VERBOSE_NAME: &str = "driver";

/// Human readable plural name of the entity
pub const VERBOSE_NAME_PLURAL: &str = "drivers";

/// A user of the system, every signed in user is a driver that might
/// be assigned to any number of cars.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "driver")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub date_joined: DateTime<Utc>,

    pub last_login: Option<DateTime<Utc>>,

    #[sea_orm(unique)]
    pub username: String,

    /// bcrypt hash of the driver password
    pub password: String,

    pub first_name: String,

    pub last_name: String,

    /// nullable so drivers created without a license do not
    /// conflict with each other on the unique constraint
    #[sea_orm(unique)]
    pub license_number: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::car_driver::Entity")]
    CarDriver,
    #[sea_orm(has_many = "super::session::Entity")]
    Session,
}

impl Related<super::car_driver::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarDriver.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

/// the cars a driver is assigned to
impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        super::car_driver::Relation::Car.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::car_driver::Relation::Driver.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// path of the driver detail page
    pub fn get_absolute_url(&self) -> String {
        format!("/drivers/{}/", self.id)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.username, self.first_name, self.last_name
        )
    }
}
