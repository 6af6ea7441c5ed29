use crate::database::pagination::PageMeta;
use crate::modules::common::{
    dto::{Choice, NavUser},
    forms::{trimmed, FormErrors},
    validators::validate_required,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use validator::Validate;

// --- INPUT

#[serde_as]
#[derive(Deserialize, Validate, Debug, Default)]
pub struct CarSearch {
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(length(max = 200))]
    pub model: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub page: Option<String>,
}

/// Car creation and update form, `manufacturer` is a select and `drivers`
/// a list of checkboxes, both posting record ids
#[serde_as]
#[derive(Deserialize, Serialize, Validate, Debug, Default, Clone)]
pub struct CarForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom = "validate_required")]
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub model: String,

    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(required(message = "This field is required."))]
    pub manufacturer: Option<String>,

    #[serde(default)]
    pub drivers: Vec<String>,
}

impl CarForm {
    pub fn from_model(car: &entity::car::Model, driver_ids: &[i32]) -> Self {
        CarForm {
            model: car.model.clone(),
            manufacturer: Some(car.manufacturer_id.to_string()),
            drivers: driver_ids.iter().map(i32::to_string).collect(),
        }
    }

    /// the selected manufacturer id, if it is a integer
    pub fn manufacturer_id(&self) -> Option<i32> {
        self.manufacturer.as_deref().and_then(parse_id)
    }

    /// the selected driver ids that are integers, ignoring repetitions
    pub fn driver_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.drivers.iter().filter_map(|d| parse_id(d)).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// parses a record id posted by a choice field
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
}

// --- OUTPUT

#[derive(Serialize, Debug, Clone)]
pub struct CarDto {
    pub id: i32,
    pub model: String,
    pub url: String,
    pub manufacturer_name: String,
    pub manufacturer_country: String,
}

impl From<(entity::car::Model, Option<entity::manufacturer::Model>)> for CarDto {
    fn from((car, manufacturer): (entity::car::Model, Option<entity::manufacturer::Model>)) -> Self {
        let (manufacturer_name, manufacturer_country) = manufacturer
            .map(|m| (m.name, m.country))
            .unwrap_or_default();

        CarDto {
            url: car.get_absolute_url(),
            id: car.id,
            model: car.model,
            manufacturer_name,
            manufacturer_country,
        }
    }
}

/// a driver as listed on the car detail page
#[derive(Serialize, Debug, Clone)]
pub struct CarDriverDto {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub url: String,
}

impl From<entity::driver::Model> for CarDriverDto {
    fn from(d: entity::driver::Model) -> Self {
        CarDriverDto {
            url: d.get_absolute_url(),
            id: d.id,
            username: d.username,
            first_name: d.first_name,
            last_name: d.last_name,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CarListPage {
    pub user: NavUser,
    pub car_list: Vec<CarDto>,
    pub page_obj: PageMeta,
    pub is_paginated: bool,
    pub search: Option<String>,
    pub search_placeholder: &'static str,
    pub query_suffix: String,
}

#[derive(Serialize, Debug)]
pub struct CarDetailPage {
    pub user: NavUser,
    pub car: CarDto,
    pub drivers: Vec<CarDriverDto>,

    /// if the signed in driver is assigned to the car
    pub is_assigned: bool,
}

#[derive(Serialize, Debug)]
pub struct CarFormPage<'a> {
    pub user: NavUser,
    pub form: &'a CarForm,
    pub errors: &'a FormErrors,
    pub manufacturer_choices: Vec<Choice>,
    pub driver_choices: Vec<Choice>,
    pub object: Option<CarDto>,
}

#[derive(Serialize, Debug)]
pub struct CarConfirmDeletePage {
    pub user: NavUser,
    pub object: CarDto,
}

pub const SEARCH_PLACEHOLDER: &str = "Search by model";
