use crate::database::pagination::PageMeta;
use crate::modules::common::{
    dto::NavUser,
    forms::{trimmed, FormErrors},
    validators::{validate_required, validate_required_license_number, validate_username},
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use validator::Validate;

// --- INPUT

#[serde_as]
#[derive(Deserialize, Validate, Debug, Default)]
pub struct DriverSearch {
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(length(max = 200))]
    pub username: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub page: Option<String>,
}

#[derive(Deserialize, Serialize, Validate, Debug, Default, Clone)]
pub struct DriverCreationForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom = "validate_username")]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub username: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom = "validate_required_license_number")]
    pub license_number: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: String,

    #[serde(default, skip_serializing)]
    #[validate(custom = "validate_required")]
    pub password1: String,

    #[serde(default, skip_serializing)]
    #[validate(custom = "validate_required")]
    pub password2: String,
}

#[derive(Deserialize, Serialize, Validate, Debug, Default, Clone)]
pub struct DriverUpdateForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom = "validate_username")]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub username: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom = "validate_required_license_number")]
    pub license_number: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: String,
}

impl From<&entity::driver::Model> for DriverUpdateForm {
    fn from(d: &entity::driver::Model) -> Self {
        DriverUpdateForm {
            username: d.username.clone(),
            license_number: d.license_number.clone().unwrap_or_default(),
            first_name: d.first_name.clone(),
            last_name: d.last_name.clone(),
        }
    }
}

/// The fields both driver forms share, as stored on the database
pub struct DriverFields<'a> {
    pub username: &'a str,
    pub license_number: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

impl<'a> From<&'a DriverCreationForm> for DriverFields<'a> {
    fn from(f: &'a DriverCreationForm) -> Self {
        DriverFields {
            username: &f.username,
            license_number: &f.license_number,
            first_name: &f.first_name,
            last_name: &f.last_name,
        }
    }
}

impl<'a> From<&'a DriverUpdateForm> for DriverFields<'a> {
    fn from(f: &'a DriverUpdateForm) -> Self {
        DriverFields {
            username: &f.username,
            license_number: &f.license_number,
            first_name: &f.first_name,
            last_name: &f.last_name,
        }
    }
}

// --- OUTPUT

#[derive(Serialize, Debug, Clone)]
pub struct DriverDto {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: Option<String>,
    pub url: String,

    /// `"{username} ({first_name} {last_name})"`
    pub display: String,
}

impl From<entity::driver::Model> for DriverDto {
    fn from(d: entity::driver::Model) -> Self {
        DriverDto {
            display: d.to_string(),
            url: d.get_absolute_url(),
            id: d.id,
            username: d.username,
            first_name: d.first_name,
            last_name: d.last_name,
            license_number: d.license_number,
        }
    }
}

/// a car as listed on the driver detail page
#[derive(Serialize, Debug, Clone)]
pub struct DriverCarDto {
    pub id: i32,
    pub model: String,
    pub manufacturer_name: String,
    pub url: String,
}

impl From<(entity::car::Model, Option<entity::manufacturer::Model>)> for DriverCarDto {
    fn from((car, manufacturer): (entity::car::Model, Option<entity::manufacturer::Model>)) -> Self {
        DriverCarDto {
            url: car.get_absolute_url(),
            id: car.id,
            model: car.model,
            manufacturer_name: manufacturer.map(|m| m.name).unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DriverListPage {
    pub user: NavUser,
    pub driver_list: Vec<DriverDto>,
    pub page_obj: PageMeta,
    pub is_paginated: bool,
    pub search: Option<String>,
    pub search_placeholder: &'static str,
    pub query_suffix: String,
}

#[derive(Serialize, Debug)]
pub struct DriverDetailPage {
    pub user: NavUser,
    pub driver: DriverDto,
    pub cars: Vec<DriverCarDto>,
}

/// Page of both driver forms, the password inputs are only rendered on creation
#[derive(Serialize, Debug)]
pub struct DriverFormPage<'a, F: Serialize> {
    pub user: NavUser,
    pub form: &'a F,
    pub errors: &'a FormErrors,
    pub is_creation: bool,
    pub object: Option<DriverDto>,
}

#[derive(Serialize, Debug)]
pub struct DriverConfirmDeletePage {
    pub user: NavUser,
    pub object: DriverDto,
}

pub const SEARCH_PLACEHOLDER: &str = "search by username";
