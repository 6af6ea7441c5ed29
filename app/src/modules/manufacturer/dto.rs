use crate::database::pagination::PageMeta;
use crate::modules::common::{
    dto::NavUser,
    forms::{trimmed, FormErrors},
    validators::validate_required,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use validator::Validate;

// --- INPUT

#[serde_as]
#[derive(Deserialize, Validate, Debug, Default)]
pub struct ManufacturerSearch {
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub page: Option<String>,
}

#[derive(Deserialize, Serialize, Validate, Debug, Default, Clone)]
pub struct ManufacturerForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom = "validate_required")]
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub country: String,
}

impl From<&entity::manufacturer::Model> for ManufacturerForm {
    fn from(m: &entity::manufacturer::Model) -> Self {
        ManufacturerForm {
            name: m.name.clone(),
            country: m.country.clone(),
        }
    }
}

// --- OUTPUT

#[derive(Serialize, Debug, Clone)]
pub struct ManufacturerDto {
    pub id: i32,
    pub name: String,
    pub country: String,

    /// `"{name} {country}"`
    pub display: String,
}

impl From<entity::manufacturer::Model> for ManufacturerDto {
    fn from(m: entity::manufacturer::Model) -> Self {
        ManufacturerDto {
            display: m.to_string(),
            id: m.id,
            name: m.name,
            country: m.country,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ManufacturerListPage {
    pub user: NavUser,
    pub manufacturer_list: Vec<ManufacturerDto>,
    pub page_obj: PageMeta,
    pub is_paginated: bool,
    pub search: Option<String>,
    pub search_placeholder: &'static str,

    /// appended to the pagination links to keep the search
    pub query_suffix: String,
}

#[derive(Serialize, Debug)]
pub struct ManufacturerFormPage<'a> {
    pub user: NavUser,
    pub form: &'a ManufacturerForm,
    pub errors: &'a FormErrors,

    /// the manufacturer being updated, `None` on creation
    pub object: Option<ManufacturerDto>,
}

#[derive(Serialize, Debug)]
pub struct ManufacturerConfirmDeletePage {
    pub user: NavUser,
    pub object: ManufacturerDto,

    /// cars deleted along with the manufacturer
    pub num_cars: u64,
}

pub const SEARCH_PLACEHOLDER: &str = "Search by manufacturer";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required_and_bounded() {
        let form = ManufacturerForm::default();
        let errors = FormErrors::from(form.validate().unwrap_err());
        assert_eq!(errors.first("name"), Some("This field is required."));
        assert!(errors.field("country").is_empty());

        let form = ManufacturerForm {
            name: "a".repeat(256),
            country: "b".repeat(256),
        };
        let errors = FormErrors::from(form.validate().unwrap_err());
        assert_eq!(
            errors.first("name"),
            Some("Ensure this value has at most 255 characters.")
        );
        assert_eq!(
            errors.first("country"),
            Some("Ensure this value has at most 255 characters.")
        );
    }

    #[test]
    fn country_may_be_empty() {
        let form = ManufacturerForm {
            name: String::from("Lincoln"),
            country: String::new(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn search_rejects_long_queries() {
        let search = ManufacturerSearch {
            name: Some("x".repeat(201)),
            page: None,
        };
        assert!(search.validate().is_err());
    }
}
