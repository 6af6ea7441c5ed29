use serde::Serialize;
use url::form_urlencoded::byte_serialize;

/// Minimal description of the signed in driver, present in every page
/// context to render the navigation bar
#[derive(Serialize, Debug, Clone)]
pub struct NavUser {
    pub id: i32,
    pub username: String,
    pub url: String,
}

impl From<&entity::driver::Model> for NavUser {
    fn from(driver: &entity::driver::Model) -> Self {
        NavUser {
            id: driver.id,
            username: driver.username.clone(),
            url: driver.get_absolute_url(),
        }
    }
}

/// A `<option>` / checkbox entry of a choice field
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: i32,
    pub label: String,
    pub selected: bool,
}

/// Builds the query string suffix used by pagination links so they keep the
/// active search, eg: `&name=dod`
pub fn search_query_suffix(field: &str, value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => {
            let encoded: String = byte_serialize(v.as_bytes()).collect();
            format!("&{}={}", field, encoded)
        }
        _ => String::new(),
    }
}
