use crate::modules::common::responses::internal_error_res;
use crate::modules::common::responses::SimpleError;
use axum::response::Html;
use handlebars::{Handlebars, TemplateError};
use http::StatusCode;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

pub const INDEX: &str = "taxi/index.html";
pub const LOGIN: &str = "registration/login.html";

pub const MANUFACTURER_LIST: &str = "taxi/manufacturer_list.html";
pub const MANUFACTURER_FORM: &str = "taxi/manufacturer_form.html";
pub const MANUFACTURER_CONFIRM_DELETE: &str = "taxi/manufacturer_confirm_delete.html";

pub const CAR_LIST: &str = "taxi/car_list.html";
pub const CAR_DETAIL: &str = "taxi/car_detail.html";
pub const CAR_FORM: &str = "taxi/car_form.html";
pub const CAR_CONFIRM_DELETE: &str = "taxi/car_confirm_delete.html";

pub const DRIVER_LIST: &str = "taxi/driver_list.html";
pub const DRIVER_DETAIL: &str = "taxi/driver_detail.html";
pub const DRIVER_FORM: &str = "taxi/driver_form.html";
pub const DRIVER_CONFIRM_DELETE: &str = "taxi/driver_confirm_delete.html";

/// partials shared by the pages, pages wrap their content with `{{#> layout}}`
const PARTIALS: [(&str, &str); 3] = [
    ("layout", include_str!("../../templates/layout.hbs")),
    ("pagination", include_str!("../../templates/pagination.hbs")),
    ("field_errors", include_str!("../../templates/field_errors.hbs")),
];

const PAGES: [(&str, &str); 13] = [
    (INDEX, include_str!("../../templates/taxi/index.hbs")),
    (LOGIN, include_str!("../../templates/registration/login.hbs")),
    (
        MANUFACTURER_LIST,
        include_str!("../../templates/taxi/manufacturer_list.hbs"),
    ),
    (
        MANUFACTURER_FORM,
        include_str!("../../templates/taxi/manufacturer_form.hbs"),
    ),
    (
        MANUFACTURER_CONFIRM_DELETE,
        include_str!("../../templates/taxi/manufacturer_confirm_delete.hbs"),
    ),
    (CAR_LIST, include_str!("../../templates/taxi/car_list.hbs")),
    (CAR_DETAIL, include_str!("../../templates/taxi/car_detail.hbs")),
    (CAR_FORM, include_str!("../../templates/taxi/car_form.hbs")),
    (
        CAR_CONFIRM_DELETE,
        include_str!("../../templates/taxi/car_confirm_delete.hbs"),
    ),
    (DRIVER_LIST, include_str!("../../templates/taxi/driver_list.hbs")),
    (
        DRIVER_DETAIL,
        include_str!("../../templates/taxi/driver_detail.hbs"),
    ),
    (DRIVER_FORM, include_str!("../../templates/taxi/driver_form.hbs")),
    (
        DRIVER_CONFIRM_DELETE,
        include_str!("../../templates/taxi/driver_confirm_delete.hbs"),
    ),
];

/// Read only registry of the compiled page templates, cheap to clone
#[derive(Clone)]
pub struct Templates(Arc<Handlebars<'static>>);

impl Templates {
    /// compiles every page and partial, failing on the first template with a syntax error
    pub fn new() -> Result<Self, TemplateError> {
        let mut reg = Handlebars::new();

        for (name, source) in PARTIALS {
            reg.register_partial(name, source)?;
        }

        for (name, source) in PAGES {
            reg.register_template_string(name, source)?;
        }

        Ok(Templates(Arc::new(reg)))
    }

    /// renders a page, render failures are logged and answered with a internal error
    pub fn render<T: Serialize>(
        &self,
        name: &str,
        ctx: &T,
    ) -> Result<Html<String>, (StatusCode, SimpleError)> {
        self.0.render(name, ctx).map(Html).map_err(|e| {
            error!("[WEB] failed to render template {}: {}", name, e);
            internal_error_res()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compiles_every_template() {
        let templates = Templates::new().unwrap();

        for (name, _) in PAGES {
            assert!(templates.0.has_template(name), "{} missing", name);
        }
    }

    #[test]
    fn escapes_values() {
        let templates = Templates::new().unwrap();

        let html = templates
            .render(
                LOGIN,
                &json!({ "form": { "username": "<b>bob</b>" }, "next": "/" }),
            )
            .unwrap();

        assert!(html.0.contains("&lt;b&gt;bob&lt;/b&gt;"));
        assert!(!html.0.contains("<b>bob</b>"));
    }
}
