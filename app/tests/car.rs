mod common;

use common::{body_text, location, TestApp};
use entity::{car, car_driver, driver};
use http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

/// cars listed on a car list page
fn car_count(html: &str) -> usize {
    html.matches(r#"<li><a href="/cars/"#).count()
}

async fn assigned_drivers(app: &TestApp, car_id: i32) -> Vec<i32> {
    let mut ids: Vec<i32> = car_driver::Entity::find()
        .filter(car_driver::Column::CarId.eq(car_id))
        .all(&app.db)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.driver_id)
        .collect();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn eleven_cars_are_listed_in_three_pages() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;

    for i in 0..11 {
        app.create_car(&format!("Model {}", i), lincoln.id).await;
    }

    let mut sizes = vec![];
    for page in 1..=3 {
        let uri = format!("/cars/?page={}", page);
        sizes.push(car_count(&body_text(app.get(&uri, Some(&cookie)).await).await));
    }
    assert_eq!(sizes, vec![5, 5, 1]);

    let res = app.get("/cars/?page=0", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_filters_by_model() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;

    app.create_car("Navigator", lincoln.id).await;
    app.create_car("Continental", lincoln.id).await;

    let html = body_text(app.get("/cars/?model=NAVI", Some(&cookie)).await).await;

    assert_eq!(car_count(&html), 1);
    assert!(html.contains("Navigator (Lincoln)"));
    assert!(html.contains("placeholder=\"Search by model\""));
}

#[tokio::test]
async fn create_assigns_the_selected_drivers() {
    let app = TestApp::new().await;
    let (admin, cookie) = app.signed_in().await;
    let joe = app.create_driver("joe", "JOE00001").await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;

    let body = format!(
        "model=Navigator&manufacturer={}&drivers={}&drivers={}",
        lincoln.id, admin.id, joe.id
    );
    let res = app.post_form("/cars/create/", &body, Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/cars/");

    let created = car::Entity::find()
        .filter(car::Column::Model.eq("Navigator"))
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.manufacturer_id, lincoln.id);
    assert_eq!(assigned_drivers(&app, created.id).await, vec![admin.id, joe.id]);
}

#[tokio::test]
async fn unknown_choices_are_rejected() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;

    let res = app
        .post_form("/cars/create/", "model=Navigator&manufacturer=999", Some(&cookie))
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res)
        .await
        .contains("Select a valid choice. That choice is not one of the available choices."));

    let body = format!("model=Navigator&manufacturer={}&drivers=999", lincoln.id);
    let res = app.post_form("/cars/create/", &body, Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res)
        .await
        .contains("Select a valid choice. 999 is not one of the available choices."));

    let res = app
        .post_form("/cars/create/", "model=Navigator&manufacturer=", Some(&cookie))
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res).await.contains("This field is required."));

    assert_eq!(car::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn update_replaces_the_drivers() {
    let app = TestApp::new().await;
    let (admin, cookie) = app.signed_in().await;
    let joe = app.create_driver("joe", "JOE00001").await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;
    let fiat = app.create_manufacturer("Fiat", "Italy").await;
    let navigator = app.create_car("Navigator", lincoln.id).await;
    app.assign(navigator.id, admin.id).await;

    let uri = format!("/cars/{}/update/", navigator.id);

    let form = body_text(app.get(&uri, Some(&cookie)).await).await;
    assert!(form.contains(&format!(r#"<option value="{}" selected>"#, lincoln.id)));

    let body = format!("model=Panda&manufacturer={}&drivers={}", fiat.id, joe.id);
    let res = app.post_form(&uri, &body, Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/cars/");

    let updated = car::Entity::find_by_id(navigator.id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.model, "Panda");
    assert_eq!(updated.manufacturer_id, fiat.id);
    assert_eq!(assigned_drivers(&app, navigator.id).await, vec![joe.id]);
}

#[tokio::test]
async fn toggle_assign_adds_and_removes_the_signed_in_driver() {
    let app = TestApp::new().await;
    let (admin, cookie) = app.signed_in().await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;
    let navigator = app.create_car("Navigator", lincoln.id).await;

    let detail = format!("/cars/{}/", navigator.id);
    let toggle = format!("/cars/{}/toggle-assign/", navigator.id);

    let html = body_text(app.get(&detail, Some(&cookie)).await).await;
    assert!(html.contains("Assign me to this car"));

    let res = app.post_form(&toggle, "", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), detail);
    assert_eq!(assigned_drivers(&app, navigator.id).await, vec![admin.id]);

    let html = body_text(app.get(&detail, Some(&cookie)).await).await;
    assert!(html.contains("Delete me from this car"));
    assert!(html.contains("admin (First Last)"));

    app.post_form(&toggle, "", Some(&cookie)).await;
    assert!(assigned_drivers(&app, navigator.id).await.is_empty());
}

#[tokio::test]
async fn delete_keeps_the_drivers() {
    let app = TestApp::new().await;
    let (admin, cookie) = app.signed_in().await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;
    let navigator = app.create_car("Navigator", lincoln.id).await;
    app.assign(navigator.id, admin.id).await;

    let uri = format!("/cars/{}/delete/", navigator.id);

    assert_eq!(app.get(&uri, Some(&cookie)).await.status(), StatusCode::OK);

    let res = app.post_form(&uri, "", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/cars/");

    assert_eq!(car::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(car_driver::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(driver::Entity::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn missing_car_is_not_found() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;

    assert_eq!(
        app.get("/cars/42/", Some(&cookie)).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.post_form("/cars/42/toggle-assign/", "", Some(&cookie))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}
