mod common;

use common::{body_text, location, TestApp, PASSWORD};
use entity::{car, driver, session};
use http::StatusCode;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use taxi_service::modules::driver::{dto::DriverFields, repository};

/// rows of the driver table, the header excluded
fn row_count(html: &str) -> usize {
    html.matches("<tr>").count().saturating_sub(1)
}

fn creation_body(username: &str, license_number: &str, password1: &str, password2: &str) -> String {
    format!(
        "username={}&license_number={}&first_name=Joe&last_name=Doe&password1={}&password2={}",
        username, license_number, password1, password2
    )
}

#[tokio::test]
async fn seven_drivers_are_listed_in_two_pages() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;

    for i in 1..7 {
        app.create_driver(&format!("driver{}", i), &format!("DRV0000{}", i))
            .await;
    }

    let first = body_text(app.get("/drivers/", Some(&cookie)).await).await;
    assert_eq!(row_count(&first), 5);
    assert!(first.contains("admin (Me)"));

    let second = body_text(app.get("/drivers/?page=2", Some(&cookie)).await).await;
    assert_eq!(row_count(&second), 2);
}

#[tokio::test]
async fn search_filters_by_username() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;
    app.create_driver("joe", "JOE00001").await;

    let html = body_text(app.get("/drivers/?username=JO", Some(&cookie)).await).await;

    assert_eq!(row_count(&html), 1);
    assert!(html.contains("JOE00001"));
    assert!(html.contains("placeholder=\"search by username\""));
}

#[tokio::test]
async fn create_hashes_the_password() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;

    let body = creation_body("joe", "JOE00001", PASSWORD, PASSWORD);
    let res = app.post_form("/drivers/create/", &body, Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/drivers/");

    let joe = driver::Entity::find()
        .filter(driver::Column::Username.eq("joe"))
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(joe.license_number.as_deref(), Some("JOE00001"));
    assert_ne!(joe.password, PASSWORD);
    assert!(bcrypt::verify(PASSWORD, &joe.password).unwrap());

    app.login("joe", PASSWORD).await;
}

#[tokio::test]
async fn license_number_problems_are_reported() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;

    for (license_number, message) in [
        ("ABC123456", "License number should consist of 8 characters"),
        ("abc12345", "First 3 characters should be uppercase letters"),
        ("ABCdef45", "Last 5 characters should be digits"),
        ("ADM00001", "Driver with this License number already exists."),
    ] {
        let body = creation_body("joe", license_number, PASSWORD, PASSWORD);
        let res = app.post_form("/drivers/create/", &body, Some(&cookie)).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", license_number);
        assert!(body_text(res).await.contains(message), "{}", license_number);
    }

    assert_eq!(driver::Entity::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn padded_fields_are_validated_as_stored() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;

    let body = creation_body("%20joe%20", "ABC12345%20", PASSWORD, PASSWORD);
    let res = app.post_form("/drivers/create/", &body, Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::FOUND);

    let joe = driver::Entity::find()
        .filter(driver::Column::Username.eq("joe"))
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(joe.license_number.as_deref(), Some("ABC12345"));

    // same license number once the padding is gone
    let body = creation_body("ann", "%20ABC12345", PASSWORD, PASSWORD);
    let res = app.post_form("/drivers/create/", &body, Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(res)
        .await
        .contains("Driver with this License number already exists."));
}

#[tokio::test]
async fn password_and_username_problems_are_reported() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;

    for (body, message) in [
        (
            creation_body("joe", "JOE00001", PASSWORD, "other-pass"),
            "The two password fields didn&#x27;t match.",
        ),
        (
            creation_body("joe", "JOE00001", "1234", "1234"),
            "This password is too short. It must contain at least 8 characters.",
        ),
        (
            creation_body("joe", "JOE00001", "12345678", "12345678"),
            "This password is entirely numeric.",
        ),
        (
            creation_body("admin", "JOE00001", PASSWORD, PASSWORD),
            "A user with that username already exists.",
        ),
    ] {
        let res = app.post_form("/drivers/create/", &body, Some(&cookie)).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(res).await.contains(message), "{}", message);
    }
}

#[tokio::test]
async fn update_changes_the_profile() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;
    let joe = app.create_driver("joe", "JOE00001").await;

    let uri = format!("/drivers/{}/update/", joe.id);

    let form = body_text(app.get(&uri, Some(&cookie)).await).await;
    assert!(form.contains(r#"value="JOE00001""#));
    assert!(!form.contains("password1"));

    let res = app
        .post_form(
            &uri,
            "username=joe&license_number=XYZ99999&first_name=Joseph&last_name=Doe",
            Some(&cookie),
        )
        .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/drivers/");

    let updated = driver::Entity::find_by_id(joe.id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.license_number.as_deref(), Some("XYZ99999"));
    assert_eq!(updated.first_name, "Joseph");
    assert_eq!(updated.password, joe.password);
}

#[tokio::test]
async fn detail_lists_the_driver_cars() {
    let app = TestApp::new().await;
    let (admin, cookie) = app.signed_in().await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;
    let navigator = app.create_car("Navigator", lincoln.id).await;
    app.assign(navigator.id, admin.id).await;

    let res = app.get(&admin.get_absolute_url(), Some(&cookie)).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("Navigator (Lincoln)"));

    let res = app.get("/drivers/999/", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_keeps_the_cars() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;
    let joe = app.create_driver("joe", "JOE00001").await;
    let lincoln = app.create_manufacturer("Lincoln", "USA").await;
    let navigator = app.create_car("Navigator", lincoln.id).await;
    app.assign(navigator.id, joe.id).await;
    app.login("joe", PASSWORD).await;

    let uri = format!("/drivers/{}/delete/", joe.id);

    let confirm = body_text(app.get(&uri, Some(&cookie)).await).await;
    assert!(confirm.contains("joe (First Last)"));

    let res = app.post_form(&uri, "", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/drivers/");

    assert!(driver::Entity::find_by_id(joe.id)
        .one(&app.db)
        .await
        .unwrap()
        .is_none());
    assert_eq!(car::Entity::find().count(&app.db).await.unwrap(), 1);

    let joe_sessions = session::Entity::find()
        .filter(session::Column::DriverId.eq(joe.id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(joe_sessions, 0);
}

#[tokio::test]
async fn duplicated_license_number_on_insert_is_a_unique_violation() {
    let app = TestApp::new().await;
    app.create_driver("joe", "JOE00001").await;

    let fields = DriverFields {
        username: "ann",
        license_number: "JOE00001",
        first_name: "Ann",
        last_name: "Doe",
    };

    let err = repository::create_driver(&app.db, &fields, String::from("hash"))
        .await
        .unwrap_err();

    let violation = err.unique_violation().unwrap();
    assert!(violation.contains("license_number"), "{}", violation);
}
