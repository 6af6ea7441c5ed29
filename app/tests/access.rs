mod common;

use common::{body_text, location, TestApp};
use http::StatusCode;

#[tokio::test]
async fn private_pages_redirect_anonymous_requests_to_login() {
    let app = TestApp::new().await;

    for (uri, next) in [
        ("/", "%2F"),
        ("/manufacturers/", "%2Fmanufacturers%2F"),
        ("/cars/", "%2Fcars%2F"),
        ("/drivers/", "%2Fdrivers%2F"),
        ("/drivers/create/", "%2Fdrivers%2Fcreate%2F"),
    ] {
        let res = app.get(uri, None).await;

        assert_eq!(res.status(), StatusCode::FOUND, "{}", uri);
        assert_eq!(location(&res), format!("/accounts/login/?next={}", next));
    }
}

#[tokio::test]
async fn anonymous_posts_do_not_mutate() {
    let app = TestApp::new().await;

    let res = app
        .post_form("/manufacturers/create/", "name=Lincoln&country=USA", None)
        .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(location(&res).starts_with("/accounts/login/"));

    let (_, cookie) = app.signed_in().await;
    let html = body_text(app.get("/manufacturers/", Some(&cookie)).await).await;
    assert!(!html.contains("Lincoln"));
}

#[tokio::test]
async fn public_pages_are_reachable() {
    let app = TestApp::new().await;

    assert_eq!(app.get("/healthcheck", None).await.status(), StatusCode::OK);

    let res = app.get("/accounts/login/?next=/cars/", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains(r#"name="next" value="/cars/""#));
}

#[tokio::test]
async fn signed_in_drivers_can_browse() {
    let app = TestApp::new().await;
    let (_, cookie) = app.signed_in().await;

    for uri in ["/", "/manufacturers/", "/cars/", "/drivers/"] {
        let res = app.get(uri, Some(&cookie)).await;
        assert_eq!(res.status(), StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn unknown_session_is_anonymous() {
    let app = TestApp::new().await;

    let res = app.get("/cars/", Some("sid=12345")).await;

    assert_eq!(res.status(), StatusCode::FOUND);
}
