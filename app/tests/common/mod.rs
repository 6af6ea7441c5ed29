#![allow(dead_code)]

use axum::{body::Body, Router};
use chrono::Utc;
use entity::{car, car_driver, driver, manufacturer};
use http::{header, Request, Response, StatusCode};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use taxi_service::{
    database::db::run_migrations,
    server::controller::{self, AppState},
};
use tempfile::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "s3cret-pass";

/// lowest cost bcrypt accepts, keeps the password hashing fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// The whole app running against a migrated sqlite database in a temporary directory
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("taxi.db").display());

        let mut opt = ConnectOptions::new(url);
        opt.sqlx_logging(false);

        let db = Database::connect(opt).await.unwrap();
        run_migrations(&db).await;

        let state = AppState::new(db.clone(), TEST_BCRYPT_COST).unwrap();

        TestApp {
            router: controller::new(state.clone()),
            state,
            db,
            _dir: dir,
        }
    }

    pub async fn request(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder().method("GET").uri(uri);

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        self.request(req.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::USER_AGENT, "integration-tests");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        self.request(req.body(Body::from(body.to_owned())).unwrap())
            .await
    }

    pub async fn create_driver(&self, username: &str, license_number: &str) -> driver::Model {
        driver::ActiveModel {
            date_joined: Set(Utc::now()),
            last_login: Set(None),
            username: Set(username.to_owned()),
            password: Set(self.state.auth_service.hash_password(PASSWORD).unwrap()),
            first_name: Set(String::from("First")),
            last_name: Set(String::from("Last")),
            license_number: Set(Some(license_number.to_owned())),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
    }

    pub async fn create_manufacturer(&self, name: &str, country: &str) -> manufacturer::Model {
        manufacturer::ActiveModel {
            name: Set(name.to_owned()),
            country: Set(country.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
    }

    pub async fn create_car(&self, model: &str, manufacturer_id: i32) -> car::Model {
        car::ActiveModel {
            model: Set(model.to_owned()),
            manufacturer_id: Set(manufacturer_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
    }

    pub async fn assign(&self, car_id: i32, driver_id: i32) {
        car_driver::ActiveModel {
            car_id: Set(car_id),
            driver_id: Set(driver_id),
        }
        .insert(&self.db)
        .await
        .unwrap();
    }

    /// signs in and returns the `sid=<token>` cookie pair
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = format!("username={}&password={}", username, password);
        let res = self.post_form("/accounts/login/", &body, None).await;

        assert_eq!(res.status(), StatusCode::FOUND);

        let set_cookie = res.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_owned()
    }

    /// creates the `admin` driver and signs in as it
    pub async fn signed_in(&self) -> (driver::Model, String) {
        let admin = self.create_driver("admin", "ADM00001").await;
        let cookie = self.login("admin", PASSWORD).await;
        (admin, cookie)
    }
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(res: &Response<Body>) -> &str {
    res.headers()[header::LOCATION].to_str().unwrap()
}
