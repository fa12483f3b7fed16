//! Handler tests for car endpoints over an in-memory station.

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::{init_api, json_body, signed_in};
use crate::test_support::InMemoryStation;

const VIN: &str = "1HGCM82633A004352";

fn car_body(vin: &str, year: Value) -> Value {
    json!({"brand": "Toyota", "model": "Corolla", "vin": vin, "year": year})
}

#[rstest]
#[case(json!("2019"))]
#[case(json!(2019))]
#[actix_web::test]
async fn add_then_list_cars(#[case] year: Value) {
    let station = InMemoryStation::new().expect("station");
    let app = init_api(station.http_state()).await;
    let cookie = signed_in(&app, "driver01").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cars")
            .cookie(cookie.clone())
            .set_json(car_body(VIN, year))
            .to_request(),
    )
    .await;
    let (status, created) = json_body(res).await;
    assert_eq!(status, StatusCode::CREATED);
    let expected = CarResponse {
        id: 1,
        brand: "Toyota".into(),
        model: "Corolla".into(),
        vin: VIN.into(),
        year: 2019,
    };
    assert_eq!(
        serde_json::from_value::<CarResponse>(created).expect("car"),
        expected
    );

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/cars")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let listed: Vec<CarResponse> = test::read_body_json(res).await;
    assert_eq!(listed, vec![expected]);
}

#[rstest]
#[case(&VIN[..16], json!("2019"), "vin", "wrong_length")]
#[case("1HGCM82633A0043521", json!("2019"), "vin", "wrong_length")]
#[case(VIN, json!("19x9"), "year", "not_a_number")]
#[actix_web::test]
async fn invalid_cars_are_rejected(
    #[case] vin: &str,
    #[case] year: Value,
    #[case] field: &str,
    #[case] rule: &str,
) {
    let station = InMemoryStation::new().expect("station");
    let app = init_api(station.http_state()).await;
    let cookie = signed_in(&app, "driver01").await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cars")
            .cookie(cookie)
            .set_json(car_body(vin, year))
            .to_request(),
    )
    .await;
    let (status, body) = json_body(res).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!({"field": field, "rule": rule}));
}

#[rstest]
#[actix_web::test]
async fn removal_checks_existence_then_ownership() {
    let station = InMemoryStation::new().expect("station");
    let app = init_api(station.http_state()).await;
    let owner = signed_in(&app, "driver01").await;
    let intruder = signed_in(&app, "driver02").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cars")
            .cookie(owner.clone())
            .set_json(car_body(VIN, json!("2019")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let delete = |cookie: actix_web::cookie::Cookie<'static>, uri: &'static str| {
        test::TestRequest::delete().uri(uri).cookie(cookie).to_request()
    };

    let (status, body) = json_body(test::call_service(&app, delete(intruder, "/api/v1/cars/1")).await).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, _) = json_body(test::call_service(&app, delete(owner.clone(), "/api/v1/cars/99")).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let res = test::call_service(&app, delete(owner.clone(), "/api/v1/cars/1")).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let (status, _) = json_body(test::call_service(&app, delete(owner.clone(), "/api/v1/cars/1")).await).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = json_body(test::call_service(&app, delete(owner, "/api/v1/cars/abc")).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!({"field": "id", "rule": "not_a_number"}));
}

#[rstest]
#[actix_web::test]
async fn cars_require_a_session() {
    let station = InMemoryStation::new().expect("station");
    let app = init_api(station.http_state()).await;
    let res = test::call_service(&app, test::TestRequest::get().uri("/api/v1/cars").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
