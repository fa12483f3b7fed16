//! End-to-end customer journey through the real router over in-memory adapters.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use service_station::Trace;
use service_station::domain::{MessageText, OrderId};
use service_station::inbound::http::configure_api;
use service_station::inbound::http::session::SESSION_COOKIE;
use service_station::test_support::InMemoryStation;

async fn send<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, request.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn customer_registers_books_a_service_and_writes_to_staff() {
    let station = InMemoryStation::new().expect("station");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(station.http_state()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await;

    let (status, created) = send(
        &app,
        test::TestRequest::post().uri("/api/v1/registration").set_json(json!({
            "login": "driver01",
            "password": "secret1",
            "name": "Ann",
            "lastName": "Lee",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_i64());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"login": "driver01", "password": "secret1"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let token: Cookie<'static> = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("token cookie");

    let (status, car) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/cars")
            .cookie(token.clone())
            .set_json(json!({
                "brand": "Toyota",
                "model": "Corolla",
                "vin": "1HGCM82633A004352",
                "year": "2019",
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, order) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/orders")
            .cookie(token.clone())
            .set_json(json!({
                "day": "5",
                "month": "6",
                "year": "2024",
                "carId": car["id"],
                "description": "oil change",
                "cost": "150",
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "open");
    assert_eq!(order["serviceDate"], "06-05-2024");
    assert_eq!(order["hasUnreadMessage"], false);
    let order_id = order["id"].as_i64().expect("order id");
    let thread_uri = format!("/api/v1/orders/{order_id}/messages");

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri(&thread_uri)
            .cookie(token.clone())
            .set_json(json!({"text": "when ready?"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, thread) = send(
        &app,
        test::TestRequest::get().uri(&thread_uri).cookie(token.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let thread = thread.as_array().expect("thread");
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0]["text"], "when ready?");
    assert_eq!(thread[0]["author"], "customer");

    station
        .staff()
        .post_staff_message(
            OrderId::new(order_id),
            MessageText::new("tomorrow at noon").expect("text"),
        )
        .await
        .expect("staff reply");
    let (_, order) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/orders/{order_id}"))
            .cookie(token.clone()),
    )
    .await;
    assert_eq!(order["hasUnreadMessage"], true);

    let (_, thread) = send(
        &app,
        test::TestRequest::get().uri(&thread_uri).cookie(token.clone()),
    )
    .await;
    let last = thread
        .as_array()
        .and_then(|messages| messages.last())
        .expect("latest message");
    assert_eq!(last["author"], "staff");

    let (status, _) = send(
        &app,
        test::TestRequest::post().uri("/api/v1/logout").cookie(token.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/v1/cars").cookie(token),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_session");
}
