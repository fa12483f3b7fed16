//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod cars;
pub mod error;
pub mod health;
pub mod messages;
pub mod orders;
pub mod schemas;
pub mod session;
pub mod state;
pub mod validation;

use actix_web::web;

use crate::domain::ports::PROFILE_IMAGE_MAX_BYTES;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint plus the extractor error handlers.
///
/// Callers provide [`state::HttpState`] as app data and wrap the app in the
/// trace middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use service_station::inbound::http;
///
/// let app = App::new().service(web::scope("/api/v1").configure(http::configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .app_data(web::PayloadConfig::new(PROFILE_IMAGE_MAX_BYTES))
        .service(accounts::register)
        .service(accounts::login)
        .service(accounts::logout)
        .service(accounts::profile)
        .service(accounts::get_profile_image)
        .service(accounts::put_profile_image)
        .service(accounts::delete_profile_image)
        .service(cars::list_cars)
        .service(cars::add_car)
        .service(cars::remove_car)
        .service(orders::list_orders)
        .service(orders::create_order)
        .service(orders::get_order)
        .service(messages::list_messages)
        .service(messages::post_message);
}
