use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;
use std::sync::Arc;

use uptime_collector::{DataEnvelope, UptimeStore};

use crate::state::AppState;

// Run a store read off the async workers; failures become a 500 response
pub async fn read_store<T, F>(data: &web::Data<AppState>, read: F) -> Result<T, HttpResponse>
where
    F: FnOnce(&UptimeStore) -> uptime_collector::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&data.store);

    match web::block(move || read(&store)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!("Uptime store error: {}", e);
            Err(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })))
        }
        Err(e) => {
            error!("Uptime store task failed: {}", e);
            Err(HttpResponse::InternalServerError().json(json!({ "error": "store unavailable" })))
        }
    }
}

// Instant feed: every check still kept in the store
pub async fn get_instant(data: web::Data<AppState>) -> impl Responder {
    info!("Request for instant feed");

    match read_store(&data, |store| store.instant_records()).await {
        Ok(records) => {
            info!("Returning {} instant records", records.len());
            HttpResponse::Ok().json(DataEnvelope::new(records))
        }
        Err(response) => response,
    }
}

// Daily counters since the first check
pub async fn get_daily(data: web::Data<AppState>) -> impl Responder {
    info!("Request for daily counters");

    match read_store(&data, |store| store.daily_records()).await {
        Ok(records) => {
            info!("Returning {} daily records", records.len());
            HttpResponse::Ok().json(DataEnvelope::new(records))
        }
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::configure;
    use actix_web::{test, App};
    use chrono::{Local, Utc};
    use uptime_collector::{DailyRecord, InstantRecord};

    fn app_state() -> web::Data<AppState> {
        let store = Arc::new(UptimeStore::open_in_memory().unwrap());
        web::Data::new(AppState::new(store))
    }

    #[actix_web::test]
    async fn test_daily_returns_envelope() {
        let state = app_state();
        state.store.record_state(&Local::now(), true).unwrap();
        state.store.record_state(&Local::now(), false).unwrap();

        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/daily")
            .insert_header(("Accept", "application/json"))
            .to_request();
        let body: DataEnvelope<DailyRecord> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0].day, Local::now().date_naive());
        assert_eq!((body.data[0].up, body.data[0].down), (1, 1));
    }

    #[actix_web::test]
    async fn test_instant_returns_envelope() {
        let state = app_state();
        state.store.record_state(&Utc::now(), true).unwrap();

        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/instant").to_request();
        let body: DataEnvelope<InstantRecord> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.data.len(), 1);
        assert!(body.data[0].up);
    }

    #[actix_web::test]
    async fn test_empty_store_returns_empty_data() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/daily").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "data": [] }));
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: String = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, "OK");
    }
}
