use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use log::{error, info};
use serde_json::json;

use uptime_dashboard::{render_page, Dashboard};

use crate::controllers::uptime::read_store;
use crate::state::AppState;

// Each read is independent: a failing one only leaves its charts out
async fn load_dashboard(data: &web::Data<AppState>) -> Dashboard {
    let instant = read_store(data, |store| store.instant_records()).await.ok();
    let daily = read_store(data, |store| store.daily_records()).await.ok();

    Dashboard::build(
        instant.as_deref(),
        daily.as_deref(),
        Local::now().date_naive(),
    )
}

// Chart.js configurations keyed by canvas id
pub async fn get_charts(data: web::Data<AppState>) -> impl Responder {
    info!("Request for dashboard charts");
    let dashboard = load_dashboard(&data).await;

    HttpResponse::Ok().json(dashboard)
}

// The dashboard page itself
pub async fn get_dashboard_page(data: web::Data<AppState>) -> impl Responder {
    info!("Request for dashboard page");
    let dashboard = load_dashboard(&data).await;

    match render_page(&dashboard) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            error!("Failed to render dashboard: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::configure;
    use actix_web::{test, App};
    use std::sync::Arc;
    use uptime_collector::UptimeStore;

    fn app_state() -> web::Data<AppState> {
        let store = Arc::new(UptimeStore::open_in_memory().unwrap());
        web::Data::new(AppState::new(store))
    }

    #[actix_web::test]
    async fn test_charts_reflect_store() {
        let state = app_state();
        for up in [true, true, true, false] {
            state.store.record_state(&Local::now(), up).unwrap();
        }

        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/charts").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["chart-today"]["data"]["datasets"][0]["data"],
            json!([75.0, 25.0])
        );
        assert_eq!(
            body["chart-lifetime"]["data"]["datasets"][0]["data"],
            json!([75.0, 25.0])
        );
        assert_eq!(body["chart-instant"]["data"]["labels"].as_array().map(Vec::len), Some(4));
        assert!(body.get("chart-30days").is_some());
    }

    #[actix_web::test]
    async fn test_empty_store_has_no_percentage_charts() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/charts").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(body.get("chart-today").is_none());
        assert!(body.get("chart-lifetime").is_none());
    }

    #[actix_web::test]
    async fn test_dashboard_page_is_html() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<canvas id=\"chart-today\">"));
    }
}
