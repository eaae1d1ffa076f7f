use actix_web::web;

use crate::services::health::health_check;

pub mod dashboard;
pub mod uptime;

// Route table shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard::get_dashboard_page))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("/instant", web::get().to(uptime::get_instant))
                .route("/daily", web::get().to(uptime::get_daily))
                .route("/charts", web::get().to(dashboard::get_charts)),
        );
}
