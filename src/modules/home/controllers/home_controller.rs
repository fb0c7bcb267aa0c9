use actix_web::{web, HttpResponse};

const INDEX_HTML: &str = include_str!("../../../../templates/index.html");

/// GET / - landing page with the customer lookup form
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}
