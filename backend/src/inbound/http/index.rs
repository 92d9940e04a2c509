//! Landing page.

use actix_web::{HttpResponse, get, http::header::ContentType};

/// Static landing page confirming the server is up.
#[utoipa::path(
    get,
    path = "/",
    tags = ["misc"],
    responses((status = 200, description = "HTML landing page", content_type = "text/html"))
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body("<h1>Patient Registry</h1>")
}
