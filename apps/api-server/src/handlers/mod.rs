//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
///
/// Literal segments are registered before the `{id}` catch-alls so that
/// `/posts/create` never parses as a post id.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check));

    cfg.service(
        web::scope("/user")
            .route("/registration/", web::post().to(users::register))
            .route("/login/", web::post().to(users::login)),
    );

    cfg.service(
        web::scope("/posts")
            .route("/create", web::post().to(posts::create))
            .route("/author/{username}", web::get().to(posts::get_by_author))
            .route("/update/{id}", web::patch().to(posts::update))
            .route("/delete/{id}", web::delete().to(posts::delete))
            .route("/", web::get().to(posts::list))
            .route("/{id}", web::get().to(posts::get_by_id)),
    );

    cfg.service(
        web::scope("/comments")
            .route(
                "/posts/{post_id}/create",
                web::post().to(comments::create),
            )
            .route("/posts/{post_id}", web::get().to(comments::get_by_post))
            .route("/delete/{comment_id}", web::delete().to(comments::delete))
            .route("/", web::get().to(comments::list)),
    );
}
