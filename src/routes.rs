use crate::{api::leave_history, auth::middleware::auth_middleware, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        // period and burst are both forced non-zero above
        .expect("valid rate limiter config");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .configure(leave_routes),
    );
}

pub fn leave_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/leave")
            // /v1/leave/history
            .service(
                web::resource("/history").route(web::get().to(leave_history::leave_history)),
            )
            // /v1/leave/history/columns
            .service(
                web::resource("/history/columns")
                    .route(web::get().to(leave_history::history_columns)),
            )
            // /v1/leave/working-days
            .service(
                web::resource("/working-days").route(web::get().to(leave_history::working_days)),
            ),
    );
}
