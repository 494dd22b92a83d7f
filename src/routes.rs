use crate::{
    api::{absence, employee, request, store, summary},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let submit_limiter = Arc::new(build_limiter(config.rate_submit_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Everything lives behind the bearer token; per-handler role checks do
    // the admin gating.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(employee::update_employee))
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/stores")
                    .service(
                        web::resource("")
                            .route(web::post().to(store::create_store))
                            .route(web::get().to(store::list_stores)),
                    )
                    .service(
                        web::resource("/{name}").route(web::delete().to(store::delete_store)),
                    ),
            )
            .service(
                web::scope("/absences")
                    .service(
                        web::resource("")
                            .route(web::get().to(absence::list_absences))
                            .route(web::put().to(absence::upsert_absence)),
                    )
                    .service(
                        web::resource("/{employee_id}/{date}")
                            .route(web::delete().to(absence::delete_absence)),
                    ),
            )
            .service(
                web::scope("/requests")
                    // /requests
                    .service(
                        web::resource("")
                            .route(web::get().to(request::list_requests))
                            .route(
                                web::post()
                                    .to(request::create_request)
                                    .wrap(submit_limiter.clone()),
                            ),
                    )
                    // registered before /{id} so "clashes" is not read as an id
                    .service(
                        web::resource("/clashes").route(web::get().to(request::clash_report)),
                    )
                    // /requests/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(request::get_request))
                            .route(web::put().to(request::edit_request)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(request::approve_request)),
                    )
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(request::reject_request)),
                    )
                    .service(
                        web::resource("/{id}/cancel")
                            .route(web::post().to(request::request_cancellation)),
                    )
                    .service(
                        web::resource("/{id}/cancel/approve")
                            .route(web::put().to(request::approve_cancellation)),
                    )
                    .service(
                        web::resource("/{id}/cancel/decline")
                            .route(web::put().to(request::decline_cancellation)),
                    ),
            )
            .service(
                web::scope("/summary")
                    .service(web::resource("").route(web::get().to(summary::balances))),
            ),
    );
}
