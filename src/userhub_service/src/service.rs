use axum::{
    Router,
    http::{HeaderValue, Method, request},
    middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use userhub_adapters::config::AllowedOrigins;
use userhub_axum::{
    AppState,
    middleware::{require_reset_session, require_session},
    routes,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main account service that provides all user-lifecycle routes
///
/// Routes are nested under `/user`:
/// - open: start, register, login, forgot-password
/// - reset gate: reset
/// - session gate: edit, profile, delete, test-email promotion, logout
pub struct UserHubService {
    router: Router,
}

impl UserHubService {
    pub fn new(state: AppState) -> Self {
        let open_routes = Router::new()
            .route("/start", get(routes::start))
            .route("/register", post(routes::register))
            .route("/login", post(routes::login))
            .route("/forgot-password", post(routes::forgot_password));

        let reset_routes = Router::new()
            .route("/reset", put(routes::reset_password))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_reset_session,
            ));

        let protected_routes = Router::new()
            .route(
                "/",
                put(routes::edit_user)
                    .get(routes::get_user)
                    .delete(routes::delete_user),
            )
            .route("/test-email", put(routes::promote_account))
            .route("/logout", post(routes::logout))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ));

        let router = Router::new()
            .nest(
                "/user",
                open_routes.merge(reset_routes).merge(protected_routes),
            )
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finalize the router, optionally restricting CORS to the configured
    /// origins. Suitable for mounting into a larger application as well.
    pub fn as_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server.
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_router(allowed_origins);
        tracing::info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await
    }
}
