//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, FleetService, UserService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    auth, health, metrics, notifications, options, request_id::request_id_middleware,
    reservations, settings, statistics, users, vehicles,
};
use crate::interfaces::ws::{create_notification_state, ws_notifications_handler};
use crate::notifications::SharedEventBus;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::change_password,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        // Availability
        vehicles::list_periods,
        vehicles::replace_periods,
        vehicles::list_periods_by_day,
        vehicles::check_availability,
        vehicles::quote_price,
        // Rental options
        options::list_options,
        options::get_option,
        options::create_option,
        options::update_option,
        options::delete_option,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::list_my_reservations,
        reservations::get_reservation,
        reservations::confirm_reservation,
        reservations::complete_reservation,
        reservations::cancel_reservation,
        // Notifications
        notifications::list_notifications,
        notifications::unread_count,
        notifications::mark_read,
        notifications::mark_all_read,
        // Settings
        settings::get_settings,
        settings::update_settings,
        // Statistics
        statistics::statistics_summary,
        statistics::statistics_revenue,
        statistics::statistics_top_vehicles,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<vehicles::VehicleDto>,
            PaginatedResponse<reservations::ReservationDto>,
            PaginatedResponse<users::UserDto>,
            PaginatedResponse<notifications::NotificationDto>,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::UserInfo,
            auth::ChangePasswordRequest,
            // Users
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            // Vehicles
            vehicles::VehicleDto,
            vehicles::VehicleRequest,
            vehicles::PeriodDto,
            vehicles::PeriodItem,
            vehicles::ReplacePeriodsRequest,
            vehicles::DayGroupDto,
            vehicles::AvailabilityCheckResponse,
            vehicles::QuoteRequest,
            vehicles::OptionLineDto,
            vehicles::QuoteResponse,
            // Rental options
            options::RentalOptionDto,
            options::RentalOptionRequest,
            // Reservations
            reservations::CreateReservationRequest,
            reservations::ReservationDto,
            // Notifications
            notifications::NotificationDto,
            notifications::UnreadCountResponse,
            notifications::MarkAllReadResponse,
            // Settings
            settings::SettingsDto,
            settings::UpdateSettingsRequest,
            // Statistics
            statistics::FleetSummary,
            statistics::RevenueBucket,
            statistics::RevenueResponse,
            statistics::TopVehicleEntry,
            statistics::TopVehiclesResponse,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User authentication: login (JWT), registration, password change"),
        (name = "Users", description = "User account management (admin)"),
        (name = "Vehicles", description = "Vehicle fleet CRUD operations"),
        (name = "Availability", description = "Vehicle availability calendars and price quotes"),
        (name = "Rental Options", description = "Rental add-on catalog (GPS, child seat, insurance...)"),
        (name = "Reservations", description = "Reservation booking and lifecycle management"),
        (name = "Notifications", description = "Per-user notification feed"),
        (name = "Statistics", description = "Fleet and revenue statistics for the admin dashboard"),
        (name = "Settings", description = "Application-wide settings"),
        (name = "WebSocket Notifications", description = "Real-time event notifications via WebSocket"),
    ),
    info(
        title = "DriveHub Car Rental API",
        version = "1.0.0",
        description = "REST API for vehicle fleet, availability and reservation management",
        license(name = "MIT"),
        contact(name = "DriveHub")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
#[allow(clippy::too_many_arguments)]
pub fn create_api_router(
    db: DatabaseConnection,
    repos: Arc<dyn RepositoryProvider>,
    user_service: Arc<UserService<UserRepository>>,
    fleet_service: Arc<FleetService>,
    booking_service: Arc<BookingService>,
    jwt_config: JwtConfig,
    event_bus: SharedEventBus,
    metrics_handle: PrometheusHandle,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    // ── Handler states ──────────────────────────────────────────

    let auth_state = auth::AuthHandlerState {
        user_service: user_service.clone(),
    };
    let user_state = users::UserHandlerState { user_service };
    let vehicle_state = vehicles::VehicleHandlerState {
        fleet_service: fleet_service.clone(),
        booking_service: booking_service.clone(),
        repos: repos.clone(),
    };
    let option_state = options::OptionHandlerState { fleet_service };
    let reservation_state = reservations::ReservationHandlerState { booking_service };
    let notification_state = notifications::NotificationHandlerState {
        repos: repos.clone(),
    };
    let settings_state = settings::SettingsHandlerState { repos };
    let statistics_state = statistics::StatisticsState { db: db.clone() };
    let health_state = health::HealthState {
        db,
        event_bus: event_bus.clone(),
        started_at: Arc::new(Instant::now()),
    };
    let metrics_state = metrics::MetricsState {
        handle: metrics_handle,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── Public routers ──────────────────────────────────────────

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Vehicle catalog and availability (public storefront reads)
    let vehicle_public_routes = Router::new()
        .route("/", get(vehicles::list_vehicles))
        .route("/{id}", get(vehicles::get_vehicle))
        .route("/{id}/availability", get(vehicles::list_periods))
        .route("/{id}/availability/days", get(vehicles::list_periods_by_day))
        .route("/{id}/availability/check", get(vehicles::check_availability))
        .route("/{id}/quote", post(vehicles::quote_price))
        .with_state(vehicle_state.clone());

    // Rental option catalog (public storefront reads)
    let option_public_routes = Router::new()
        .route("/", get(options::list_options))
        .route("/{id}", get(options::get_option))
        .with_state(option_state.clone());

    // App settings (public read for display currency and contact info)
    let settings_public_routes = Router::new()
        .route("/", get(settings::get_settings))
        .with_state(settings_state.clone());

    // ── Authenticated routers ───────────────────────────────────

    // Reservation routes for the logged-in customer
    let reservation_routes = Router::new()
        .route("/", post(reservations::create_reservation))
        .route("/my", get(reservations::list_my_reservations))
        .route("/{id}", get(reservations::get_reservation))
        .route("/{id}/cancel", post(reservations::cancel_reservation))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(reservation_state.clone());

    // Notification feed, scoped to the authenticated user
    let notification_http_routes = Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/unread-count", get(notifications::unread_count))
        .route("/{id}/read", post(notifications::mark_read))
        .route("/read-all", post(notifications::mark_all_read))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(notification_state);

    // ── Admin routers (auth runs first, then the admin gate) ────

    let vehicle_admin_routes = Router::new()
        .route("/", post(vehicles::create_vehicle))
        .route(
            "/{id}",
            put(vehicles::update_vehicle).delete(vehicles::delete_vehicle),
        )
        .route("/{id}/availability", put(vehicles::replace_periods))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(vehicle_state);

    let option_admin_routes = Router::new()
        .route("/", post(options::create_option))
        .route(
            "/{id}",
            put(options::update_option).delete(options::delete_option),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(option_state);

    let reservation_admin_routes = Router::new()
        .route("/", get(reservations::list_reservations))
        .route("/{id}/confirm", post(reservations::confirm_reservation))
        .route("/{id}/complete", post(reservations::complete_reservation))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(reservation_state);

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    let settings_admin_routes = Router::new()
        .route("/", put(settings::update_settings))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(settings_state);

    let statistics_routes = Router::new()
        .route("/summary", get(statistics::statistics_summary))
        .route("/revenue", get(statistics::statistics_revenue))
        .route("/top-vehicles", get(statistics::statistics_top_vehicles))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(statistics_state);

    // ── Unauthenticated infrastructure routes ───────────────────

    // Notification WebSocket routes (no auth for WebSocket upgrade)
    let ws_state = create_notification_state(event_bus);
    let notification_ws_routes = Router::new()
        .route("/ws", get(ws_notifications_handler))
        .with_state(ws_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .merge(health_routes)
        .merge(metrics_routes)
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Vehicles + availability
        .nest("/api/v1/vehicles", vehicle_public_routes)
        .nest("/api/v1/vehicles", vehicle_admin_routes)
        // Rental options
        .nest("/api/v1/options", option_public_routes)
        .nest("/api/v1/options", option_admin_routes)
        // Reservations
        .nest("/api/v1/reservations", reservation_routes)
        .nest("/api/v1/reservations", reservation_admin_routes)
        // Notifications (feed + WebSocket)
        .nest("/api/v1/notifications", notification_http_routes)
        .nest("/api/v1/notifications", notification_ws_routes)
        // Settings
        .nest("/api/v1/settings", settings_public_routes)
        .nest("/api/v1/settings", settings_admin_routes)
        // Statistics
        .nest("/api/v1/statistics", statistics_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(
            metrics::middleware::http_metrics_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
}
