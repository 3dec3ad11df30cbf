pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod stores;

use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use stores::{ContactStore, PostStore, ProjectStore, UserStore};

/// Shared application state: one store per entity type, each injected with
/// the connection pool. Replaces any notion of a global model registry.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub users: UserStore,
    pub projects: ProjectStore,
    pub posts: PostStore,
    pub contacts: ContactStore,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserStore::new(pool.clone()),
            projects: ProjectStore::new(pool.clone()),
            posts: PostStore::new(pool.clone()),
            contacts: ContactStore::new(pool.clone()),
            pool,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{contact, landing, users};

    Router::new()
        .route("/", get(landing::root))
        .route("/health", get(landing::health))
        .route("/contact", post(contact::contact_post))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
}

fn protected_routes() -> Router<AppState> {
    use handlers::protected::{pages, posts, projects, users};

    Router::new()
        // Projects
        .route("/projects", get(projects::index))
        .route("/projects/new", get(projects::new_form).post(projects::create))
        .route("/projects/edit", get(projects::edit_form).post(projects::edit_submit))
        .route("/projects/delete", get(projects::delete_select))
        .route(
            "/projects/delete/:id",
            get(projects::delete_confirm).post(projects::delete_execute),
        )
        .route("/projects/:id", get(projects::detail))
        // Posts
        .route("/posts", get(posts::index))
        .route("/projects/:id/posts", get(posts::index_for_project))
        .route(
            "/projects/:id/posts/new",
            get(posts::new_form).post(posts::create),
        )
        .route("/posts/:id", get(posts::detail))
        .route("/posts/:id/edit", get(posts::edit_form).post(posts::edit_submit))
        .route(
            "/posts/:id/delete",
            get(posts::delete_confirm).post(posts::delete_execute),
        )
        // Session + informational pages
        .route("/users/whoami", get(users::whoami))
        .route("/users/logout", post(users::logout))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact_page))
        .route_layer(axum::middleware::from_fn(middleware::require_auth))
}
