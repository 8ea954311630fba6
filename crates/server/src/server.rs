use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use std::sync::Arc;

use crate::{ServerError, auth::AuthKeys, expenses, financial, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub auth: AuthKeys,
}

/// Owner id of the authenticated caller.
///
/// Inserted by the auth middleware and extracted by every handler, so the
/// owner is always passed explicitly into the engine.
#[derive(Clone, Debug)]
pub struct Owner(pub String);

async fn auth(
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Ok(TypedHeader(Authorization(bearer))) = auth_header else {
        tracing::debug!("rejected request without bearer token");
        return Err(ServerError::Unauthorized("No token, authorization denied"));
    };

    let claims = state.auth.verify(bearer.token()).map_err(|err| {
        tracing::debug!("rejected bearer token: {err}");
        ServerError::Unauthorized("Token is not valid")
    })?;
    if claims.user_id.is_empty() {
        return Err(ServerError::Unauthorized("Token is not valid"));
    }

    request.extensions_mut().insert(Owner(claims.user_id));
    Ok(next.run(request).await)
}

async fn method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

async fn route_not_found() -> ServerError {
    ServerError::RouteNotFound
}

/// Build the application router. Every route sits behind the auth middleware.
pub fn router(engine: Engine, auth_keys: AuthKeys) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        auth: auth_keys,
    };

    Router::new()
        .route("/expense", post(expenses::create).get(expenses::list))
        .route("/expense/summary", get(expenses::summary))
        .route("/expense/{id}", delete(expenses::remove))
        .route("/financial", post(financial::create).get(financial::list))
        .route("/financial/summary", get(financial::summary))
        .route("/financial/{id}", delete(financial::remove))
        .route(
            "/transaction",
            post(transactions::create).get(transactions::list),
        )
        .route("/transaction/summary", get(transactions::summary))
        .route("/transaction/{id}", delete(transactions::remove))
        .route("/transaction/{id}/status", patch(transactions::update_status))
        .method_not_allowed_fallback(method_not_allowed)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .fallback(route_not_found)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    auth_keys: AuthKeys,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine, auth_keys)).await
}
