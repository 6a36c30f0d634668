/**
 * API Routes
 *
 * # Public
 *
 * - `POST /register`, `POST /login`
 * - `GET /users/exists/{virtualNumber}`
 * - `POST /calls`, `GET /calls/{phoneNumber}`
 * - `POST /send-otp`, `POST /verify-otp`
 * - `GET /ws` (authenticates itself during the handshake)
 *
 * # Protected (bearer token)
 *
 * - `GET /me`, `DELETE /user/delete`, `GET /users` (Admin)
 * - `POST /send`
 * - `GET /chats/{sender}/{receiver}`, `GET /chats/user/{phoneNumber}`
 * - `GET /users/chats?number=`, `POST /users/save-name`
 */

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::{delete_account, get_me, list_all_users, login, register, user_exists};
use crate::backend::calls::{call_history, save_call};
use crate::backend::chat::handlers::{get_thread, list_user_threads, save_name, send_message, user_chats};
use crate::backend::kyc::{send_otp, verify_otp};
use crate::backend::middleware::auth_middleware;
use crate::backend::realtime::ws_handler;
use crate::backend::server::state::AppState;

/// Routes that need no token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users/exists/{virtual_number}", get(user_exists))
        .route("/calls", post(save_call))
        .route("/calls/{phone_number}", get(call_history))
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/ws", get(ws_handler))
}

/// Routes behind `auth_middleware`
pub fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/user/delete", delete(delete_account))
        .route("/users", get(list_all_users))
        .route("/send", post(send_message))
        .route("/chats/{sender}/{receiver}", get(get_thread))
        .route("/chats/user/{phone_number}", get(list_user_threads))
        .route("/users/chats", get(user_chats))
        .route("/users/save-name", post(save_name))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware))
}

/// Add every API route to `router`
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    router
        .merge(public_routes())
        .merge(protected_routes(app_state))
}
