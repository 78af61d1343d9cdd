// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{team_handler, user_handler};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/locations", get(team_handler::list_locations));

    let team_routes = Router::new()
        .route("/v1/teams", post(team_handler::create_team))
        .route("/v1/teams", get(team_handler::list_teams))
        .route("/v1/teams/{id}", put(team_handler::claim_team))
        .route("/v1/teams/{id}", delete(team_handler::delete_team))
        .route("/v1/teams/{id}/members", post(team_handler::join_team))
        .route(
            "/v1/teams/{id}/members/me",
            delete(team_handler::leave_team),
        )
        .route("/v1/teams/{id}/end", post(team_handler::end_team));

    let user_routes = Router::new().route("/v1/users/me", put(user_handler::update_me));

    Router::new()
        .merge(public_routes)
        .merge(team_routes)
        .merge(user_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
