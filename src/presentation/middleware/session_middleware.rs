// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::SessionUser;
use crate::infrastructure::database::entities::{session, user};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 会话状态
#[derive(Clone)]
pub struct SessionState {
    /// 数据库连接
    pub db: Arc<DatabaseConnection>,
}

/// 会话中间件
///
/// 把Bearer令牌解析成登录用户并注入请求扩展。未携带令牌的
/// 请求以匿名身份放行，由服务层按需拒绝；携带无效或过期
/// 令牌的请求直接返回401。
///
/// # 参数
///
/// * `state` - 会话状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 处理后的响应
/// * `Err(StatusCode)` - 会话解析失败的状态码
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = req.uri().path();
    debug!("SessionMiddleware processing path: {}", path);

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::to_string);

    let session_user = match token {
        Some(token) => Some(resolve_session(&state, &token).await?),
        None => None,
    };

    req.extensions_mut().insert(session_user);
    Ok(next.run(req).await)
}

async fn resolve_session(state: &SessionState, token: &str) -> Result<SessionUser, StatusCode> {
    let record = match session::Entity::find_by_id(token.to_string())
        .one(state.db.as_ref())
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => {
            warn!("Session token not found");
            return Err(StatusCode::UNAUTHORIZED);
        }
        Err(e) => {
            error!("Database error checking session token: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if let Some(expires_at) = record.expires_at {
        if expires_at < Utc::now().fixed_offset() {
            warn!("Session token expired");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    match user::Entity::find()
        .filter(user::Column::Id.eq(record.user_id))
        .one(state.db.as_ref())
        .await
    {
        Ok(Some(user)) => Ok(SessionUser {
            nickname: user.nickname,
        }),
        Ok(None) => {
            warn!("Session refers to a missing user");
            Err(StatusCode::UNAUTHORIZED)
        }
        Err(e) => {
            error!("Database error loading session user: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
