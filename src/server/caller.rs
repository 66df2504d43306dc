use super::params::Params;
use super::state::ServerState;
use crate::subsonic::{ErrorCode, SubsonicResponse};
use crate::user::auth::verify_password;
use crate::user::User;

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, error};

/// The user a Subsonic request is made on behalf of, resolved from `u` and `p`.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: User,
}

const WRONG_CREDENTIALS_MESSAGE: &str = "wrong username or password";

fn missing(name: &str) -> SubsonicResponse {
    SubsonicResponse::error(
        ErrorCode::MissingParameter,
        format!("please provide a `{}` parameter", name),
    )
}

fn internal(e: anyhow::Error) -> SubsonicResponse {
    error!("Failed to resolve caller: {:#}", e);
    SubsonicResponse::error(ErrorCode::Generic, "failed to resolve user")
}

impl FromRequestParts<ServerState> for Caller {
    type Rejection = SubsonicResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let params = Params::from_request_parts(parts, ctx).await?;
        let name = params.string("u").ok_or_else(|| missing("u"))?;
        let password = params.string("p").ok_or_else(|| missing("p"))?;

        let user = match ctx.user_store.get_user_by_name(&name).map_err(internal)? {
            Some(user) => user,
            None => {
                debug!("Unknown user {}", name);
                return Err(SubsonicResponse::error(
                    ErrorCode::WrongCredentials,
                    WRONG_CREDENTIALS_MESSAGE,
                ));
            }
        };

        let stored = ctx
            .user_store
            .get_user_password(user.id)
            .map_err(internal)?
            .unwrap_or_default();
        if stored.is_empty() || !verify_password(&stored, &password) {
            debug!("Wrong password for user {}", name);
            return Err(SubsonicResponse::error(
                ErrorCode::WrongCredentials,
                WRONG_CREDENTIALS_MESSAGE,
            ));
        }

        Ok(Caller { user })
    }
}
