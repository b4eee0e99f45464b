use fractic_server_error::ServerError;

use crate::{
    entities::{Action, AuthProvider, User},
    errors::PermissionDenied,
};

pub(crate) fn ensure_permitted<P>(auth: &P, user: &User, action: Action) -> Result<(), ServerError>
where
    P: AuthProvider + ?Sized,
{
    if auth.has_permission(user, action) {
        return Ok(());
    }
    tracing::warn!(
        user = %user.id,
        role = user.role.key(),
        action = action.describe(),
        "permission denied"
    );
    Err(PermissionDenied::new(
        user.id.as_str(),
        user.role.key(),
        action.describe(),
    ))
}
