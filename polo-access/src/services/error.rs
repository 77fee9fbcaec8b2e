use service_core::error::AppError;

use crate::models::IdentityError;
use crate::services::directory::DirectoryError;
use crate::services::guard::AccessDenied;
use crate::services::provisioning::ProvisioningError;
use crate::services::session::SessionError;

impl From<AccessDenied> for AppError {
    fn from(err: AccessDenied) -> Self {
        match err {
            AccessDenied::Unauthenticated => AppError::Unauthorized(anyhow::anyhow!(err)),
            other => AppError::Forbidden(anyhow::anyhow!(other)),
        }
    }
}

impl From<ProvisioningError> for AppError {
    fn from(err: ProvisioningError) -> Self {
        match err {
            ProvisioningError::Validation(e) => AppError::ValidationError(e),
            ProvisioningError::UnknownRole(_) | ProvisioningError::MissingBranch(_) => {
                AppError::BadRequest(anyhow::anyhow!(err))
            }
            ProvisioningError::CreatorNotConfigured
            | ProvisioningError::RoleNotAllowed(_)
            | ProvisioningError::BranchOutsideScope { .. } => {
                AppError::Forbidden(anyhow::anyhow!(err))
            }
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::BadGateway(err.to_string())
    }
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        AppError::BadGateway(err.to_string())
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        AppError::BadRequest(anyhow::anyhow!(err))
    }
}
