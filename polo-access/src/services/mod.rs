pub mod branch_filter;
pub mod classification;
pub mod directory;
pub mod error;
pub mod evaluator;
pub mod fixtures;
pub mod guard;
pub mod provisioning;
pub mod session;

pub use branch_filter::filter_branches;
pub use classification::{
    is_branch_leadership_role, is_general_role, resolve_scope_for_role, role_requires_branch,
};
pub use directory::{BranchDirectory, DirectoryError, HttpBranchDirectory, StaticBranchDirectory};
pub use evaluator::{
    access_level, allowed_branch_ids, can_access_module, has_access_to_all_branches,
    has_access_to_branch, settings_section_visible, visible_modules, ALL_BRANCHES_ROLES,
    BRANCH_REGISTRY_ROLES, FINANCE_ROLES, UNRESTRICTED_MODULE_ROLES,
};
pub use fixtures::Fixtures;
pub use guard::{AccessDenied, AccessRequirement};
pub use provisioning::{
    allowed_roles_for_creator, plan_account, AccountPlan, NewAccountRequest, ProvisioningError,
};
pub use session::{
    principal_from_payload, HttpSessionSource, InMemorySessionSource, SessionError,
    SessionSource, UserMetadata, UserPayload,
};
