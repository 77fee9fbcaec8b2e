//! Branch list projection. Recomputed on every call; branch directories hold
//! tens of entries.

use crate::models::{Branch, BranchId, Principal};
use crate::services::evaluator::{allowed_branch_ids, has_access_to_all_branches};

/// Branches the principal may see, in directory order.
pub fn filter_branches(principal: Option<&Principal>, all_branches: &[Branch]) -> Vec<Branch> {
    if has_access_to_all_branches(principal) {
        return all_branches.to_vec();
    }

    let ids: Vec<BranchId> = all_branches.iter().map(|b| b.id.clone()).collect();
    let allowed = allowed_branch_ids(principal, &ids);

    all_branches
        .iter()
        .filter(|branch| allowed.contains(&branch.id))
        .cloned()
        .collect()
}
