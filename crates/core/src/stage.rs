use crate::domain::approval::ApproverStep;
use crate::domain::status::{stage_approved_label, APPROVED_LABEL, PENDING_LABEL};

/// "N차승인완료" label for an approval that is part-way through its chain.
///
/// Step numbers are not checked for gaps or duplicates; the highest approved
/// step wins.
pub fn compute_stage_label(approval_info: &str, approvers: &[ApproverStep]) -> Option<String> {
    if approvers.is_empty() {
        return None;
    }

    let info = approval_info.trim();
    if info != PENDING_LABEL && !info.contains(APPROVED_LABEL) {
        return None;
    }
    if approvers.iter().all(|step| step.is_approved) {
        return None;
    }

    approvers
        .iter()
        .filter(|step| step.is_approved)
        .map(|step| step.step)
        .max()
        .map(stage_approved_label)
}

/// First unapproved step in step order.
pub fn current_approver(approvers: &[ApproverStep]) -> Option<&ApproverStep> {
    approvers.iter().filter(|step| !step.is_approved).min_by_key(|step| step.step)
}
