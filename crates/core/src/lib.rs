pub mod config;
pub mod domain;
pub mod errors;
pub mod format;
pub mod listing;
pub mod rows;
pub mod stage;
pub mod urgency;

pub use domain::approval::{ApprovalRecord, ApproverStep};
pub use domain::device::{DeviceRecord, HistoryEntry};
pub use domain::status::ApprovalStatus;
pub use domain::user::LdapUserRecord;
pub use domain::RecordId;
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use format::{format_date, format_date_in, status_class, StatusClass};
pub use listing::{
    filter, paginate, query, sort, FilterState, ListRecord, NullPlacement, Page, PagingPolicy,
    QueryOptions, SortDirection,
};
pub use rows::{ApprovalRow, DeviceRow};
pub use stage::{compute_stage_label, current_approver};
pub use urgency::{compute_urgency, compute_urgency_at, Urgency, UrgencyPolicy};
