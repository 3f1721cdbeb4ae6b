//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Every backend
//! call goes through `ApiClient`; `SessionManager` owns the session state.

mod api;
mod commerce;
mod institution;
pub mod session;
mod status;
mod user;

pub use api::{ApiClient, SessionMode, NO_PARAMS};
pub use commerce::{balance_summary, CommerceService};
pub use institution::{find_institution, InstitutionService};
pub use session::{auth_url, session_id_from_validator_url, SessionManager};
pub use status::{AccountSummary, SessionState, StatusService, StatusSummary};
pub use user::UserService;
