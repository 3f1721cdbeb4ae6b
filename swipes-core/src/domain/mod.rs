//! Core domain entities
//!
//! Pure data structures mirroring the services API payloads, plus the
//! request/response envelope and the transaction filter merge. No I/O.

mod account;
mod amount;
pub mod envelope;
mod institution;
pub mod query;
pub mod result;
mod session;
mod transaction;
mod user;

pub use account::Account;
pub(crate) use account::AccountsResponse;
pub use envelope::{EnvelopeResponse, RequestEnvelope};
pub use institution::Institution;
pub(crate) use institution::InstitutionsResponse;
pub use query::{QueryCriteria, QueryCriteriaPatch, TransactionQuery, TransactionQueryPatch};
pub use session::{Session, SessionKind};
pub use transaction::{Transaction, TransactionHistory};
pub use user::UserProfile;
