//! # Asset Model
//!
//! Types describing what was observed for a host and what the engine decided about it.

mod decision;
mod record;
mod root;
mod signature;

pub use decision::{Decision, MatchFlags};
pub use record::AssetRecord;
pub use root::RootDomain;
pub use signature::HttpSignature;
