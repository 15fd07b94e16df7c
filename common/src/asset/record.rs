use crate::asset::{Decision, HttpSignature, MatchFlags};

/// One classified host/URL pair. Built once, never revised.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub host: String,
    pub url: String,
    pub signature: HttpSignature,
    pub flags: MatchFlags,
    pub decision: Decision,
}
