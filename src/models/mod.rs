pub mod claim;
pub mod evidence;
pub mod ids;
pub mod output;
pub mod prediction;
pub mod verify;

pub use claim::{looks_like_url, Claim};
pub use evidence::{EvidenceBundle, SearchHit};
pub use ids::CheckId;
pub use output::CheckOutcome;
pub use prediction::{LocalPrediction, StyleLabel};
pub use verify::{Verdict, VerificationStatus, ALL_MODELS_BUSY, NO_SOURCES_REASON};
