pub mod check;
pub mod classifier;
pub mod evidence;
pub mod gemini;
pub mod mock;
pub mod model_selector;
pub mod orchestrator;
pub mod search;
pub mod traits;
pub mod url_resolver;

pub use check::FactCheckPipeline;
pub use classifier::{LinearStyleClassifier, LocalStyleClassifier};
pub use evidence::EvidenceRetriever;
pub use gemini::{GeminiClient, ModelInfo};
pub use mock::{FixedStyle, ScriptedGenerator, ScriptedSearch, StaticCatalog, StaticTitleResolver};
pub use model_selector::ModelSelector;
pub use orchestrator::VerificationOrchestrator;
pub use search::DuckDuckGoSearch;
pub use traits::{
    ClaimChecker, GenerativeModel, ModelCatalog, SearchProvider, StyleClassifier, TitleResolver,
};
pub use url_resolver::WebTitleResolver;
