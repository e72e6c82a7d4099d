pub mod assembler;
pub mod language;
pub mod model;
pub mod sectioner;
pub mod service;
pub mod synthesizer;

pub use assembler::Assembler;
pub use language::LanguageCode;
pub use model::{AudioSegment, AudioTrack, LanguageOutcome, LanguageStage, RunReport};
pub use sectioner::section;
pub use service::NarrationService;
pub use synthesizer::Synthesizer;
