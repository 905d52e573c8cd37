pub mod gemini;
mod script_writer;
mod selector;
mod synthesizer;

pub use script_writer::ScriptWriter;
pub use selector::{PaperSelector, Selection};
pub use synthesizer::{SpeechSynthesizer, SynthesizedAudio};
