pub mod encoder;
pub mod paper_index;
pub mod script_writer;
pub mod selector;
pub mod synthesizer;
pub mod video_host;
