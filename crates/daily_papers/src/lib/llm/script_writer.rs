use std::{fmt::Debug, future::Future};

/// Turns a paper PDF into a two-speaker podcast transcript.
pub trait ScriptWriter {
    type Error: Debug;

    fn write_script(
        &self,
        pdf_bytes: &[u8],
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
