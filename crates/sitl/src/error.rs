/// Errors that can occur when configuring host-side tick sources.
#[derive(Debug, thiserror::Error)]
pub enum SitlError {
    #[error("Invalid tick rate: {0} ticks/us")]
    InvalidTickRate(u32),
}
