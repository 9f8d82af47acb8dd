/// Text shown in place of the assistant reply when a send fails.
pub const SEND_FAILURE_NOTICE: &str = "Sorry, there was an error processing your message.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    pub send_failure_notice: String,
    /// After a refresh with nothing selected, open the first (most recent)
    /// session.
    pub auto_select_first: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            send_failure_notice: SEND_FAILURE_NOTICE.to_string(),
            auto_select_first: true,
        }
    }
}
