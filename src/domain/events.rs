/// Console input, already parsed into an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Add a user; `None` means the name still has to be requested.
    JoinRequested(Option<String>),
    LeaveRequested(String),
    MessageSubmitted { from: String, text: String },
    RosterRequested,
    HistoryRequested,
    QuitRequested,
    Unrecognized(String),
}
