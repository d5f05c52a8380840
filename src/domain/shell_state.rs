#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    notices: Vec<String>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            notices: Vec::new(),
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn push_notice(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    /// Takes all pending notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}
