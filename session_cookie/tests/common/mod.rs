pub mod user_agents;

use std::sync::{Arc, Mutex};

use session_cookie::{CookieIssuer, DiagnosticsSink};

/// Diagnostics sink that remembers every warning
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Issuer with the default platform parser and a recording sink
pub fn recording_issuer() -> (CookieIssuer, Arc<RecordingDiagnostics>) {
    let recorder = Arc::new(RecordingDiagnostics::default());
    let issuer = CookieIssuer::default().with_diagnostics(recorder.clone());
    (issuer, recorder)
}
