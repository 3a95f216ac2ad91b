use media3p_engine::NotificationSink;

/// Prints user-facing errors to stderr, where the editor would show a snackbar.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl NotificationSink for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("error: {message}");
    }
}
