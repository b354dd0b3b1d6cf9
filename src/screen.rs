//! Display surface
//!
//! Three mutually exclusive screens: loading, success, error. The
//! controller drives a [`ScreenSink`]; the binary renders to the terminal.

/// Sink for the three check-in screens
///
/// Implementations show exactly one screen at a time. The controller only
/// ever moves forward: loading first, then one terminal screen.
pub trait ScreenSink {
    /// Show the loading screen
    fn show_loading(&mut self);
    /// Show the success screen
    fn show_success(&mut self);
    /// Show the error screen with a user-facing message
    fn show_error(&mut self, message: &str);
}

/// Terminal renderer for the CLI binary
#[derive(Debug, Default)]
pub struct TerminalScreen;

impl ScreenSink for TerminalScreen {
    fn show_loading(&mut self) {
        println!("Checking you in...");
    }

    fn show_success(&mut self) {
        println!();
        println!("Thank you! Your vote has been recorded.");
    }

    fn show_error(&mut self, message: &str) {
        println!();
        println!("Check-in failed: {message}");
    }
}
