//! Check-in Controller
//!
//! The one component of this system: a linear pipeline run once per scanned
//! QR code. It sequences bot-trap check, booth-ID extraction, geolocation,
//! fingerprinting, token derivation, submission and result dispatch, and
//! drives the three-screen display surface. Every failure path is terminal
//! for the run; nothing is retried.

use crate::config::CheckinConfig;
use crate::error::CheckinError;
use crate::gateway::VoteGateway;
use crate::platform::{FingerprintProvider, LocationProvider};
use crate::query;
use crate::screen::ScreenSink;
use crate::token;
use crate::types::{BoothId, DisplayState, GeoOptions, ServerResult, VoteSubmission};
use chrono::Utc;
use tracing::{debug, info, warn};

/// One scanned check-in request
#[derive(Debug, Clone)]
pub struct CheckinRequest {
    /// The scanned QR code's target URL (or its bare query string)
    pub scanned_url: String,
    /// Honey-pot value; must be empty for human traffic
    pub honey_pot: String,
}

impl CheckinRequest {
    /// Request for a scanned URL with an empty honey pot
    #[inline]
    #[must_use]
    pub fn new(scanned_url: impl Into<String>) -> Self {
        Self {
            scanned_url: scanned_url.into(),
            honey_pot: String::new(),
        }
    }

    /// With a honey-pot value
    #[inline]
    #[must_use]
    pub fn with_honey_pot(mut self, value: impl Into<String>) -> Self {
        self.honey_pot = value.into();
        self
    }
}

/// The check-in controller
///
/// Owns the configuration and the three external seams. One call to
/// [`CheckinController::run`] produces exactly one terminal display state.
#[derive(Debug)]
pub struct CheckinController<L, F, G> {
    config: CheckinConfig,
    location: L,
    fingerprint: F,
    gateway: G,
}

impl<L, F, G> CheckinController<L, F, G>
where
    L: LocationProvider,
    F: FingerprintProvider,
    G: VoteGateway,
{
    /// Create a controller over the given seams
    #[inline]
    #[must_use]
    pub fn new(config: CheckinConfig, location: L, fingerprint: F, gateway: G) -> Self {
        Self {
            config,
            location,
            fingerprint,
            gateway,
        }
    }

    /// Run the check-in flow once
    ///
    /// # Workflow
    /// 1. Bot trap: a non-empty honey pot short-circuits to the error screen
    /// 2. Extract the booth ID from the scanned URL
    /// 3. Resolve a fresh high-accuracy position
    /// 4. Resolve the visitor fingerprint
    /// 5. Derive the integrity token
    /// 6. Cosmetic pause, then submit
    /// 7. Dispatch the server outcome onto a screen
    ///
    /// The bot and missing-booth paths reach neither the platform seams nor
    /// the network. Returns the terminal display state.
    pub async fn run(&self, request: &CheckinRequest, screen: &mut dyn ScreenSink) -> DisplayState {
        screen.show_loading();

        // 1. Bot trap: heuristic, not a security boundary
        if !request.honey_pot.is_empty() {
            warn!("honey-pot value present, aborting");
            return fail(screen, &CheckinError::BotDetected);
        }

        // 2. Booth ID from the scanned URL
        let Some(booth_id) = query::booth_id(&request.scanned_url) else {
            warn!("scanned URL carries no booth ID");
            return fail(screen, &CheckinError::MissingBoothId);
        };
        info!(%booth_id, "starting check-in");

        match self.attempt(&booth_id).await {
            Ok(()) => {
                info!(%booth_id, "vote recorded");
                screen.show_success();
                DisplayState::Success
            }
            Err(error) => {
                warn!(%booth_id, %error, "check-in failed");
                fail(screen, &error)
            }
        }
    }

    /// The suspending part of the pipeline, behind one error boundary
    async fn attempt(&self, booth_id: &BoothId) -> Result<(), CheckinError> {
        // 3. Geolocation: fresh, high accuracy, bounded wait
        let options = GeoOptions {
            timeout: self.config.location_timeout,
            ..GeoOptions::default()
        };
        let position = self.location.current_position(&options).await?;
        debug!(lat = position.lat, lng = position.lng, "position resolved");

        // 4. Device fingerprint
        let visitor_id = self.fingerprint.visitor_id().await?;
        debug!(%visitor_id, "fingerprint resolved");

        // 5. Token binds visitor, booth and timestamp
        let timestamp = Utc::now().timestamp_millis();
        let token = token::derive(&visitor_id, booth_id, timestamp, &self.config.salt);

        let submission = VoteSubmission {
            booth_id: booth_id.as_str().to_string(),
            visitor_id: visitor_id.as_str().to_string(),
            lat: position.lat,
            lng: position.lng,
            timestamp,
            token,
        };

        // 6. Cosmetic pause so the loading screen gets its moment
        tokio::time::sleep(self.config.submit_delay).await;

        // 7. Single submission, then dispatch
        match self.gateway.submit(&submission).await? {
            ServerResult::Success => Ok(()),
            rejection => Err(CheckinError::from_rejection(rejection)),
        }
    }
}

fn fail(screen: &mut dyn ScreenSink, error: &CheckinError) -> DisplayState {
    screen.show_error(&error.user_message());
    DisplayState::Error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LocationError;
    use crate::gateway::MockVoteGateway;
    use crate::platform::{MockFingerprintProvider, MockLocationProvider};
    use crate::types::{GeoPosition, VisitorId};
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct RecordingScreen {
        states: Vec<DisplayState>,
        message: Option<String>,
    }

    impl ScreenSink for RecordingScreen {
        fn show_loading(&mut self) {
            self.states.push(DisplayState::Loading);
        }

        fn show_success(&mut self) {
            self.states.push(DisplayState::Success);
        }

        fn show_error(&mut self, message: &str) {
            self.states.push(DisplayState::Error);
            self.message = Some(message.to_string());
        }
    }

    fn config() -> CheckinConfig {
        CheckinConfig::new("https://vote.example.com/api", "810810114514")
            .with_submit_delay(Duration::ZERO)
    }

    fn working_location() -> MockLocationProvider {
        let mut location = MockLocationProvider::new();
        location
            .expect_current_position()
            .returning(|_| Ok(GeoPosition { lat: 35.0, lng: 139.0 }));
        location
    }

    fn working_fingerprint() -> MockFingerprintProvider {
        let mut fingerprint = MockFingerprintProvider::new();
        fingerprint
            .expect_visitor_id()
            .returning(|| Ok(VisitorId::new("fp-stable-01")));
        fingerprint
    }

    fn gateway_answering(result: ServerResult) -> MockVoteGateway {
        let mut gateway = MockVoteGateway::new();
        gateway
            .expect_submit()
            .returning(move |_| Ok(result.clone()));
        gateway
    }

    #[tokio::test]
    async fn success_path_shows_success_screen() {
        let controller = CheckinController::new(
            config(),
            working_location(),
            working_fingerprint(),
            gateway_answering(ServerResult::Success),
        );

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("https://vote.example.com/c?booth=booth-1");
        let state = controller.run(&request, &mut screen).await;

        assert_eq!(state, DisplayState::Success);
        assert_eq!(screen.states, vec![DisplayState::Loading, DisplayState::Success]);
        assert!(screen.message.is_none());
    }

    #[tokio::test]
    async fn honey_pot_short_circuits_without_any_calls() {
        // Mocks carry no expectations: any call would panic the test.
        let controller = CheckinController::new(
            config(),
            MockLocationProvider::new(),
            MockFingerprintProvider::new(),
            MockVoteGateway::new(),
        );

        let mut screen = RecordingScreen::default();
        let request =
            CheckinRequest::new("https://vote.example.com/c?booth=booth-1").with_honey_pot("bot");
        let state = controller.run(&request, &mut screen).await;

        assert_eq!(state, DisplayState::Error);
        assert_eq!(screen.message.as_deref(), Some("Invalid access detected."));
    }

    #[tokio::test]
    async fn missing_booth_short_circuits_without_any_calls() {
        let controller = CheckinController::new(
            config(),
            MockLocationProvider::new(),
            MockFingerprintProvider::new(),
            MockVoteGateway::new(),
        );

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("https://vote.example.com/c?lang=ja");
        let state = controller.run(&request, &mut screen).await;

        assert_eq!(state, DisplayState::Error);
        assert!(screen
            .message
            .as_deref()
            .unwrap()
            .contains("No booth ID was found"));
    }

    #[tokio::test]
    async fn location_request_uses_configured_options() {
        let mut location = MockLocationProvider::new();
        location
            .expect_current_position()
            .withf(|options| {
                options.high_accuracy
                    && options.timeout == Duration::from_secs(10)
                    && options.maximum_age.is_zero()
            })
            .returning(|_| Ok(GeoPosition { lat: 35.0, lng: 139.0 }));

        let controller = CheckinController::new(
            config(),
            location,
            working_fingerprint(),
            gateway_answering(ServerResult::Success),
        );

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("booth=booth-1");
        let state = controller.run(&request, &mut screen).await;
        assert_eq!(state, DisplayState::Success);
    }

    #[tokio::test]
    async fn submission_carries_reproducible_token() {
        let mut gateway = MockVoteGateway::new();
        gateway
            .expect_submit()
            .withf(|submission| {
                let expected = crate::token::derive(
                    &VisitorId::new(&submission.visitor_id),
                    &BoothId::new(&submission.booth_id),
                    submission.timestamp,
                    "810810114514",
                );
                submission.booth_id == "booth-1"
                    && submission.visitor_id == "fp-stable-01"
                    && submission.lat == 35.0
                    && submission.lng == 139.0
                    && submission.token == expected
            })
            .returning(|_| Ok(ServerResult::Success));

        let controller =
            CheckinController::new(config(), working_location(), working_fingerprint(), gateway);

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("booth=booth-1");
        let state = controller.run(&request, &mut screen).await;
        assert_eq!(state, DisplayState::Success);
    }

    #[tokio::test]
    async fn duplicate_outcome_names_prior_vote() {
        let controller = CheckinController::new(
            config(),
            working_location(),
            working_fingerprint(),
            gateway_answering(ServerResult::Duplicate),
        );

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("booth=booth-1");
        let state = controller.run(&request, &mut screen).await;

        assert_eq!(state, DisplayState::Error);
        assert!(screen
            .message
            .as_deref()
            .unwrap()
            .contains("already voted"));
    }

    #[tokio::test]
    async fn out_of_area_message_contains_rounded_distance() {
        let controller = CheckinController::new(
            config(),
            working_location(),
            working_fingerprint(),
            gateway_answering(ServerResult::OutOfArea {
                distance: Some(123.4),
            }),
        );

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("booth=booth-1");
        controller.run(&request, &mut screen).await;

        assert!(screen.message.as_deref().unwrap().contains("123"));
    }

    #[tokio::test]
    async fn invalid_token_asks_for_rescan() {
        let controller = CheckinController::new(
            config(),
            working_location(),
            working_fingerprint(),
            gateway_answering(ServerResult::InvalidToken),
        );

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("booth=booth-1");
        controller.run(&request, &mut screen).await;

        assert!(screen
            .message
            .as_deref()
            .unwrap()
            .contains("scan the QR code again"));
    }

    #[tokio::test]
    async fn permission_denial_keeps_location_text() {
        let mut location = MockLocationProvider::new();
        location
            .expect_current_position()
            .returning(|_| Err(LocationError::PermissionDenied));

        // The pipeline never reaches fingerprint or gateway.
        let controller = CheckinController::new(
            config(),
            location,
            MockFingerprintProvider::new(),
            MockVoteGateway::new(),
        );

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("booth=booth-1");
        let state = controller.run(&request, &mut screen).await;

        assert_eq!(state, DisplayState::Error);
        let message = screen.message.unwrap();
        assert!(message.contains("location services"));
        assert!(!message.contains("communication error"));
    }

    #[tokio::test]
    async fn gateway_failure_collapses_to_generic_text() {
        let mut gateway = MockVoteGateway::new();
        gateway
            .expect_submit()
            .returning(|_| Err(CheckinError::HttpStatus { status: 502 }));

        let controller =
            CheckinController::new(config(), working_location(), working_fingerprint(), gateway);

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("booth=booth-1");
        let state = controller.run(&request, &mut screen).await;

        assert_eq!(state, DisplayState::Error);
        assert!(screen
            .message
            .as_deref()
            .unwrap()
            .contains("communication error"));
    }

    #[tokio::test]
    async fn screen_never_returns_to_loading() {
        let controller = CheckinController::new(
            config(),
            working_location(),
            working_fingerprint(),
            gateway_answering(ServerResult::Duplicate),
        );

        let mut screen = RecordingScreen::default();
        let request = CheckinRequest::new("booth=booth-1");
        controller.run(&request, &mut screen).await;

        assert_eq!(screen.states.first(), Some(&DisplayState::Loading));
        assert_eq!(
            screen
                .states
                .iter()
                .filter(|s| **s == DisplayState::Loading)
                .count(),
            1
        );
        assert_eq!(screen.states.last(), Some(&DisplayState::Error));
    }
}
