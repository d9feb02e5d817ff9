mod mock_captcha;
mod mock_gateway;

pub use mock_captcha::{MockCaptchaVerifier, MockTokenProvider};
pub use mock_gateway::MockSubmissionGateway;
