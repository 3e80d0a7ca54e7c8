/// One interaction on a connector's 3DS challenge page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeStep {
    Click {
        frames: &'static [&'static str],
        selector: &'static str,
    },
    Fill {
        frames: &'static [&'static str],
        selector: &'static str,
        value: &'static str,
    },
}

const STRIPE_FRAMES: &[&str] = &["iframe[name^='__privateStripeFrame']", "#challengeFrame"];
const CYBERSOURCE_FRAMES: &[&str] = &["#step-up-iframe", "#cardinal-stepUpIframe"];
const ADYEN_FRAMES: &[&str] = &["iframe[name='threeDSIframe']"];

const STRIPE: &[ChallengeStep] = &[ChallengeStep::Click {
    frames: STRIPE_FRAMES,
    selector: "#test-source-authorize-3ds",
}];

const CYBERSOURCE: &[ChallengeStep] = &[
    ChallengeStep::Fill {
        frames: CYBERSOURCE_FRAMES,
        selector: "input[name='challengeDataEntry']",
        value: "1234",
    },
    ChallengeStep::Click {
        frames: CYBERSOURCE_FRAMES,
        selector: "input[value='SUBMIT']",
    },
];

const ADYEN: &[ChallengeStep] = &[
    ChallengeStep::Fill {
        frames: ADYEN_FRAMES,
        selector: "input[type='password']",
        value: "password",
    },
    ChallengeStep::Click {
        frames: ADYEN_FRAMES,
        selector: "#buttonSubmit",
    },
];

/// Challenge interactions for a connector
///
/// Connectors without an entry are frictionless: the service redirects straight
/// back to the return URL.
pub fn challenge_steps(connector_id: &str) -> &'static [ChallengeStep] {
    match connector_id.to_lowercase().as_str() {
        "stripe" => STRIPE,
        "cybersource" => CYBERSOURCE,
        "adyen" => ADYEN,
        _ => &[],
    }
}
