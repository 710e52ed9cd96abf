//! The interdependencies between Enhanced ShockBurst features.
//!
//! Some features only work on top of others. Enabling a feature therefore
//! expands into a list of steps where every prerequisite comes before the
//! feature that needs it. Both [`RadioConfig`](super::RadioConfig) and the
//! driver walk the same list so the cached and the real register state
//! agree on what got turned on.

/// A feature that may be enabled per pipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EsbFeature {
    /// Automatic acknowledgement of received packets (EN_AA).
    AutoAck,
    /// Dynamically sized payloads (FEATURE.EN_DPL + DYNPD).
    DynamicPayload,
    /// Payloads attached to ACK packets (FEATURE.EN_ACK_PAY).
    AckPayload,
}

/// Which pipe a prerequisite applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PipeOf {
    /// The pipe the dependent feature is enabled on.
    Same,
    /// A specific pipe.
    Fixed(u8),
}

struct Requirement {
    feature: EsbFeature,
    requires: EsbFeature,
    pipe: PipeOf,
}

const REQUIREMENTS: [Requirement; 2] = [
    Requirement {
        feature: EsbFeature::DynamicPayload,
        requires: EsbFeature::AutoAck,
        pipe: PipeOf::Same,
    },
    Requirement {
        feature: EsbFeature::AckPayload,
        requires: EsbFeature::DynamicPayload,
        pipe: PipeOf::Fixed(0),
    },
];

/// The longest chain of requirements, including the requested feature.
const MAX_STEPS: usize = 3;

/// An ordered list of `(feature, pipe)` steps to enable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EnablePlan {
    steps: [(EsbFeature, u8); MAX_STEPS],
    len: usize,
}

impl EnablePlan {
    /// Expand a request into its prerequisites (first) and itself (last).
    ///
    /// `pipe` is only meaningful for per-pipe features and is passed through as is.
    pub fn new(feature: EsbFeature, pipe: u8) -> Self {
        let mut chain = [(feature, pipe); MAX_STEPS];
        let mut len = 1;
        while len < MAX_STEPS {
            let (current, current_pipe) = chain[len - 1];
            let Some(req) = REQUIREMENTS.iter().find(|r| r.feature == current) else {
                break;
            };
            let req_pipe = match req.pipe {
                PipeOf::Same => current_pipe,
                PipeOf::Fixed(p) => p,
            };
            chain[len] = (req.requires, req_pipe);
            len += 1;
        }
        chain[..len].reverse();
        Self { steps: chain, len }
    }

    pub fn steps(&self) -> &[(EsbFeature, u8)] {
        &self.steps[..self.len]
    }

    /// Does any step (re)enable auto-ack?
    pub fn needs_auto_ack(&self) -> bool {
        self.steps()
            .iter()
            .any(|(feature, _)| *feature == EsbFeature::AutoAck)
    }
}
