//! Player policies.
//!
//! The engine never knows what drives the other explorers. Rule-based
//! bots, learned models and scripted test players all plug in through
//! `PlayerPolicy`.

use crate::core::TempleRng;
use crate::round::Decision;

use super::observation::Observation;

/// Chooses stay or leave from an observation.
pub trait PlayerPolicy: Send + Sync {
    fn decide(&self, observation: &Observation, rng: &mut TempleRng) -> Decision;
}

impl<P: PlayerPolicy + ?Sized> PlayerPolicy for Box<P> {
    fn decide(&self, observation: &Observation, rng: &mut TempleRng) -> Decision {
        (**self).decide(observation, rng)
    }
}

impl<P: PlayerPolicy + ?Sized> PlayerPolicy for &P {
    fn decide(&self, observation: &Observation, rng: &mut TempleRng) -> Decision {
        (**self).decide(observation, rng)
    }
}

/// Never leaves voluntarily.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysStay;

impl PlayerPolicy for AlwaysStay {
    fn decide(&self, _observation: &Observation, _rng: &mut TempleRng) -> Decision {
        Decision::Stay
    }
}

/// Leaves at the first opportunity.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysLeave;

impl PlayerPolicy for AlwaysLeave {
    fn decide(&self, _observation: &Observation, _rng: &mut TempleRng) -> Decision {
        Decision::Leave
    }
}

/// Rule-based opponent used when no trained model is available.
///
/// Once enough hazards are showing or the pocket is large enough, leaves
/// with `leave_probability`; otherwise stays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskThreshold {
    /// Leave-eligible when total revealed hazards reach this.
    pub hazard_threshold: u32,
    /// Leave-eligible when the pocket exceeds this.
    pub pocket_threshold: u32,
    pub leave_probability: f64,
}

impl Default for RiskThreshold {
    fn default() -> Self {
        Self {
            hazard_threshold: 2,
            pocket_threshold: 8,
            leave_probability: 0.8,
        }
    }
}

impl RiskThreshold {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hazard_threshold(mut self, threshold: u32) -> Self {
        self.hazard_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_pocket_threshold(mut self, threshold: u32) -> Self {
        self.pocket_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_leave_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "leave probability must be within [0, 1]"
        );
        self.leave_probability = probability;
        self
    }

    fn at_risk(&self, observation: &Observation) -> bool {
        observation.total_hazards() >= self.hazard_threshold
            || observation.pocket > self.pocket_threshold
    }
}

impl PlayerPolicy for RiskThreshold {
    fn decide(&self, observation: &Observation, rng: &mut TempleRng) -> Decision {
        if self.at_risk(observation) && rng.gen_bool(self.leave_probability) {
            Decision::Leave
        } else {
            Decision::Stay
        }
    }
}

/// Adapts a closure into a policy.
pub struct FnPolicy<F>(pub F);

impl<F> PlayerPolicy for FnPolicy<F>
where
    F: Fn(&Observation, &mut TempleRng) -> Decision + Send + Sync,
{
    fn decide(&self, observation: &Observation, rng: &mut TempleRng) -> Decision {
        (self.0)(observation, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(pocket: u32, hazards: [u8; 5]) -> Observation {
        Observation {
            round_number: 1,
            pocket,
            path_gems: 0,
            path_artifacts: 0,
            hazard_counts: hazards,
            deck_remaining: 20,
            active_players: 4,
        }
    }

    #[test]
    fn test_fixed_policies() {
        let mut rng = TempleRng::new(0);
        let obs = observation(0, [0; 5]);
        assert_eq!(AlwaysStay.decide(&obs, &mut rng), Decision::Stay);
        assert_eq!(AlwaysLeave.decide(&obs, &mut rng), Decision::Leave);
    }

    #[test]
    fn test_risk_threshold_stays_when_safe() {
        let policy = RiskThreshold::new().with_leave_probability(1.0);
        let mut rng = TempleRng::new(0);

        assert_eq!(policy.decide(&observation(8, [1, 0, 0, 0, 0]), &mut rng), Decision::Stay);
        assert_eq!(policy.decide(&observation(9, [0; 5]), &mut rng), Decision::Leave);
        assert_eq!(policy.decide(&observation(0, [1, 1, 0, 0, 0]), &mut rng), Decision::Leave);
    }

    #[test]
    fn test_risk_threshold_is_probabilistic() {
        let policy = RiskThreshold::default();
        let mut rng = TempleRng::new(17);
        let obs = observation(20, [0; 5]);

        let leaves = (0..1000)
            .filter(|_| policy.decide(&obs, &mut rng) == Decision::Leave)
            .count();
        assert!((700..900).contains(&leaves), "leaves = {leaves}");
    }

    #[test]
    fn test_fn_policy_and_boxing() {
        let policy: Box<dyn PlayerPolicy> =
            Box::new(FnPolicy(|obs: &Observation, _: &mut TempleRng| {
                if obs.path_gems > 3 {
                    Decision::Leave
                } else {
                    Decision::Stay
                }
            }));
        let mut rng = TempleRng::new(0);

        let mut obs = observation(0, [0; 5]);
        assert_eq!(policy.decide(&obs, &mut rng), Decision::Stay);
        obs.path_gems = 4;
        assert_eq!(policy.decide(&obs, &mut rng), Decision::Leave);
    }
}
