//! Request and response records for the three opponent operations. The
//! transport that carries them lives outside this crate.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::game::{Action, NUM_ACTIONS, STATE_SIZE};
use crate::training::Transition;

/// Ask the opponent which attack to launch against the current layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextWaveRequest {
    /// Tower coordinates as `[row, col]`.
    pub towers: Vec<[i64; 2]>,
    #[serde(default = "first_round")]
    pub round: u32,
}

fn first_round() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackDecision {
    pub attack_row: usize,
    pub wave_type: usize,
}

impl AttackDecision {
    /// Index the client reports back in [`FeedbackRequest::action_idx`].
    pub fn action_idx(&self) -> usize {
        Action::from(*self).index()
    }
}

impl From<Action> for AttackDecision {
    fn from(action: Action) -> Self {
        AttackDecision {
            attack_row: action.attack_row,
            wave_type: action.wave_type,
        }
    }
}

impl From<AttackDecision> for Action {
    fn from(decision: AttackDecision) -> Self {
        Action {
            attack_row: decision.attack_row,
            wave_type: decision.wave_type,
        }
    }
}

/// Outcome of an attack, reported by the game client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub reward: f64,
    pub state: Vec<f32>,
    pub action_idx: i64,
    pub next_state: Vec<f32>,
    pub done: bool,
    /// Only used to word the taunt.
    pub attack_row: i64,
}

impl FeedbackRequest {
    /// Validate the payload and turn it into a storable transition.
    pub fn to_transition(&self) -> Result<Transition, RequestError> {
        // Finite f64 rewards beyond f32::MAX would become infinite once stored.
        let reward = self.reward as f32;
        if !reward.is_finite() {
            return Err(RequestError::NonFinite { field: "reward" });
        }
        let action = usize::try_from(self.action_idx)
            .ok()
            .filter(|&a| a < NUM_ACTIONS)
            .ok_or(RequestError::ActionOutOfRange {
                index: self.action_idx,
                count: NUM_ACTIONS,
            })?;

        Ok(Transition {
            state: state_array("state", &self.state)?,
            action,
            reward,
            next_state: state_array("next_state", &self.next_state)?,
            done: self.done,
        })
    }
}

fn state_array(field: &'static str, values: &[f32]) -> Result<[f32; STATE_SIZE], RequestError> {
    let array: [f32; STATE_SIZE] = values.try_into().map_err(|_| RequestError::StateLength {
        field,
        expected: STATE_SIZE,
        actual: values.len(),
    })?;
    if array.iter().any(|v| !v.is_finite()) {
        return Err(RequestError::NonFinite { field });
    }
    Ok(array)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TauntMessage {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub trained: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback() -> FeedbackRequest {
        let mut state = vec![0.0; STATE_SIZE];
        state[60] = 3.0;
        FeedbackRequest {
            reward: 1.0,
            state: state.clone(),
            action_idx: 5,
            next_state: state,
            done: true,
            attack_row: 1,
        }
    }

    #[test]
    fn test_round_defaults_to_one() {
        let req: NextWaveRequest = serde_json::from_str(r#"{"towers": [[0, 0], [0, 1]]}"#).unwrap();
        assert_eq!(req.round, 1);
        assert_eq!(req.towers, vec![[0, 0], [0, 1]]);
    }

    #[test]
    fn test_missing_towers_is_rejected() {
        let res: Result<NextWaveRequest, _> = serde_json::from_str(r#"{"round": 3}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_feedback_from_client_json() {
        let json = serde_json::json!({
            "reward": -1,
            "state": vec![0.0; STATE_SIZE],
            "action_idx": 23,
            "next_state": vec![0.0; STATE_SIZE],
            "done": true,
            "attack_row": 7
        });
        let req: FeedbackRequest = serde_json::from_value(json).unwrap();
        let t = req.to_transition().unwrap();
        assert_eq!(t.action, 23);
        assert_eq!(t.reward, -1.0);
        assert!(t.done);
    }

    #[test]
    fn test_to_transition_valid() {
        let t = feedback().to_transition().unwrap();
        assert_eq!(t.action, 5);
        assert_eq!(t.state[60], 3.0);
    }

    #[test]
    fn test_to_transition_rejects_bad_action() {
        for idx in [-1, 24, 1000] {
            let req = FeedbackRequest {
                action_idx: idx,
                ..feedback()
            };
            assert_eq!(
                req.to_transition().unwrap_err(),
                RequestError::ActionOutOfRange {
                    index: idx,
                    count: NUM_ACTIONS
                }
            );
        }
    }

    #[test]
    fn test_to_transition_rejects_short_state() {
        let req = FeedbackRequest {
            next_state: vec![0.0; 10],
            ..feedback()
        };
        assert_eq!(
            req.to_transition().unwrap_err(),
            RequestError::StateLength {
                field: "next_state",
                expected: STATE_SIZE,
                actual: 10
            }
        );
    }

    #[test]
    fn test_to_transition_rejects_non_finite() {
        let req = FeedbackRequest {
            reward: f64::NAN,
            ..feedback()
        };
        assert_eq!(
            req.to_transition().unwrap_err(),
            RequestError::NonFinite { field: "reward" }
        );

        for reward in [1e300, -1e300, f64::INFINITY] {
            let req = FeedbackRequest {
                reward,
                ..feedback()
            };
            assert_eq!(
                req.to_transition().unwrap_err(),
                RequestError::NonFinite { field: "reward" },
                "reward {} should be rejected",
                reward
            );
        }

        let mut state = vec![0.0; STATE_SIZE];
        state[0] = f32::INFINITY;
        let req = FeedbackRequest { state, ..feedback() };
        assert_eq!(
            req.to_transition().unwrap_err(),
            RequestError::NonFinite { field: "state" }
        );
    }

    #[test]
    fn test_decision_action_index() {
        let decision = AttackDecision {
            attack_row: 2,
            wave_type: 1,
        };
        assert_eq!(decision.action_idx(), 7);
    }
}
