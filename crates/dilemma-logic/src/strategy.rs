//! Strategy definitions and execution

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::random::SeededRng;
use crate::state::RoundState;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Cooperate,
    Defect,
}

impl Action {
    /// The other action.
    pub fn flipped(self) -> Action {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    pub fn is_cooperate(self) -> bool {
        matches!(self, Action::Cooperate)
    }
}

/// Fixed PROBER opening: a single defection inside an otherwise
/// cooperative run.
const PROBE_SEQUENCE: [Action; 4] = [
    Action::Cooperate,
    Action::Defect,
    Action::Cooperate,
    Action::Cooperate,
];

/// Score-difference threshold at which RIVAL switches into catch-up mode.
const RIVAL_THRESHOLD: f64 = 5.0;

/// Opponent defections in a row that make TROJAN abandon exploitation.
const TROJAN_FAIL_STREAK: u32 = 3;

/// Length of TROJAN's cooperative-recovery phase.
const TROJAN_RECOVERY_ROUNDS: u32 = 3;

/// A strategy instance: one variant's decision logic plus its private
/// per-match memory and running score.
///
/// Instances are built fresh per match by [`Strategy::from_name`] and are
/// never reused across matches.
#[derive(Clone, Debug)]
pub struct Strategy {
    kind: Kind,
    score: f64,
}

#[derive(Clone, Debug)]
enum Kind {
    AlwaysCooperate,
    AlwaysDefect,
    TitForTat,
    GrimTrigger { opponent_defected: bool },
    Pavlov,
    Random { p: f64 },
    Contrite(ContriteState),
    Prober(ProberState),
    Trojan(TrojanState),
    Rival(RivalState),
}

/// CTFT bookkeeping: contrition plus the intended/actual pair from the
/// previous round, reported back by the match engine after noise resolution.
#[derive(Clone, Copy, Debug)]
struct ContriteState {
    contrite: bool,
    last_intended: Action,
    last_actual: Action,
}

impl Default for ContriteState {
    fn default() -> Self {
        Self {
            contrite: false,
            last_intended: Action::Cooperate,
            last_actual: Action::Cooperate,
        }
    }
}

/// Exploitability belief formed from a probe reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verdict {
    Undecided,
    Exploitable,
    NotExploitable,
}

/// PROBER memory: the verdict plus the opponent moves observed while the
/// probe sequence was running.
#[derive(Clone, Debug)]
struct ProberState {
    /// Round currently being played; drives probe-phase noise immunity.
    round: u32,
    verdict: Verdict,
    /// Set when the opponent defected through the whole probe.
    punish: bool,
    /// Opponent's moves in rounds 1..=4, logged as they become visible.
    opponent_moves: Vec<Action>,
}

impl Default for ProberState {
    fn default() -> Self {
        Self {
            round: 0,
            verdict: Verdict::Undecided,
            punish: false,
            opponent_moves: Vec::new(),
        }
    }
}

/// TROJAN memory: cooperative-phase length (redrawn per match), verdict,
/// opponent defect streak and the recovery-phase counters.
#[derive(Clone, Copy, Debug)]
struct TrojanState {
    coop_rounds: u32,
    verdict: Verdict,
    defect_streak: u32,
    recovery: bool,
    recovery_round: u32,
}

impl Default for TrojanState {
    fn default() -> Self {
        Self {
            coop_rounds: 5,
            verdict: Verdict::Undecided,
            defect_streak: 0,
            recovery: false,
            recovery_round: 0,
        }
    }
}

/// RIVAL memory: catch-up mode and the armed one-shot recovery cooperation.
#[derive(Clone, Copy, Debug, Default)]
struct RivalState {
    catchup: bool,
    recovery_coop: bool,
}

impl Strategy {
    /// Build a fresh instance from a strategy name token.
    ///
    /// Literal names map to the fixed variants; a token of the form
    /// `RND<p>` (e.g. `RND0.3`) builds the random strategy with cooperation
    /// probability `p`. Anything else is rejected.
    pub fn from_name(token: &str) -> Result<Self, SimError> {
        let kind = match token {
            "ALLC" => Kind::AlwaysCooperate,
            "ALLD" => Kind::AlwaysDefect,
            "TFT" => Kind::TitForTat,
            "GRIM" => Kind::GrimTrigger {
                opponent_defected: false,
            },
            "PAVLOV" => Kind::Pavlov,
            "CTFT" => Kind::Contrite(ContriteState::default()),
            "PROBER" => Kind::Prober(ProberState::default()),
            "TROJAN" => Kind::Trojan(TrojanState::default()),
            "RIVAL" => Kind::Rival(RivalState::default()),
            other => {
                let Some(prob) = other.strip_prefix("RND") else {
                    return Err(SimError::UnknownStrategy(other.to_string()));
                };
                let p: f64 = prob
                    .parse()
                    .map_err(|_| SimError::UnknownStrategy(other.to_string()))?;
                if !(0.0..=1.0).contains(&p) {
                    return Err(SimError::InvalidConfig(format!(
                        "RND probability {p} outside [0, 1]"
                    )));
                }
                Kind::Random { p }
            }
        };
        Ok(Self { kind, score: 0.0 })
    }

    /// Display name; the random family renders its parameter.
    pub fn name(&self) -> String {
        match &self.kind {
            Kind::AlwaysCooperate => "ALLC".to_string(),
            Kind::AlwaysDefect => "ALLD".to_string(),
            Kind::TitForTat => "TFT".to_string(),
            Kind::GrimTrigger { .. } => "GRIM".to_string(),
            Kind::Pavlov => "PAVLOV".to_string(),
            Kind::Random { p } => format!("RND({p})"),
            Kind::Contrite(_) => "CTFT".to_string(),
            Kind::Prober(_) => "PROBER".to_string(),
            Kind::Trojan(_) => "TROJAN".to_string(),
            Kind::Rival(_) => "RIVAL".to_string(),
        }
    }

    /// Execute one round's decision.
    pub fn decide(&mut self, state: &RoundState, rng: &mut SeededRng) -> Action {
        match &mut self.kind {
            Kind::AlwaysCooperate => Action::Cooperate,
            Kind::AlwaysDefect => Action::Defect,
            Kind::TitForTat => decide_tit_for_tat(state),
            Kind::GrimTrigger { opponent_defected } => decide_grim(opponent_defected, state),
            Kind::Pavlov => decide_pavlov(state),
            Kind::Random { p } => decide_random(*p, rng),
            Kind::Contrite(s) => decide_contrite(s, state),
            Kind::Prober(s) => decide_prober(s, state),
            Kind::Trojan(s) => decide_trojan(s, state, rng),
            Kind::Rival(s) => decide_rival(s, state),
        }
    }

    /// Whether this round's chosen action must not be flipped by noise.
    ///
    /// True only while PROBER is emitting its fixed probe sequence and while
    /// CTFT is contrite: both are pre-committed signals that a flip would
    /// corrupt.
    pub fn noise_immune(&self) -> bool {
        match &self.kind {
            Kind::Prober(s) => s.round >= 1 && s.round <= PROBE_SEQUENCE.len() as u32,
            Kind::Contrite(s) => s.contrite,
            _ => false,
        }
    }

    /// Report the intended (pre-noise) and actual (post-noise) own action
    /// for the round just resolved. Only CTFT reads the distinction.
    pub fn observe_outcome(&mut self, intended: Action, actual: Action) {
        if let Kind::Contrite(s) = &mut self.kind {
            s.last_intended = intended;
            s.last_actual = actual;
        }
    }

    /// Add a round payoff to the running total.
    pub fn add_score(&mut self, points: f64) {
        self.score += points;
    }

    /// Zero the accumulator. Called exactly once at every match start.
    pub fn reset_score(&mut self) {
        self.score = 0.0;
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Tit-for-Tat: copy opponent's last move, start with cooperate
fn decide_tit_for_tat(state: &RoundState) -> Action {
    if state.first_round {
        Action::Cooperate
    } else {
        state.opponent_last
    }
}

/// Grim Trigger: cooperate until the opponent defects once, then always defect
fn decide_grim(opponent_defected: &mut bool, state: &RoundState) -> Action {
    if state.first_round {
        *opponent_defected = false;
        return Action::Cooperate;
    }
    if state.opponent_last == Action::Defect {
        *opponent_defected = true;
    }
    if *opponent_defected {
        Action::Defect
    } else {
        Action::Cooperate
    }
}

/// Pavlov: win-stay, lose-shift on the previous action pair
fn decide_pavlov(state: &RoundState) -> Action {
    if state.first_round {
        return Action::Cooperate;
    }
    if state.own_last == state.opponent_last {
        // Matched outcome: stay
        state.own_last
    } else {
        // Mismatched: switch
        state.own_last.flipped()
    }
}

/// RND(p): cooperate with probability p, independently each round
fn decide_random(p: f64, rng: &mut SeededRng) -> Action {
    if rng.next_f64() < p {
        Action::Cooperate
    } else {
        Action::Defect
    }
}

/// Contrite Tit-for-Tat: TFT that apologizes for its own noise-caused
/// defections instead of entering a retaliation spiral.
fn decide_contrite(s: &mut ContriteState, state: &RoundState) -> Action {
    if state.first_round {
        *s = ContriteState::default();
        return Action::Cooperate;
    }

    // While contrite, keep cooperating until the opponent cooperates again.
    if s.contrite {
        if state.opponent_last == Action::Cooperate {
            s.contrite = false;
        } else {
            return Action::Cooperate;
        }
    }

    // Own intended-Cooperate came out as Defect last round and the opponent
    // hit back: apologize rather than mirror the retaliation.
    if s.last_intended == Action::Cooperate
        && s.last_actual == Action::Defect
        && state.opponent_last == Action::Defect
    {
        s.contrite = true;
        return Action::Cooperate;
    }

    state.opponent_last
}

/// PROBER: fixed 4-round probe, then defect forever against opponents that
/// tolerated the probe defection, mirror everyone else.
fn decide_prober(s: &mut ProberState, state: &RoundState) -> Action {
    if state.first_round {
        *s = ProberState::default();
        s.round = 1;
        return PROBE_SEQUENCE[0];
    }
    s.round = state.round;

    let probe_len = PROBE_SEQUENCE.len() as u32;
    if state.round <= probe_len {
        // Rounds 2..=4: log the opponent's reply to the previous probe move.
        s.opponent_moves.push(state.opponent_last);
        // The reply to the round-2 defection arrives in round 3 and becomes
        // visible at the round-4 decision; that reply is the verdict.
        if state.round == probe_len && s.verdict == Verdict::Undecided {
            s.verdict = if state.opponent_last == Action::Cooperate {
                Verdict::Exploitable
            } else {
                Verdict::NotExploitable
            };
        }
        return PROBE_SEQUENCE[(state.round - 1) as usize];
    }

    // First post-probe round: complete the log with the opponent's final
    // probe-phase move.
    if state.round == probe_len + 1 {
        s.opponent_moves.push(state.opponent_last);
    }

    if s.verdict == Verdict::Exploitable || s.punish {
        return Action::Defect;
    }

    if state.round == probe_len + 1 {
        if s.opponent_moves.iter().all(|m| *m == Action::Defect) {
            // Unconditional defector: no goodwill to extend.
            s.punish = true;
            return Action::Defect;
        }
        // One goodwill cooperation before settling into mirroring.
        return Action::Cooperate;
    }

    state.opponent_last
}

/// TROJAN: hide behind a cooperative opening of random length, probe once,
/// exploit tolerant opponents and retreat to mirroring when punished.
fn decide_trojan(s: &mut TrojanState, state: &RoundState, rng: &mut SeededRng) -> Action {
    if state.first_round {
        *s = TrojanState::default();
        s.coop_rounds = rng.next_range_inclusive(5, 10);
        return Action::Cooperate;
    }

    let probe_round = s.coop_rounds + 1;

    if state.round <= s.coop_rounds {
        return Action::Cooperate;
    }
    if state.round == probe_round {
        return Action::Defect;
    }
    // The opponent's reply to the probe is played in round probe+1 and
    // becomes visible here, one round later.
    if state.round == probe_round + 2 && s.verdict == Verdict::Undecided {
        s.verdict = if state.opponent_last == Action::Cooperate {
            Verdict::Exploitable
        } else {
            Verdict::NotExploitable
        };
    }

    if s.recovery {
        s.recovery_round += 1;
        if s.recovery_round >= TROJAN_RECOVERY_ROUNDS {
            s.recovery = false;
            if state.opponent_last == Action::Cooperate {
                // Forgiven: resume exploiting.
                s.verdict = Verdict::Exploitable;
                s.defect_streak = 0;
                return Action::Defect;
            }
            // Not forgiven: give up exploitation for good.
            s.verdict = Verdict::NotExploitable;
            return state.opponent_last;
        }
        return Action::Cooperate;
    }

    if s.verdict == Verdict::Exploitable {
        if state.opponent_last == Action::Defect {
            s.defect_streak += 1;
        } else {
            s.defect_streak = 0;
        }
        if s.defect_streak >= TROJAN_FAIL_STREAK {
            s.recovery = true;
            s.recovery_round = 0;
            return Action::Cooperate;
        }
        return Action::Defect;
    }

    // Not exploitable, or verdict still pending: mirror.
    state.opponent_last
}

/// RIVAL: defect relentlessly while behind on score, offer one cooperation
/// once the lead is recovered, then mirror.
fn decide_rival(s: &mut RivalState, state: &RoundState) -> Action {
    if state.first_round {
        *s = RivalState::default();
        return Action::Cooperate;
    }

    let score_diff = state.own_score - state.opponent_score;

    if score_diff <= -RIVAL_THRESHOLD || (score_diff == 0.0 && s.catchup) {
        s.catchup = true;
        s.recovery_coop = false;
    } else if score_diff >= RIVAL_THRESHOLD && s.catchup {
        s.catchup = false;
        s.recovery_coop = true;
    }

    if s.catchup {
        return Action::Defect;
    }
    if s.recovery_coop {
        s.recovery_coop = false;
        return Action::Cooperate;
    }
    state.opponent_last
}
