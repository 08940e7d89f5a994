//! Contract negotiation between one acquirer and one agent.
//!
//! A round-based state machine:
//!
//! ```text
//! Proposing --offer--> Accepted | Walked | Countered | FinalCounter
//! Countered --offer--> (same as Proposing, round + 1)
//! Countered | FinalCounter --accept_counter--> Accepted
//! any unresolved --withdraw--> Withdrawn
//! ```
//!
//! The walk check runs before the accept check. On the last round an
//! unaccepted offer produces a final counter; from there the acquirer can
//! only take it or withdraw, so every negotiation resolves within the
//! round ceiling.
//!
//! The counterpart's [`Expectation`] never leaves the state except through
//! [`NegotiationState::expectation_view`], filtered by the scouting tier.
//! All state lives in [`NegotiationState`], which serializes so a
//! negotiation can be suspended between rounds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use clout_types::{
    AgencyId, Agent, AgentId, ContractTerms, Mood, NegotiationId, NegotiationStatus, ScoutingTier,
};

use crate::config::NegotiationConfig;
use crate::contract::signing_cost;
use crate::error::AgentError;
use crate::growth::TRAIT_MIDPOINT;
use crate::numeric::{money_to_f64, round_to_u64, scale_money, to_f64};

/// Neutral offer score.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Shortest duration the counterpart will ask for.
const MIN_DURATION_WEEKS: u32 = 12;

/// Longest duration the counterpart will ask for.
const MAX_DURATION_WEEKS: u32 = 104;

// ---------------------------------------------------------------------------
// Expectation
// ---------------------------------------------------------------------------

/// What the counterpart privately wants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// Desired upfront payment.
    pub upfront: Decimal,
    /// Highest revenue share the counterpart wants to give up.
    pub revenue_share: f64,
    /// Desired contract length in weeks.
    pub duration_weeks: u32,
    /// Whether the counterpart is willing to sign exclusively.
    pub accepts_exclusive: bool,
}

impl Expectation {
    /// The offer that exactly matches this expectation.
    pub const fn as_terms(&self) -> ContractTerms {
        ContractTerms {
            upfront: self.upfront,
            revenue_share: self.revenue_share,
            duration_weeks: self.duration_weeks,
            exclusive: self.accepts_exclusive,
        }
    }
}

/// The part of an expectation the acquirer is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum ExpectationView {
    /// Nothing beyond mood.
    Hidden,
    /// Approximate ranges around each term.
    Ranges {
        /// Upfront payment, low and high.
        upfront: (Decimal, Decimal),
        /// Revenue share, low and high.
        revenue_share: (f64, f64),
        /// Duration in weeks, low and high.
        duration_weeks: (u32, u32),
        /// Whether exclusivity is acceptable.
        accepts_exclusive: bool,
    },
    /// The exact expectation.
    Exact(Expectation),
}

/// Derive the counterpart's private expectation from its record.
pub fn generate_expectation(
    agent: &Agent,
    config: &NegotiationConfig,
) -> Result<Expectation, AgentError> {
    let charisma = f64::from(agent.traits.charisma);
    let skill = f64::from(agent.traits.skill);

    let premium = 1.0 + 0.03 * (charisma + skill - 2.0 * TRAIT_MIDPOINT);
    let upfront = scale_money(signing_cost(agent)?, premium.max(0.0));

    let magnitude = to_f64(agent.followers.max(1)).log10();
    let revenue_share = (0.35 - 0.03 * (magnitude - 3.0) - 0.01 * (skill - TRAIT_MIDPOINT))
        .clamp(0.10, 0.50);

    let star_power = f64::midpoint(charisma, skill);
    let duration = round_to_u64(52.0 - 4.0 * (star_power - 5.0));
    let duration_weeks = u32::try_from(duration)
        .unwrap_or(MAX_DURATION_WEEKS)
        .clamp(MIN_DURATION_WEEKS, MAX_DURATION_WEEKS);

    Ok(Expectation {
        upfront,
        revenue_share,
        duration_weeks,
        accepts_exclusive: agent.followers < config.exclusivity_follower_limit,
    })
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score an offer against an expectation, 0--100 with 50 neutral.
///
/// The counterpart favors more money, a smaller share for the acquirer,
/// and a shorter term. Each deviation is relative and clamped to `[-1, 1]`.
pub fn evaluate_offer(
    offer: &ContractTerms,
    expectation: &Expectation,
    config: &NegotiationConfig,
) -> f64 {
    let expected_upfront = money_to_f64(expectation.upfront);
    let payment = relative(money_to_f64(offer.upfront) - expected_upfront, expected_upfront);
    let share = relative(
        expectation.revenue_share - offer.revenue_share,
        expectation.revenue_share,
    );
    let expected_weeks = f64::from(expectation.duration_weeks);
    let duration = relative(expected_weeks - f64::from(offer.duration_weeks), expected_weeks);

    let exclusivity = if !offer.exclusive {
        config.non_exclusive_bonus
    } else if expectation.accepts_exclusive {
        0.0
    } else {
        -config.exclusive_penalty
    };

    let score = NEUTRAL_SCORE
        + config.payment_weight * payment
        + config.share_weight * share
        + config.duration_weight * duration
        + exclusivity;
    if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 }
}

/// Classify a score into a mood band.
pub const fn mood_for_score(score: f64) -> Mood {
    if score >= 70.0 {
        Mood::Eager
    } else if score >= 45.0 {
        Mood::Neutral
    } else if score >= 25.0 {
        Mood::Hesitant
    } else {
        Mood::Insulted
    }
}

/// Score needed to accept in `round` (1-based).
pub fn accept_threshold(round: u32, config: &NegotiationConfig) -> f64 {
    config.accept_threshold - config.accept_step * f64::from(round.saturating_sub(1))
}

/// Score below which the counterpart walks in `round` (1-based).
pub fn walk_floor(round: u32, config: &NegotiationConfig) -> f64 {
    let index = usize::try_from(round.saturating_sub(1)).unwrap_or(usize::MAX);
    config
        .walk_floors
        .get(index)
        .or_else(|| config.walk_floors.last())
        .copied()
        .unwrap_or(0.0)
}

/// Blend the acquirer's offer with the expectation for `round`.
///
/// The weight on the acquirer's offer grows each round. Exclusivity
/// follows the acquirer only after the flex round.
pub fn counter_offer(
    offer: &ContractTerms,
    expectation: &Expectation,
    round: u32,
    config: &NegotiationConfig,
) -> ContractTerms {
    let w = (config.counter_base_weight
        + config.counter_weight_step * f64::from(round.saturating_sub(1)))
    .min(config.counter_weight_cap)
    .max(0.0);

    let upfront = scale_money(offer.upfront, w)
        .checked_add(scale_money(expectation.upfront, 1.0 - w))
        .unwrap_or(expectation.upfront);
    let revenue_share = w * offer.revenue_share + (1.0 - w) * expectation.revenue_share;
    let weeks = w * f64::from(offer.duration_weeks) + (1.0 - w) * f64::from(expectation.duration_weeks);
    let duration_weeks = u32::try_from(round_to_u64(weeks)).unwrap_or(expectation.duration_weeks);
    let exclusive = if round > config.exclusivity_flex_round {
        offer.exclusive
    } else {
        expectation.accepts_exclusive
    };

    ContractTerms {
        upfront,
        revenue_share,
        duration_weeks,
        exclusive,
    }
}

fn relative(diff: f64, base: f64) -> f64 {
    if base.abs() < f64::EPSILON {
        return if diff > 0.0 { 1.0 } else { 0.0 };
    }
    (diff / base).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// One in-progress or finished negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationState {
    id: NegotiationId,
    agent_id: AgentId,
    acquirer_id: AgencyId,
    round: u32,
    max_rounds: u32,
    status: NegotiationStatus,
    mood: Mood,
    last_offer: Option<ContractTerms>,
    last_score: Option<f64>,
    counter: Option<ContractTerms>,
    expectation: Expectation,
    scouting: ScoutingTier,
}

/// What happened to one submitted offer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundOutcome {
    /// The counterpart accepted the offer as made.
    Accepted {
        /// The agreed terms.
        terms: ContractTerms,
        /// The offer's score.
        score: f64,
    },
    /// The counterpart countered; another offer may follow.
    Countered {
        /// The counter-offer.
        counter: ContractTerms,
        /// The counterpart's mood.
        mood: Mood,
    },
    /// The round ceiling was reached; take the counter or withdraw.
    FinalCounter {
        /// The last counter-offer.
        counter: ContractTerms,
        /// The counterpart's mood.
        mood: Mood,
    },
    /// The counterpart walked away.
    Walked {
        /// The offer's score.
        score: f64,
    },
}

/// Misuse of the negotiation state machine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NegotiationError {
    /// The negotiation is already over.
    #[error("negotiation {id} is already {status:?}")]
    AlreadyResolved {
        /// The negotiation.
        id: NegotiationId,
        /// Its final status.
        status: NegotiationStatus,
    },

    /// The round ceiling was reached; only the counter or a withdrawal remain.
    #[error("negotiation {id} is waiting for an answer to its final counter")]
    AwaitingFinalAnswer {
        /// The negotiation.
        id: NegotiationId,
    },

    /// There is no counter-offer to accept.
    #[error("negotiation {id} has no counter-offer")]
    NoCounter {
        /// The negotiation.
        id: NegotiationId,
    },

    /// The offered terms are malformed.
    #[error("invalid terms: {reason}")]
    InvalidTerms {
        /// What is wrong with them.
        reason: String,
    },
}

impl NegotiationState {
    /// Open a negotiation for `agent` on behalf of `acquirer_id`.
    pub fn start(
        id: NegotiationId,
        agent: &Agent,
        acquirer_id: AgencyId,
        scouting: ScoutingTier,
        config: &NegotiationConfig,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            id,
            agent_id: agent.id,
            acquirer_id,
            round: 1,
            max_rounds: config.max_rounds.max(1),
            status: NegotiationStatus::Proposing,
            mood: Mood::Neutral,
            last_offer: None,
            last_score: None,
            counter: None,
            expectation: generate_expectation(agent, config)?,
            scouting,
        })
    }

    /// Negotiation identifier.
    pub const fn id(&self) -> NegotiationId {
        self.id
    }

    /// The agent being negotiated with.
    pub const fn agent_id(&self) -> AgentId {
        self.agent_id
    }

    /// The acquiring agency.
    pub const fn acquirer_id(&self) -> AgencyId {
        self.acquirer_id
    }

    /// Current round, 1-based.
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Round ceiling.
    pub const fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Lifecycle position.
    pub const fn status(&self) -> NegotiationStatus {
        self.status
    }

    /// The counterpart's current mood.
    pub const fn mood(&self) -> Mood {
        self.mood
    }

    /// The acquirer's most recent offer.
    pub const fn last_offer(&self) -> Option<&ContractTerms> {
        self.last_offer.as_ref()
    }

    /// Score of the most recent offer.
    pub const fn last_score(&self) -> Option<f64> {
        self.last_score
    }

    /// The counterpart's most recent counter-offer.
    pub const fn counter(&self) -> Option<&ContractTerms> {
        self.counter.as_ref()
    }

    /// Whether no further moves are possible.
    pub const fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }

    /// The expectation as visible at this negotiation's scouting tier.
    pub fn expectation_view(&self, config: &NegotiationConfig) -> ExpectationView {
        let exp = &self.expectation;
        match self.scouting {
            ScoutingTier::Basic => ExpectationView::Hidden,
            ScoutingTier::Full => ExpectationView::Exact(*exp),
            ScoutingTier::Advanced => {
                let r = config.scouting_range.clamp(0.0, 1.0);
                let weeks = f64::from(exp.duration_weeks);
                let to_weeks = |v: f64| u32::try_from(round_to_u64(v)).unwrap_or(exp.duration_weeks);
                ExpectationView::Ranges {
                    upfront: (scale_money(exp.upfront, 1.0 - r), scale_money(exp.upfront, 1.0 + r)),
                    revenue_share: (exp.revenue_share * (1.0 - r), exp.revenue_share * (1.0 + r)),
                    duration_weeks: (to_weeks(weeks * (1.0 - r)), to_weeks(weeks * (1.0 + r))),
                    accepts_exclusive: exp.accepts_exclusive,
                }
            }
        }
    }

    /// Submit an offer for the current round.
    ///
    /// Rejected without any change when the negotiation is resolved,
    /// waiting on a final counter, or the terms are malformed.
    pub fn submit_offer(
        &mut self,
        offer: ContractTerms,
        config: &NegotiationConfig,
    ) -> Result<RoundOutcome, NegotiationError> {
        self.ensure_open()?;
        if self.status == NegotiationStatus::FinalCounter {
            return Err(NegotiationError::AwaitingFinalAnswer { id: self.id });
        }
        validate_terms(&offer)?;

        let score = evaluate_offer(&offer, &self.expectation, config);
        self.mood = mood_for_score(score);
        self.last_offer = Some(offer);
        self.last_score = Some(score);
        debug!(
            negotiation = %self.id,
            agent_id = %self.agent_id,
            round = self.round,
            score,
            mood = ?self.mood,
            "offer evaluated"
        );

        if score < walk_floor(self.round, config) {
            self.status = NegotiationStatus::Walked;
            self.counter = None;
            return Ok(RoundOutcome::Walked { score });
        }

        if score >= accept_threshold(self.round, config) {
            self.status = NegotiationStatus::Accepted;
            self.counter = None;
            return Ok(RoundOutcome::Accepted {
                terms: offer,
                score,
            });
        }

        let counter = counter_offer(&offer, &self.expectation, self.round, config);
        self.counter = Some(counter);
        if self.round >= self.max_rounds {
            self.status = NegotiationStatus::FinalCounter;
            return Ok(RoundOutcome::FinalCounter {
                counter,
                mood: self.mood,
            });
        }

        self.status = NegotiationStatus::Countered;
        self.round = self.round.saturating_add(1);
        Ok(RoundOutcome::Countered {
            counter,
            mood: self.mood,
        })
    }

    /// Take the counterpart's latest counter-offer.
    pub fn accept_counter(&mut self) -> Result<ContractTerms, NegotiationError> {
        self.ensure_open()?;
        let counter = self.counter.ok_or(NegotiationError::NoCounter { id: self.id })?;
        self.status = NegotiationStatus::Accepted;
        self.mood = Mood::Eager;
        Ok(counter)
    }

    /// Abandon the negotiation. Has no effect on the wider simulation.
    pub fn withdraw(&mut self) -> Result<(), NegotiationError> {
        self.ensure_open()?;
        self.status = NegotiationStatus::Withdrawn;
        Ok(())
    }

    const fn ensure_open(&self) -> Result<(), NegotiationError> {
        if self.status.is_resolved() {
            return Err(NegotiationError::AlreadyResolved {
                id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }
}

/// Reject offers no counterpart could sign.
pub fn validate_terms(terms: &ContractTerms) -> Result<(), NegotiationError> {
    if terms.upfront.is_sign_negative() {
        return Err(NegotiationError::InvalidTerms {
            reason: format!("negative upfront payment {}", terms.upfront),
        });
    }
    if !(0.0..=1.0).contains(&terms.revenue_share) {
        return Err(NegotiationError::InvalidTerms {
            reason: format!("revenue share {} outside [0, 1]", terms.revenue_share),
        });
    }
    if terms.duration_weeks == 0 {
        return Err(NegotiationError::InvalidTerms {
            reason: String::from("zero-week duration"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use clout_types::TraitScores;

    use super::*;
    use crate::testing::sample_agent;

    fn open(agent: &Agent, tier: ScoutingTier) -> NegotiationState {
        let mut rng = StdRng::seed_from_u64(21);
        NegotiationState::start(
            NegotiationId::generate(&mut rng),
            agent,
            AgencyId::generate(&mut rng),
            tier,
            &NegotiationConfig::default(),
        )
        .unwrap()
    }

    fn expectation_of(state: &NegotiationState) -> Expectation {
        match state.expectation_view(&NegotiationConfig::default()) {
            ExpectationView::Exact(exp) => exp,
            other => panic!("expected exact view, got {other:?}"),
        }
    }

    fn scaled(exp: &Expectation, pay: f64, share: f64, weeks: f64) -> ContractTerms {
        ContractTerms {
            upfront: scale_money(exp.upfront, pay),
            revenue_share: exp.revenue_share * share,
            duration_weeks: u32::try_from(round_to_u64(f64::from(exp.duration_weeks) * weeks))
                .unwrap(),
            exclusive: false,
        }
    }

    #[test]
    fn offering_the_expectation_is_at_least_neutral() {
        let config = NegotiationConfig::default();
        for followers in [500, 20_000, 49_999, 50_000, 3_000_000] {
            for trait_value in [1, 5, 10] {
                let mut agent = sample_agent();
                agent.followers = followers;
                agent.traits = TraitScores::uniform(trait_value);
                let exp = generate_expectation(&agent, &config).unwrap();
                assert!(evaluate_offer(&exp.as_terms(), &exp, &config) >= NEUTRAL_SCORE);
            }
        }
    }

    #[test]
    fn star_agents_want_shorter_terms_and_more_money() {
        let config = NegotiationConfig::default();
        let mut star = sample_agent();
        star.traits = TraitScores::uniform(9);
        let mut plain = sample_agent();
        plain.traits = TraitScores::uniform(3);
        let star_exp = generate_expectation(&star, &config).unwrap();
        let plain_exp = generate_expectation(&plain, &config).unwrap();
        assert!(star_exp.duration_weeks < plain_exp.duration_weeks);
        assert!(star_exp.upfront > plain_exp.upfront);
    }

    #[test]
    fn small_agents_accept_exclusivity() {
        let config = NegotiationConfig::default();
        let mut agent = sample_agent();
        agent.followers = 10_000;
        assert!(generate_expectation(&agent, &config).unwrap().accepts_exclusive);
        agent.followers = 500_000;
        assert!(!generate_expectation(&agent, &config).unwrap().accepts_exclusive);
    }

    #[test]
    fn mood_bands() {
        assert_eq!(mood_for_score(70.0), Mood::Eager);
        assert_eq!(mood_for_score(69.9), Mood::Neutral);
        assert_eq!(mood_for_score(45.0), Mood::Neutral);
        assert_eq!(mood_for_score(25.0), Mood::Hesitant);
        assert_eq!(mood_for_score(24.9), Mood::Insulted);
    }

    #[test]
    fn thresholds_loosen_each_round() {
        let config = NegotiationConfig::default();
        assert!((accept_threshold(1, &config) - 65.0).abs() < f64::EPSILON);
        assert!((accept_threshold(3, &config) - 55.0).abs() < f64::EPSILON);
        assert!((walk_floor(1, &config) - 20.0).abs() < f64::EPSILON);
        assert!((walk_floor(2, &config) - 15.0).abs() < f64::EPSILON);
        assert!((walk_floor(9, &config) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn generous_offer_is_accepted() {
        let agent = sample_agent();
        let mut state = open(&agent, ScoutingTier::Full);
        let exp = expectation_of(&state);
        let outcome = state
            .submit_offer(scaled(&exp, 1.5, 0.7, 0.8), &NegotiationConfig::default())
            .unwrap();
        assert!(matches!(outcome, RoundOutcome::Accepted { .. }));
        assert_eq!(state.status(), NegotiationStatus::Accepted);
    }

    #[test]
    fn insulting_offer_walks_before_accept_check() {
        let agent = sample_agent();
        let mut state = open(&agent, ScoutingTier::Full);
        let exp = expectation_of(&state);
        let mut lowball = scaled(&exp, 0.0, 2.0, 2.0);
        lowball.revenue_share = lowball.revenue_share.min(1.0);
        lowball.exclusive = !exp.accepts_exclusive;
        let outcome = state.submit_offer(lowball, &NegotiationConfig::default()).unwrap();
        assert!(matches!(outcome, RoundOutcome::Walked { .. }));
        assert_eq!(state.mood(), Mood::Insulted);
        assert!(state.is_resolved());
    }

    #[test]
    fn middling_offers_end_within_round_ceiling() {
        let config = NegotiationConfig::default();
        let agent = sample_agent();
        let mut state = open(&agent, ScoutingTier::Full);
        let exp = expectation_of(&state);
        let offer = scaled(&exp, 0.6, 1.0, 1.0);
        let mut submitted = 0;
        loop {
            let outcome = state.submit_offer(offer, &config).unwrap();
            submitted += 1;
            assert!(submitted <= config.max_rounds);
            match outcome {
                RoundOutcome::Countered { .. } => {}
                RoundOutcome::FinalCounter { .. } => break,
                RoundOutcome::Accepted { .. } | RoundOutcome::Walked { .. } => return,
            }
        }
        assert_eq!(state.status(), NegotiationStatus::FinalCounter);
        assert_eq!(
            state.submit_offer(offer, &config),
            Err(NegotiationError::AwaitingFinalAnswer { id: state.id() })
        );
        state.withdraw().unwrap();
        assert!(state.is_resolved());
    }

    #[test]
    fn counter_moves_toward_offer_over_rounds() {
        let config = NegotiationConfig::default();
        let agent = sample_agent();
        let exp = generate_expectation(&agent, &config).unwrap();
        let offer = ContractTerms {
            upfront: Decimal::ZERO,
            revenue_share: exp.revenue_share,
            duration_weeks: exp.duration_weeks,
            exclusive: true,
        };
        let early = counter_offer(&offer, &exp, 1, &config);
        let late = counter_offer(&offer, &exp, 5, &config);
        assert!(late.upfront < early.upfront);
        assert_eq!(early.exclusive, exp.accepts_exclusive);
        assert!(late.exclusive);
    }

    #[test]
    fn accepting_counter_resolves() {
        let config = NegotiationConfig::default();
        let agent = sample_agent();
        let mut state = open(&agent, ScoutingTier::Full);
        assert_eq!(
            state.accept_counter(),
            Err(NegotiationError::NoCounter { id: state.id() })
        );
        let exp = expectation_of(&state);
        let outcome = state.submit_offer(scaled(&exp, 0.6, 1.0, 1.0), &config).unwrap();
        if let RoundOutcome::Countered { counter, .. } = outcome {
            assert_eq!(state.accept_counter().unwrap(), counter);
            assert_eq!(state.status(), NegotiationStatus::Accepted);
            assert!(state.withdraw().is_err());
        }
    }

    #[test]
    fn malformed_terms_leave_state_untouched() {
        let agent = sample_agent();
        let mut state = open(&agent, ScoutingTier::Basic);
        let before = state.clone();
        let bad = ContractTerms {
            upfront: Decimal::new(-1, 0),
            revenue_share: 0.2,
            duration_weeks: 10,
            exclusive: false,
        };
        assert!(state.submit_offer(bad, &NegotiationConfig::default()).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn scouting_tiers_control_visibility() {
        let config = NegotiationConfig::default();
        let agent = sample_agent();
        assert_eq!(
            open(&agent, ScoutingTier::Basic).expectation_view(&config),
            ExpectationView::Hidden
        );
        let ranged = open(&agent, ScoutingTier::Advanced).expectation_view(&config);
        let exact = expectation_of(&open(&agent, ScoutingTier::Full));
        match ranged {
            ExpectationView::Ranges { upfront, duration_weeks, .. } => {
                assert!(upfront.0 <= exact.upfront && exact.upfront <= upfront.1);
                assert!(duration_weeks.0 <= exact.duration_weeks);
                assert!(exact.duration_weeks <= duration_weeks.1);
            }
            other => panic!("expected ranges, got {other:?}"),
        }
    }

    #[test]
    fn state_survives_serialization() {
        let agent = sample_agent();
        let state = open(&agent, ScoutingTier::Advanced);
        let json = serde_json::to_string(&state).unwrap();
        let back: NegotiationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), state.id());
        assert_eq!(back.agent_id(), state.agent_id());
        assert_eq!(back.round(), state.round());
        assert_eq!(back.status(), state.status());
        assert_eq!(back.max_rounds(), state.max_rounds());
    }
}
