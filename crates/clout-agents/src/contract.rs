//! Signing cost and contract attachment.
//!
//! The same cost formula prices autonomous agency signings and seeds the
//! counterpart's expectation in a negotiation.

use rust_decimal::Decimal;

use clout_types::{Agency, Agent, Contract, ContractTerms};

use crate::error::AgentError;
use crate::numeric::{to_f64, to_money};

/// Flat component of every signing cost.
const BASE_COST: f64 = 500.0;

/// Cost per thousand followers.
const COST_PER_THOUSAND: f64 = 25.0;

/// Cost per point of mean trait.
const COST_PER_TRAIT_POINT: f64 = 150.0;

/// Estimated cost of signing `agent`, rounded to cents.
///
/// Burned-out agents are cheaper: up to 25 % off at condition 100.
pub fn signing_cost(agent: &Agent) -> Result<Decimal, AgentError> {
    let raw = BASE_COST
        + to_f64(agent.followers) / 1000.0 * COST_PER_THOUSAND
        + agent.traits.mean() * COST_PER_TRAIT_POINT;
    let discount = 1.0 - f64::from(agent.condition) / 400.0;
    to_money(raw * discount, "signing cost")
}

/// Whether the agency can pay `upfront` from its funds.
pub fn can_afford(agency: &Agency, upfront: Decimal) -> bool {
    upfront <= agency.funds
}

/// Attach `agent` to `agency` under `terms`, paying the upfront amount.
///
/// The caller has already checked that the agent is a free agent, the
/// roster has room, and the agency can afford the terms. Either every
/// field changes or, on overflow, nothing does.
pub fn attach(
    agent: &mut Agent,
    agency: &mut Agency,
    terms: ContractTerms,
    tick: u64,
) -> Result<(), AgentError> {
    let funds = agency
        .funds
        .checked_sub(terms.upfront)
        .ok_or_else(|| AgentError::ArithmeticOverflow {
            context: String::from("signing payment"),
        })?;

    agency.funds = funds;
    agency.roster.insert(agent.id);
    agent.employer = Some(agency.id);
    agent.contract = Some(Contract {
        agency_id: agency.id,
        terms,
        signed_at_tick: tick,
    });
    Ok(())
}

/// Release `agent` from `agency`. The agent becomes a free agent.
pub fn detach(agent: &mut Agent, agency: &mut Agency) {
    agency.roster.remove(&agent.id);
    if agent.employer == Some(agency.id) {
        agent.employer = None;
        agent.contract = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use clout_types::{AgencyId, AgencyStrategy, Controller, TraitScores};

    use super::*;
    use crate::testing::sample_agent;

    fn agency(funds: i64) -> Agency {
        let mut rng = StdRng::seed_from_u64(6);
        Agency {
            id: AgencyId::generate(&mut rng),
            name: String::from("Northside Talent"),
            controller: Controller::Player,
            strategy: AgencyStrategy::Balanced,
            funds: Decimal::new(funds, 0),
            reputation: 50.0,
            roster: BTreeSet::new(),
            focus_category: None,
            focus_platform: None,
            total_revenue: Decimal::ZERO,
            last_revenue: Decimal::ZERO,
        }
    }

    fn terms(upfront: i64) -> ContractTerms {
        ContractTerms {
            upfront: Decimal::new(upfront, 0),
            revenue_share: 0.3,
            duration_weeks: 52,
            exclusive: false,
        }
    }

    #[test]
    fn cost_formula() {
        let mut agent = sample_agent();
        agent.followers = 100_000;
        agent.traits = TraitScores::uniform(6);
        agent.condition = 0;
        // 500 + 2500 + 900
        assert_eq!(signing_cost(&agent).unwrap(), Decimal::new(3_900, 0));
        agent.condition = 100;
        assert_eq!(signing_cost(&agent).unwrap(), Decimal::new(2_925, 0));
    }

    #[test]
    fn attach_moves_money_and_links_both_sides() {
        let mut agent = sample_agent();
        let mut agency = agency(10_000);
        attach(&mut agent, &mut agency, terms(4_000), 12).unwrap();
        assert_eq!(agency.funds, Decimal::new(6_000, 0));
        assert!(agency.roster.contains(&agent.id));
        assert_eq!(agent.employer, Some(agency.id));
        assert_eq!(agent.contract.unwrap().signed_at_tick, 12);
    }

    #[test]
    fn detach_unlinks_both_sides() {
        let mut agent = sample_agent();
        let mut agency = agency(10_000);
        attach(&mut agent, &mut agency, terms(0), 0).unwrap();
        detach(&mut agent, &mut agency);
        assert!(agency.roster.is_empty());
        assert!(agent.is_free_agent());
        assert!(agent.contract.is_none());
    }

    #[test]
    fn affordability() {
        let agency = agency(1_000);
        assert!(can_afford(&agency, Decimal::new(1_000, 0)));
        assert!(!can_afford(&agency, Decimal::new(1_001, 0)));
    }
}
