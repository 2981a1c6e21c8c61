use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, PlanId, Strategy};

/// all events emitted during a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PlanStarted {
        plan_id: PlanId,
        strategy: Strategy,
        total_principal: Money,
    },
    LoanPaidOff {
        plan_id: PlanId,
        loan_id: LoanId,
        month: u32,
    },
    PlanCompleted {
        plan_id: PlanId,
        strategy: Strategy,
        months: u32,
        total_interest: Money,
    },
}

/// event store for collecting events during a run
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
