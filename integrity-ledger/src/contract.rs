//! Payment-release contract stub
//!
//! A minimal rule evaluator, not a rules engine. Exactly two rule shapes
//! exist: release when the trigger confirms delivery, and release once a
//! fixed escrow period has elapsed since creation. On execution the
//! outcome may instruct the caller to mark the subject paid; the ledger
//! itself never mutates business entities.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{Error, Result};

/// Release conditions attached to a contract
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReleaseConditions {
    /// Execute as soon as delivery is confirmed
    pub auto_release_on_delivery: bool,

    /// Execute once this many days have elapsed since creation (0 = unused)
    pub escrow_period_days: u32,
}

/// Contract lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Waiting on a trigger
    Active,
    /// Executed; terminal
    Executed,
    /// Cancelled; terminal
    Cancelled,
}

/// Event that may satisfy a contract's conditions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Delivery has been confirmed
    pub delivery_confirmed: bool,

    /// On execution, the subject should be marked paid
    pub mark_as_paid: bool,
}

/// What happened when a trigger was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// The contract executed on this trigger
    pub executed: bool,

    /// The caller should flip the subject's payment status
    pub mark_paid: bool,
}

/// A payment-release contract for one subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentContract {
    /// Contract identifier
    pub contract_id: Uuid,

    /// Invoice this contract guards
    pub subject_id: u64,

    /// Release conditions
    pub conditions: ReleaseConditions,

    /// Lifecycle state
    pub status: ContractStatus,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Execution time, once executed
    pub executed_at: Option<DateTime<Utc>>,

    /// Human-readable trail of condition checks
    pub execution_log: Vec<String>,
}

impl PaymentContract {
    /// Create an active contract
    pub fn new(subject_id: u64, conditions: ReleaseConditions, created_at: DateTime<Utc>) -> Self {
        Self {
            contract_id: Uuid::new_v4(),
            subject_id,
            conditions,
            status: ContractStatus::Active,
            created_at,
            executed_at: None,
            execution_log: Vec::new(),
        }
    }

    /// Apply a trigger
    ///
    /// Executed and cancelled contracts are terminal; further triggers
    /// are no-ops.
    pub fn execute(&mut self, trigger: &TriggerEvent, now: DateTime<Utc>) -> ExecutionOutcome {
        if self.status != ContractStatus::Active {
            return ExecutionOutcome {
                executed: false,
                mark_paid: false,
            };
        }

        let mut met = false;

        if self.conditions.auto_release_on_delivery && trigger.delivery_confirmed {
            self.execution_log
                .push("Delivery confirmed - condition met".to_string());
            met = true;
        } else if self.conditions.escrow_period_days > 0 {
            let escrow_end =
                self.created_at + Duration::days(i64::from(self.conditions.escrow_period_days));
            if now >= escrow_end {
                self.execution_log
                    .push("Escrow period completed - condition met".to_string());
                met = true;
            } else {
                self.execution_log
                    .push("Escrow period not yet completed".to_string());
            }
        }

        if met {
            self.status = ContractStatus::Executed;
            self.executed_at = Some(now);
            tracing::info!(contract_id = %self.contract_id, subject_id = self.subject_id, "Contract executed");
        }

        ExecutionOutcome {
            executed: met,
            mark_paid: met && trigger.mark_as_paid,
        }
    }
}

/// In-memory registry of contracts, keyed by id
#[derive(Debug, Default)]
pub struct ContractRegistry {
    contracts: HashMap<Uuid, PaymentContract>,
}

impl ContractRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contract, returning its id
    pub fn register(&mut self, contract: PaymentContract) -> Uuid {
        let id = contract.contract_id;
        self.contracts.insert(id, contract);
        id
    }

    /// Look up a contract
    pub fn get(&self, id: &Uuid) -> Option<&PaymentContract> {
        self.contracts.get(id)
    }

    /// Apply a trigger to a registered contract
    pub fn execute(
        &mut self,
        id: &Uuid,
        trigger: &TriggerEvent,
        now: DateTime<Utc>,
    ) -> Result<ExecutionOutcome> {
        let contract = self
            .contracts
            .get_mut(id)
            .ok_or_else(|| Error::Contract(format!("Unknown contract {}", id)))?;
        Ok(contract.execute(trigger, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_delivery_release() {
        let mut contract = PaymentContract::new(
            42,
            ReleaseConditions {
                auto_release_on_delivery: true,
                escrow_period_days: 0,
            },
            epoch(),
        );

        let outcome = contract.execute(
            &TriggerEvent {
                delivery_confirmed: true,
                mark_as_paid: true,
            },
            epoch(),
        );

        assert!(outcome.executed);
        assert!(outcome.mark_paid);
        assert_eq!(contract.status, ContractStatus::Executed);
        assert!(contract.executed_at.is_some());
    }

    #[test]
    fn test_delivery_not_confirmed() {
        let mut contract = PaymentContract::new(
            42,
            ReleaseConditions {
                auto_release_on_delivery: true,
                escrow_period_days: 0,
            },
            epoch(),
        );

        let outcome = contract.execute(&TriggerEvent::default(), epoch());
        assert!(!outcome.executed);
        assert_eq!(contract.status, ContractStatus::Active);
    }

    #[test]
    fn test_escrow_period_not_elapsed() {
        let mut contract = PaymentContract::new(
            42,
            ReleaseConditions {
                auto_release_on_delivery: false,
                escrow_period_days: 7,
            },
            epoch(),
        );

        let outcome = contract.execute(&TriggerEvent::default(), epoch() + Duration::days(3));
        assert!(!outcome.executed);
        assert!(contract
            .execution_log
            .iter()
            .any(|l| l.contains("not yet completed")));
    }

    #[test]
    fn test_escrow_period_elapsed() {
        let mut contract = PaymentContract::new(
            42,
            ReleaseConditions {
                auto_release_on_delivery: false,
                escrow_period_days: 7,
            },
            epoch(),
        );

        let outcome = contract.execute(
            &TriggerEvent {
                delivery_confirmed: false,
                mark_as_paid: true,
            },
            epoch() + Duration::days(8),
        );
        assert!(outcome.executed);
        assert!(outcome.mark_paid);
    }

    #[test]
    fn test_executed_contract_is_terminal() {
        let mut contract = PaymentContract::new(
            42,
            ReleaseConditions {
                auto_release_on_delivery: true,
                escrow_period_days: 0,
            },
            epoch(),
        );

        let trigger = TriggerEvent {
            delivery_confirmed: true,
            mark_as_paid: true,
        };
        assert!(contract.execute(&trigger, epoch()).executed);
        assert!(!contract.execute(&trigger, epoch()).executed);
    }

    #[test]
    fn test_registry_unknown_contract() {
        let mut registry = ContractRegistry::new();
        let missing = Uuid::new_v4();

        let result = registry.execute(&missing, &TriggerEvent::default(), epoch());
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_roundtrip() {
        let mut registry = ContractRegistry::new();
        let contract = PaymentContract::new(
            42,
            ReleaseConditions {
                auto_release_on_delivery: true,
                escrow_period_days: 0,
            },
            epoch(),
        );
        let id = registry.register(contract);

        let outcome = registry
            .execute(
                &id,
                &TriggerEvent {
                    delivery_confirmed: true,
                    mark_as_paid: false,
                },
                epoch(),
            )
            .unwrap();
        assert!(outcome.executed);
        assert!(!outcome.mark_paid);
        assert_eq!(registry.get(&id).unwrap().status, ContractStatus::Executed);
    }
}
