//! Business logic services

pub mod catalog;
pub mod loans;
pub mod stats;

use std::sync::Arc;

use crate::{clock::Clock, config::LoanPolicy, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services over the given repository, policy and clock
    pub fn new(repository: Repository, policy: LoanPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), clock.clone()),
            loans: loans::LoansService::new(repository.clone(), policy.clone(), clock.clone()),
            stats: stats::StatsService::new(repository, policy, clock),
        }
    }
}
