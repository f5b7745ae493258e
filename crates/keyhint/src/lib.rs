mod advice;
pub use advice::{Advice, CandidateKind, FieldCandidate, Outcome, TableAdvice};

mod advisor;
pub use advisor::Advisor;

mod config;
pub use config::Config;

mod engine;

pub use keyhint_core::{
    schema::{self, Index, TableName},
    shape::{self, Query},
    stats::{self, StatsProvider},
    Error, Result,
};

pub use keyhint_sql::stmt::CreateIndex;
