mod call_log;
pub use call_log::CallLog;

mod mock_provider;
pub use mock_provider::{MockProvider, MockTable, ProviderCall};

pub mod prelude {
    pub use crate::{CallLog, MockProvider, MockTable, ProviderCall};
    pub use keyhint::{
        shape::{Expr, ExprField, JoinOperand, OrderByExpr, TableId, TableRef},
        Advice, Advisor, CandidateKind, Config, Index, Outcome, Query, TableName,
    };
}
