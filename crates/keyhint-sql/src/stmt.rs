mod create_index;
pub use create_index::CreateIndex;

mod explain;
pub use explain::Explain;

mod name;
pub use name::Name;

mod sample;
pub use sample::Sample;

mod show;
pub use show::{ShowColumns, ShowIndex};

pub use keyhint_core::{schema::TableName, shape::*};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateIndex(CreateIndex),
    Explain(Explain),
    Sample(Sample),
    ShowColumns(ShowColumns),
    ShowIndex(ShowIndex),
}

impl Statement {
    pub fn is_create_index(&self) -> bool {
        matches!(self, Statement::CreateIndex(_))
    }

    /// The table the statement reads or alters.
    pub fn table(&self) -> &TableName {
        match self {
            Statement::CreateIndex(stmt) => &stmt.on,
            Statement::Explain(stmt) => &stmt.table,
            Statement::Sample(stmt) => &stmt.table,
            Statement::ShowColumns(stmt) => &stmt.table,
            Statement::ShowIndex(stmt) => &stmt.table,
        }
    }
}
