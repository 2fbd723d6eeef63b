//! Query executor capability
//!
//! The engine never opens connections itself. It borrows something that can
//! run a query text with `$n` placeholders against an ordered parameter list
//! and hand back positionally typed rows.

use super::errors::ExecutorResult;
use super::value::{Row, SqlValue};

/// Synchronous request/response query execution.
///
/// Implementations must release any connection they acquire before
/// returning, on success and on failure alike.
pub trait QueryExecutor: Send + Sync {
    /// Run one query. `params[i]` binds placeholder `$i+1`.
    fn execute(&self, sql: &str, params: &[SqlValue]) -> ExecutorResult<Vec<Row>>;
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for std::sync::Arc<T> {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> ExecutorResult<Vec<Row>> {
        (**self).execute(sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Echo;

    impl QueryExecutor for Echo {
        fn execute(&self, _sql: &str, params: &[SqlValue]) -> ExecutorResult<Vec<Row>> {
            Ok(vec![Row::new(params.to_vec())])
        }
    }

    #[test]
    fn test_arc_forwards() {
        let executor: Arc<dyn QueryExecutor> = Arc::new(Echo);
        let rows = executor.execute("SELECT $1", &[SqlValue::Int(5)]).unwrap();
        assert_eq!(rows[0].int(0).unwrap(), 5);
    }
}
