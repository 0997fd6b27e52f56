use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::funcionario::Funcionario;

/// Gateway contract for the `funcionarios` table.
///
/// Lookup operations are keyed by a caller-named column so the same
/// gateway serves primary-key access and the legacy compound-key route;
/// implementations must restrict `column` to a known set. `read_all`
/// returns records in CPF order.
#[async_trait]
pub trait FuncionarioStore: Send + Sync {
    /// Insert a new record. A duplicate CPF surfaces as `Conflict`.
    async fn create(&self, funcionario: &Funcionario) -> Result<(), AppError>;

    async fn read_all(&self) -> Result<Vec<Funcionario>, AppError>;

    /// Single lookup; no match is `Ok(None)`, not an error.
    async fn read(&self, column: &str, value: &str) -> Result<Option<Funcionario>, AppError>;

    /// Full-row replace of the record matching `column = value`. Writes
    /// the caller-supplied `created_at` unchanged.
    async fn update(
        &self,
        column: &str,
        value: &str,
        funcionario: &Funcionario,
    ) -> Result<(), AppError>;

    /// Remove the matching row. Idempotent here; existence pre-checks
    /// belong to the caller.
    async fn delete(&self, column: &str, value: &str) -> Result<(), AppError>;
}
