use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::funcionario::Funcionario;

use super::store::FuncionarioStore;

const COLUMNS: &str = "cpf, first_name, last_name, birth_date, address, salary, sex, \
                       supervisor_cpf, department_number, created_at";

/// Postgres-backed gateway. The pool is injected at startup and shared
/// across requests.
pub struct PgFuncionarioStore {
    pool: PgPool,
}

impl PgFuncionarioStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Lookup columns are interpolated into SQL, so they must come from this
// whitelist rather than from the request.
fn column_sql(column: &str) -> Result<&'static str, AppError> {
    match column {
        "cpf" => Ok("cpf"),
        "supervisor_cpf" => Ok("supervisor_cpf"),
        other => Err(AppError::InternalServerError(format!(
            "unsupported lookup column: {}",
            other
        ))),
    }
}

#[async_trait]
impl FuncionarioStore for PgFuncionarioStore {
    async fn create(&self, funcionario: &Funcionario) -> Result<(), AppError> {
        let sql = format!(
            "INSERT INTO funcionarios ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            COLUMNS
        );
        sqlx::query(&sql)
            .bind(&funcionario.cpf)
            .bind(&funcionario.first_name)
            .bind(&funcionario.last_name)
            .bind(funcionario.birth_date)
            .bind(&funcionario.address)
            .bind(funcionario.salary)
            .bind(&funcionario.sex)
            .bind(&funcionario.supervisor_cpf)
            .bind(funcionario.department_number)
            .bind(funcionario.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Funcionario>, AppError> {
        let sql = format!("SELECT {} FROM funcionarios ORDER BY cpf", COLUMNS);
        let funcionarios = sqlx::query_as::<_, Funcionario>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(funcionarios)
    }

    async fn read(&self, column: &str, value: &str) -> Result<Option<Funcionario>, AppError> {
        let sql = format!(
            "SELECT {} FROM funcionarios WHERE {} = $1",
            COLUMNS,
            column_sql(column)?
        );
        let funcionario = sqlx::query_as::<_, Funcionario>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(funcionario)
    }

    async fn update(
        &self,
        column: &str,
        value: &str,
        funcionario: &Funcionario,
    ) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE funcionarios SET cpf = $1, first_name = $2, last_name = $3, \
             birth_date = $4, address = $5, salary = $6, sex = $7, supervisor_cpf = $8, \
             department_number = $9, created_at = $10 WHERE {} = $11",
            column_sql(column)?
        );
        sqlx::query(&sql)
            .bind(&funcionario.cpf)
            .bind(&funcionario.first_name)
            .bind(&funcionario.last_name)
            .bind(funcionario.birth_date)
            .bind(&funcionario.address)
            .bind(funcionario.salary)
            .bind(&funcionario.sex)
            .bind(&funcionario.supervisor_cpf)
            .bind(funcionario.department_number)
            .bind(funcionario.created_at)
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, column: &str, value: &str) -> Result<(), AppError> {
        let sql = format!("DELETE FROM funcionarios WHERE {} = $1", column_sql(column)?);
        sqlx::query(&sql).bind(value).execute(&self.pool).await?;
        Ok(())
    }
}
