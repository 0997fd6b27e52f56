use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::validation::format_cpf;

/// One employee record, mirroring the `funcionarios` table.
///
/// `created_at` is written once when the record is first persisted and is
/// carried through every later update unchanged.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Funcionario {
    pub cpf: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub salary: f64,
    pub sex: String,
    pub supervisor_cpf: Option<String>,
    pub department_number: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Funcionario {
    /// CPF grouped for display (`XXX.XXX.XXX-XX`).
    pub fn formatted_cpf(&self) -> String {
        format_cpf(&self.cpf)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
