use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use serde::Deserialize;
use validator::Validate;

use crate::config::AppConfig;
use crate::db::store::FuncionarioStore;
use crate::errors::AppError;
use crate::models::funcionario::Funcionario;
use crate::utils::validation::{
    format_cpf, normalize_cpf, normalize_supervisor_cpf, parse_birth_date, parse_department,
    parse_salary, validate_payload,
};
use crate::views;

#[derive(Deserialize, Validate)]
pub struct NewFuncionarioForm {
    cpf: String,
    #[validate(length(min = 1))]
    first_name: String,
    #[validate(length(min = 1))]
    last_name: String,
    #[serde(default)]
    birth_date: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    salary: String,
    #[validate(custom = "validate_sex")]
    sex: String,
    #[serde(default)]
    supervisor_cpf: String,
    #[serde(default)]
    department_number: String,
}

// The edit form has no CPF field; the identifier comes from the path.
#[derive(Deserialize, Validate)]
pub struct EditFuncionarioForm {
    #[validate(length(min = 1))]
    first_name: String,
    #[validate(length(min = 1))]
    last_name: String,
    #[serde(default)]
    birth_date: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    salary: String,
    #[validate(custom = "validate_sex")]
    sex: String,
    #[serde(default)]
    supervisor_cpf: String,
    #[serde(default)]
    department_number: String,
}

fn validate_sex(sex: &str) -> Result<(), validator::ValidationError> {
    if sex.chars().count() != 1 {
        return Err(validator::ValidationError::new("sex must be a single character"));
    }
    Ok(())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(
            web::resource("/funcionario/cadastrar")
                .route(web::get().to(create_form))
                .route(web::post().to(create)),
        )
        .service(
            web::resource("/funcionario/edit/{cpf}")
                .route(web::get().to(edit_form))
                .route(web::post().to(update)),
        )
        .service(
            web::resource("/funcionario/delete/{cpf}")
                .route(web::get().to(delete_form))
                .route(web::post().to(delete)),
        )
        // Legacy two-part detail lookup, mounted last so it cannot capture
        // the cadastrar/edit/delete paths above.
        .service(
            web::resource("/funcionario/{cpf}/{department}").route(web::get().to(legacy_detail)),
        );
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect_to_index() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

fn not_found(cpf: &str) -> AppError {
    AppError::NotFound(format!("funcionário {} não encontrado", format_cpf(cpf)))
}

fn none_if_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub async fn index(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, actix_web::Error> {
    let funcionarios = store.read_all().await?;
    Ok(html(views::index(config.get_ref(), &funcionarios)))
}

pub async fn legacy_detail(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<AppConfig>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse, actix_web::Error> {
    let (raw_cpf, department) = path.into_inner();
    let cpf = normalize_cpf(&raw_cpf)?;
    let funcionario = store
        .read("cpf", &cpf)
        .await?
        .filter(|f| f.department_number == Some(department))
        .ok_or_else(|| not_found(&cpf))?;
    Ok(html(views::detail(config.get_ref(), &funcionario)))
}

pub async fn create_form(config: web::Data<AppConfig>) -> HttpResponse {
    html(views::create_form(config.get_ref()))
}

pub async fn create(
    store: web::Data<dyn FuncionarioStore>,
    form: web::Form<NewFuncionarioForm>,
) -> Result<HttpResponse, actix_web::Error> {
    validate_payload(&*form)?;
    let form = form.into_inner();

    let cpf = normalize_cpf(&form.cpf)?;
    let funcionario = Funcionario {
        cpf,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        birth_date: parse_birth_date(&form.birth_date, None),
        address: none_if_empty(form.address),
        salary: parse_salary(&form.salary, None),
        sex: form.sex,
        supervisor_cpf: normalize_supervisor_cpf(&form.supervisor_cpf),
        department_number: parse_department(&form.department_number, None),
        created_at: Utc::now(),
    };

    store.create(&funcionario).await?;
    info!("created funcionário {}", funcionario.cpf);
    Ok(redirect_to_index())
}

pub async fn edit_form(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let cpf = normalize_cpf(&path.into_inner())?;
    let funcionario = store
        .read("cpf", &cpf)
        .await?
        .ok_or_else(|| not_found(&cpf))?;
    Ok(html(views::edit_form(config.get_ref(), &funcionario)))
}

pub async fn update(
    store: web::Data<dyn FuncionarioStore>,
    path: web::Path<String>,
    form: web::Form<EditFuncionarioForm>,
) -> Result<HttpResponse, actix_web::Error> {
    validate_payload(&*form)?;
    let cpf = normalize_cpf(&path.into_inner())?;
    let existing = store
        .read("cpf", &cpf)
        .await?
        .ok_or_else(|| not_found(&cpf))?;
    let form = form.into_inner();

    // Full-record replace; empty fields fall back to the stored values
    // and created_at is carried over from the first write.
    let funcionario = Funcionario {
        cpf: cpf.clone(),
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        birth_date: parse_birth_date(&form.birth_date, existing.birth_date),
        address: none_if_empty(form.address),
        salary: parse_salary(&form.salary, Some(existing.salary)),
        sex: form.sex,
        supervisor_cpf: normalize_supervisor_cpf(&form.supervisor_cpf),
        department_number: parse_department(&form.department_number, existing.department_number),
        created_at: existing.created_at,
    };

    store.update("cpf", &cpf, &funcionario).await?;
    info!("updated funcionário {}", cpf);
    Ok(redirect_to_index())
}

pub async fn delete_form(
    store: web::Data<dyn FuncionarioStore>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let cpf = normalize_cpf(&path.into_inner())?;
    let funcionario = store
        .read("cpf", &cpf)
        .await?
        .ok_or_else(|| not_found(&cpf))?;
    Ok(html(views::delete_confirm(config.get_ref(), &funcionario)))
}

pub async fn delete(
    store: web::Data<dyn FuncionarioStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let cpf = normalize_cpf(&path.into_inner())?;
    if store.read("cpf", &cpf).await?.is_none() {
        return Err(not_found(&cpf).into());
    }
    store.delete("cpf", &cpf).await?;
    info!("deleted funcionário {}", cpf);
    Ok(redirect_to_index())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    // In-memory gateway double; BTreeMap keeps read_all in CPF order
    // like the Postgres implementation.
    struct MemStore(Mutex<BTreeMap<String, Funcionario>>);

    impl MemStore {
        fn empty() -> web::Data<dyn FuncionarioStore> {
            let store: Arc<dyn FuncionarioStore> = Arc::new(MemStore(Mutex::new(BTreeMap::new())));
            web::Data::from(store)
        }
    }

    #[async_trait]
    impl FuncionarioStore for MemStore {
        async fn create(&self, funcionario: &Funcionario) -> Result<(), AppError> {
            let mut map = self.0.lock().unwrap();
            if map.contains_key(&funcionario.cpf) {
                return Err(AppError::Conflict("a record with this CPF already exists".into()));
            }
            map.insert(funcionario.cpf.clone(), funcionario.clone());
            Ok(())
        }

        async fn read_all(&self) -> Result<Vec<Funcionario>, AppError> {
            Ok(self.0.lock().unwrap().values().cloned().collect())
        }

        async fn read(&self, column: &str, value: &str) -> Result<Option<Funcionario>, AppError> {
            let map = self.0.lock().unwrap();
            match column {
                "cpf" => Ok(map.get(value).cloned()),
                "supervisor_cpf" => Ok(map
                    .values()
                    .find(|f| f.supervisor_cpf.as_deref() == Some(value))
                    .cloned()),
                other => Err(AppError::InternalServerError(format!(
                    "unsupported lookup column: {}",
                    other
                ))),
            }
        }

        async fn update(
            &self,
            column: &str,
            value: &str,
            funcionario: &Funcionario,
        ) -> Result<(), AppError> {
            if column != "cpf" {
                return Err(AppError::InternalServerError(format!(
                    "unsupported lookup column: {}",
                    column
                )));
            }
            let mut map = self.0.lock().unwrap();
            if map.remove(value).is_some() {
                map.insert(funcionario.cpf.clone(), funcionario.clone());
            }
            Ok(())
        }

        async fn delete(&self, column: &str, value: &str) -> Result<(), AppError> {
            if column != "cpf" {
                return Err(AppError::InternalServerError(format!(
                    "unsupported lookup column: {}",
                    column
                )));
            }
            self.0.lock().unwrap().remove(value);
            Ok(())
        }
    }

    fn test_config() -> web::Data<AppConfig> {
        web::Data::new(AppConfig {
            app_name: "Funcionários Web".to_string(),
            title: "Funcionários".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
        })
    }

    // init_service's return type is unnameable, so each test builds its
    // own app with this macro.
    macro_rules! test_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data($store.clone())
                    .app_data(test_config())
                    .configure(configure),
            )
            .await
        };
    }

    fn ana() -> Vec<(&'static str, &'static str)> {
        vec![
            ("cpf", "111.222.333-44"),
            ("first_name", "Ana"),
            ("last_name", "Silva"),
            ("birth_date", "1990-05-20"),
            ("address", "Rua das Flores, 10"),
            ("salary", "2500.0"),
            ("sex", "F"),
            ("supervisor_cpf", ""),
            ("department_number", "4"),
        ]
    }

    fn seeded(cpf: &str, department: Option<i32>) -> Funcionario {
        Funcionario {
            cpf: cpf.to_string(),
            first_name: "Bruno".to_string(),
            last_name: "Costa".to_string(),
            birth_date: None,
            address: None,
            salary: 1000.0,
            sex: "M".to_string(),
            supervisor_cpf: None,
            department_number: department,
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[actix_web::test]
    async fn create_then_read_back_by_cpf() {
        let store = MemStore::empty();
        let app = test_app!(store);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/funcionario/cadastrar")
                .set_form(ana())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 303);
        let location = resp.headers().get(header::LOCATION).and_then(|h| h.to_str().ok());
        assert_eq!(location, Some("/"));

        let stored = store.read("cpf", "11122233344").await.unwrap().unwrap();
        assert_eq!(stored.first_name, "Ana");
        assert_eq!(stored.last_name, "Silva");
        assert_eq!(stored.salary, 2500.0);
        assert_eq!(stored.supervisor_cpf, None);
        assert_eq!(stored.department_number, Some(4));

        let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request())
            .await;
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("111.222.333-44"));
        assert!(body.contains("Ana Silva"));
    }

    #[actix_web::test]
    async fn create_rejects_malformed_cpf() {
        let store = MemStore::empty();
        let app = test_app!(store);

        let mut form = ana();
        form[0] = ("cpf", "123");
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/funcionario/cadastrar")
                .set_form(form)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn create_duplicate_cpf_conflicts() {
        let store = MemStore::empty();
        store.create(&seeded("11122233344", None)).await.unwrap();
        let app = test_app!(store);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/funcionario/cadastrar")
                .set_form(ana())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn update_preserves_created_at() {
        let store = MemStore::empty();
        let original = seeded("11122233344", Some(4));
        let created_at = original.created_at;
        store.create(&original).await.unwrap();
        let app = test_app!(store);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/funcionario/edit/111.222.333-44")
                .set_form(vec![
                    ("first_name", "Bruno"),
                    ("last_name", "Costa"),
                    ("salary", "9999.0"),
                    ("sex", "M"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 303);

        let stored = store.read("cpf", "11122233344").await.unwrap().unwrap();
        assert_eq!(stored.salary, 9999.0);
        assert_eq!(stored.created_at, created_at);
        // Fields left blank on the form keep their stored values.
        assert_eq!(stored.department_number, Some(4));
    }

    #[actix_web::test]
    async fn edit_form_of_missing_cpf_is_404() {
        let store = MemStore::empty();
        let app = test_app!(store);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/funcionario/edit/99988877766")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn delete_confirmation_of_missing_cpf_is_404() {
        let store = MemStore::empty();
        let app = test_app!(store);

        for req in [
            test::TestRequest::get().uri("/funcionario/delete/99988877766"),
            test::TestRequest::post().uri("/funcionario/delete/99988877766"),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), 404);
        }
    }

    #[actix_web::test]
    async fn delete_removes_the_record() {
        let store = MemStore::empty();
        store.create(&seeded("11122233344", None)).await.unwrap();
        let app = test_app!(store);

        let confirm = test::call_and_read_body(
            &app,
            test::TestRequest::get()
                .uri("/funcionario/delete/11122233344")
                .to_request(),
        )
        .await;
        let confirm = String::from_utf8(confirm.to_vec()).unwrap();
        assert!(confirm.contains("Bruno Costa"));

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/funcionario/delete/11122233344")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 303);
        assert!(store.read("cpf", "11122233344").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn legacy_detail_requires_matching_department() {
        let store = MemStore::empty();
        store.create(&seeded("11122233344", Some(4))).await.unwrap();
        let app = test_app!(store);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/funcionario/11122233344/4")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/funcionario/11122233344/9")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn listing_is_in_cpf_order() {
        let store = MemStore::empty();
        store.create(&seeded("55566677788", None)).await.unwrap();
        store.create(&seeded("11122233344", None)).await.unwrap();

        let all = store.read_all().await.unwrap();
        let cpfs: Vec<&str> = all.iter().map(|f| f.cpf.as_str()).collect();
        assert_eq!(cpfs, vec!["11122233344", "55566677788"]);
    }
}
