//! Server-side HTML pages. Plain string builders fed entities and the
//! configured title/app-name pair; every piece of user-controlled text
//! goes through [`escape_html`].

use crate::config::AppConfig;
use crate::models::funcionario::Funcionario;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(config: &AppConfig, heading: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"pt-BR\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - {app_name}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{app_name}</h1>\n\
         <h2>{heading}</h2>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape_html(&config.title),
        app_name = escape_html(&config.app_name),
        heading = escape_html(heading),
        body = body,
    )
}

pub fn index(config: &AppConfig, funcionarios: &[Funcionario]) -> String {
    let mut rows = String::new();
    for f in funcionarios {
        let department = f
            .department_number
            .map(|d| d.to_string())
            .unwrap_or_default();
        rows.push_str(&format!(
            "<tr>\
             <td>{cpf}</td><td>{name}</td><td>{salary:.2}</td><td>{department}</td>\
             <td><a href=\"/funcionario/edit/{raw_cpf}\">editar</a> \
             <a href=\"/funcionario/delete/{raw_cpf}\">excluir</a></td>\
             </tr>\n",
            cpf = escape_html(&f.formatted_cpf()),
            name = escape_html(&f.full_name()),
            salary = f.salary,
            department = department,
            raw_cpf = escape_html(&f.cpf),
        ));
    }
    let body = format!(
        "<p><a href=\"/funcionario/cadastrar\">Cadastrar funcionário</a></p>\n\
         <table border=\"1\">\n\
         <tr><th>CPF</th><th>Nome</th><th>Salário</th><th>Departamento</th><th></th></tr>\n\
         {rows}</table>",
    );
    layout(config, "Funcionários", &body)
}

pub fn detail(config: &AppConfig, f: &Funcionario) -> String {
    let body = format!(
        "<dl>\n\
         <dt>CPF</dt><dd>{cpf}</dd>\n\
         <dt>Nome</dt><dd>{name}</dd>\n\
         <dt>Data de nascimento</dt><dd>{birth_date}</dd>\n\
         <dt>Endereço</dt><dd>{address}</dd>\n\
         <dt>Salário</dt><dd>{salary:.2}</dd>\n\
         <dt>Sexo</dt><dd>{sex}</dd>\n\
         <dt>CPF do supervisor</dt><dd>{supervisor}</dd>\n\
         <dt>Departamento</dt><dd>{department}</dd>\n\
         <dt>Cadastrado em</dt><dd>{created_at}</dd>\n\
         </dl>\n\
         <p><a href=\"/\">Voltar</a></p>",
        cpf = escape_html(&f.formatted_cpf()),
        name = escape_html(&f.full_name()),
        birth_date = f.birth_date.map(|d| d.to_string()).unwrap_or_default(),
        address = escape_html(f.address.as_deref().unwrap_or("")),
        salary = f.salary,
        sex = escape_html(&f.sex),
        supervisor = escape_html(
            &f.supervisor_cpf
                .as_deref()
                .map(crate::utils::validation::format_cpf)
                .unwrap_or_default()
        ),
        department = f
            .department_number
            .map(|d| d.to_string())
            .unwrap_or_default(),
        created_at = f.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    layout(config, "Detalhes do funcionário", &body)
}

fn form_fields(f: Option<&Funcionario>) -> String {
    let text = |v: Option<&str>| escape_html(v.unwrap_or(""));
    format!(
        "<p><label>Nome <input name=\"first_name\" value=\"{first_name}\"></label></p>\n\
         <p><label>Sobrenome <input name=\"last_name\" value=\"{last_name}\"></label></p>\n\
         <p><label>Data de nascimento <input type=\"date\" name=\"birth_date\" value=\"{birth_date}\"></label></p>\n\
         <p><label>Endereço <input name=\"address\" value=\"{address}\"></label></p>\n\
         <p><label>Salário <input name=\"salary\" value=\"{salary}\"></label></p>\n\
         <p><label>Sexo <input name=\"sex\" maxlength=\"1\" value=\"{sex}\"></label></p>\n\
         <p><label>CPF do supervisor <input name=\"supervisor_cpf\" value=\"{supervisor}\"></label></p>\n\
         <p><label>Número do departamento <input name=\"department_number\" value=\"{department}\"></label></p>",
        first_name = text(f.map(|f| f.first_name.as_str())),
        last_name = text(f.map(|f| f.last_name.as_str())),
        birth_date = f
            .and_then(|f| f.birth_date)
            .map(|d| d.to_string())
            .unwrap_or_default(),
        address = text(f.and_then(|f| f.address.as_deref())),
        salary = f.map(|f| format!("{:.2}", f.salary)).unwrap_or_default(),
        sex = text(f.map(|f| f.sex.as_str())),
        supervisor = text(f.and_then(|f| f.supervisor_cpf.as_deref())),
        department = f
            .and_then(|f| f.department_number)
            .map(|d| d.to_string())
            .unwrap_or_default(),
    )
}

pub fn create_form(config: &AppConfig) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/funcionario/cadastrar\">\n\
         <p><label>CPF <input name=\"cpf\" placeholder=\"111.222.333-44\"></label></p>\n\
         {fields}\n\
         <p><button type=\"submit\">Cadastrar</button></p>\n\
         </form>\n\
         <p><a href=\"/\">Voltar</a></p>",
        fields = form_fields(None),
    );
    layout(config, "Cadastrar funcionário", &body)
}

pub fn edit_form(config: &AppConfig, f: &Funcionario) -> String {
    let body = format!(
        "<p>CPF: {cpf}</p>\n\
         <form method=\"post\" action=\"/funcionario/edit/{raw_cpf}\">\n\
         {fields}\n\
         <p><button type=\"submit\">Salvar</button></p>\n\
         </form>\n\
         <p><a href=\"/\">Voltar</a></p>",
        cpf = escape_html(&f.formatted_cpf()),
        raw_cpf = escape_html(&f.cpf),
        fields = form_fields(Some(f)),
    );
    layout(config, "Editar funcionário", &body)
}

pub fn delete_confirm(config: &AppConfig, f: &Funcionario) -> String {
    let body = format!(
        "<p>Excluir o funcionário {name} ({cpf})?</p>\n\
         <form method=\"post\" action=\"/funcionario/delete/{raw_cpf}\">\n\
         <p><button type=\"submit\">Excluir</button> <a href=\"/\">Cancelar</a></p>\n\
         </form>",
        name = escape_html(&f.full_name()),
        cpf = escape_html(&f.formatted_cpf()),
        raw_cpf = escape_html(&f.cpf),
    );
    layout(config, "Excluir funcionário", &body)
}

pub fn error_page(status_line: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"pt-BR\">\n\
         <head><meta charset=\"utf-8\"><title>{status}</title></head>\n\
         <body><h1>{status}</h1><p>{message}</p><p><a href=\"/\">Voltar</a></p></body>\n\
         </html>\n",
        status = escape_html(status_line),
        message = escape_html(message),
    )
}
