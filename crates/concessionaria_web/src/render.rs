//! Server-side HTML pages for the coordinator's page models.
//!
//! Markup is deliberately plain: one table per list, one form per
//! create/edit page. Every interpolated value passes through `escape`.

use concessionaria_core::{
    EntityKind, FormMode, FormPage, ListPage, Manufacturer, Record, Vehicle, VehicleListing,
    VehicleModel, VehicleModelListing,
};
use std::convert::Infallible;

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<nav><a href=\"{m}\">Montadoras</a> | <a href=\"{mv}\">Modelos de Veículo</a> | <a href=\"{v}\">Veículos</a></nav>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
        m = EntityKind::Manufacturer.list_path(),
        mv = EntityKind::VehicleModel.list_path(),
        v = EntityKind::Vehicle.list_path(),
    )
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Sim"
    } else {
        "Não"
    }
}

fn checked(value: bool) -> &'static str {
    if value {
        " checked"
    } else {
        ""
    }
}

pub fn index() -> String {
    let mut body = String::from("<ul>\n");
    for entity in [
        EntityKind::Manufacturer,
        EntityKind::VehicleModel,
        EntityKind::Vehicle,
    ] {
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            entity.list_path(),
            entity.plural_label()
        ));
    }
    body.push_str("</ul>\n");
    layout("Concessionária", &body)
}

fn list_page(
    entity: EntityKind,
    deleted: bool,
    headers: &[&str],
    rows: Vec<(i64, Vec<String>)>,
) -> String {
    let base = entity.list_path();
    let mut body = String::new();
    if deleted {
        body.push_str(&format!(
            "<p class=\"notice\">{} excluído(a) com sucesso.</p>\n",
            entity.label()
        ));
    }
    body.push_str(&format!(
        "<p><a href=\"{base}/create\">Novo(a) {}</a></p>\n<table>\n<thead><tr><th>ID</th>",
        entity.label()
    ));
    for header in headers {
        body.push_str(&format!("<th>{header}</th>"));
    }
    body.push_str("<th>Ações</th></tr></thead>\n<tbody>\n");
    for (id, cells) in rows {
        body.push_str(&format!("<tr><td>{id}</td>"));
        for cell in cells {
            body.push_str(&format!("<td>{cell}</td>"));
        }
        body.push_str(&format!(
            "<td><a href=\"{base}/edit/{id}\">Editar</a> <form method=\"post\" action=\"{base}/delete/{id}\"><button type=\"submit\">Excluir</button></form></td></tr>\n"
        ));
    }
    body.push_str("</tbody>\n</table>\n");
    layout(entity.plural_label(), &body)
}

pub fn manufacturer_list(page: &ListPage<Record<Manufacturer>>) -> String {
    let rows = page
        .items
        .iter()
        .map(|record| {
            (
                record.id,
                vec![
                    escape(&record.data.name),
                    escape(&record.data.country),
                    record.data.founded_year.to_string(),
                ],
            )
        })
        .collect();
    list_page(page.entity, page.deleted, &["Nome", "País", "Ano de fundação"], rows)
}

pub fn vehicle_model_list(page: &ListPage<VehicleModelListing>) -> String {
    let rows = page
        .items
        .iter()
        .map(|listing| {
            let model = &listing.model.data;
            (
                listing.model.id,
                vec![
                    escape(&model.name),
                    parent_label(listing.manufacturer.as_ref().map(|m| m.data.name.as_str())),
                    format!("{:.2}", model.reference_price),
                    format!("{:.1}", model.displacement),
                    yes_no(model.turbo).to_string(),
                    yes_no(model.automatic).to_string(),
                ],
            )
        })
        .collect();
    list_page(
        page.entity,
        page.deleted,
        &["Nome", "Montadora", "Valor de referência", "Motorização", "Turbo", "Automático"],
        rows,
    )
}

pub fn vehicle_list(page: &ListPage<VehicleListing>) -> String {
    let rows = page
        .items
        .iter()
        .map(|listing| {
            let vehicle = &listing.vehicle.data;
            (
                listing.vehicle.id,
                vec![
                    parent_label(listing.model.as_ref().map(|m| m.data.name.as_str())),
                    escape(&vehicle.color),
                    vehicle.manufacture_year.to_string(),
                    vehicle.model_year.to_string(),
                    format!("{:.2}", vehicle.price),
                    escape(&vehicle.license_plate),
                    yes_no(vehicle.sold).to_string(),
                ],
            )
        })
        .collect();
    list_page(
        page.entity,
        page.deleted,
        &["Modelo", "Cor", "Ano de fabricação", "Ano do modelo", "Valor", "Placa", "Vendido"],
        rows,
    )
}

fn parent_label(name: Option<&str>) -> String {
    name.map_or_else(|| "(removido)".to_string(), escape)
}

fn form_page<T, P>(page: &FormPage<T, P>, fields: &str) -> String {
    let base = page.entity.list_path();
    let (title, action) = match page.mode {
        FormMode::Create => (
            format!("Cadastrar {}", page.entity.label()),
            format!("{base}/create"),
        ),
        FormMode::Edit(id) => (
            format!("Editar {}", page.entity.label()),
            format!("{base}/edit/{id}"),
        ),
    };
    let mut body = String::new();
    if page.success {
        body.push_str("<p class=\"notice\">Salvo com sucesso.</p>\n");
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"{action}\">\n{fields}<button type=\"submit\">Salvar</button>\n</form>\n<p><a href=\"{base}\">Voltar</a></p>\n"
    ));
    layout(&title, &body)
}

/// Values shown in the inputs: the edited record, or blank on create.
fn prefill<T>(page: &FormPage<T, impl Sized>) -> Option<&T> {
    match page.mode {
        FormMode::Edit(_) => page.record.as_ref().map(|record| &record.data),
        FormMode::Create => None,
    }
}

fn text_input(label: &str, name: &str, value: Option<String>) -> String {
    format!(
        "<label>{label} <input type=\"text\" name=\"{name}\" value=\"{}\" required></label>\n",
        escape(&value.unwrap_or_default())
    )
}

fn number_input(label: &str, name: &str, step: &str, value: Option<String>) -> String {
    format!(
        "<label>{label} <input type=\"number\" step=\"{step}\" name=\"{name}\" value=\"{}\" required></label>\n",
        escape(&value.unwrap_or_default())
    )
}

fn checkbox(label: &str, name: &str, value: bool) -> String {
    format!(
        "<label><input type=\"checkbox\" name=\"{name}\"{}> {label}</label>\n",
        checked(value)
    )
}

fn select<P>(
    label: &str,
    name: &str,
    parents: &[Record<P>],
    selected: Option<i64>,
    option_label: impl Fn(&P) -> &str,
) -> String {
    let mut html = format!("<label>{label} <select name=\"{name}\" required>\n");
    for parent in parents {
        let marker = if Some(parent.id) == selected {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{}\"{marker}>{}</option>\n",
            parent.id,
            escape(option_label(&parent.data))
        ));
    }
    html.push_str("</select></label>\n");
    html
}

pub fn manufacturer_form(page: &FormPage<Manufacturer, Infallible>) -> String {
    let current = prefill(page);
    let mut fields = String::new();
    fields.push_str(&text_input("Nome", "nome", current.map(|m| m.name.clone())));
    fields.push_str(&text_input("País", "pais", current.map(|m| m.country.clone())));
    fields.push_str(&number_input(
        "Ano de fundação",
        "ano_fundacao",
        "1",
        current.map(|m| m.founded_year.to_string()),
    ));
    form_page(page, &fields)
}

pub fn vehicle_model_form(page: &FormPage<VehicleModel, Manufacturer>) -> String {
    let current = prefill(page);
    let mut fields = String::new();
    fields.push_str(&text_input("Nome", "nome", current.map(|m| m.name.clone())));
    fields.push_str(&select(
        "Montadora",
        "montadora_id",
        &page.parents,
        current.map(|m| m.manufacturer_id),
        |manufacturer| manufacturer.name.as_str(),
    ));
    fields.push_str(&number_input(
        "Valor de referência",
        "valor_referencia",
        "0.01",
        current.map(|m| m.reference_price.to_string()),
    ));
    fields.push_str(&number_input(
        "Motorização",
        "motorizacao",
        "0.1",
        current.map(|m| m.displacement.to_string()),
    ));
    fields.push_str(&checkbox("Turbo", "turbo", current.is_some_and(|m| m.turbo)));
    fields.push_str(&checkbox(
        "Automático",
        "automatico",
        current.is_some_and(|m| m.automatic),
    ));
    form_page(page, &fields)
}

pub fn vehicle_form(page: &FormPage<Vehicle, VehicleModel>) -> String {
    let current = prefill(page);
    let mut fields = String::new();
    fields.push_str(&select(
        "Modelo",
        "modelo_id",
        &page.parents,
        current.map(|v| v.model_id),
        |model| model.name.as_str(),
    ));
    fields.push_str(&text_input("Cor", "cor", current.map(|v| v.color.clone())));
    fields.push_str(&number_input(
        "Ano de fabricação",
        "ano_fabricacao",
        "1",
        current.map(|v| v.manufacture_year.to_string()),
    ));
    fields.push_str(&number_input(
        "Ano do modelo",
        "ano_modelo",
        "1",
        current.map(|v| v.model_year.to_string()),
    ));
    fields.push_str(&number_input(
        "Valor",
        "valor",
        "0.01",
        current.map(|v| v.price.to_string()),
    ));
    fields.push_str(&text_input(
        "Placa",
        "placa",
        current.map(|v| v.license_plate.clone()),
    ));
    fields.push_str(&checkbox("Vendido", "vendido", current.is_some_and(|v| v.sold)));
    form_page(page, &fields)
}
