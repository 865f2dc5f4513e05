use crate::error::WebResult;
use crate::forms::{ListQuery, ManufacturerForm};
use crate::handlers::accept_form;
use crate::{render, AppState};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use concessionaria_core::{Manufacturer, ManufacturerFlows, RecordId};

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> WebResult<Html<String>> {
    let deleted = query.deleted();
    let html = state
        .with_connection(move |conn| {
            let page = ManufacturerFlows::open(conn)?.list(deleted)?;
            Ok(render::manufacturer_list(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn show_create(State(state): State<AppState>) -> WebResult<Html<String>> {
    let html = state
        .with_connection(|conn| {
            let page = ManufacturerFlows::open(conn)?.show_create()?;
            Ok(render::manufacturer_form(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn submit_create(
    State(state): State<AppState>,
    form: Result<Form<ManufacturerForm>, FormRejection>,
) -> WebResult<Html<String>> {
    let fields = Manufacturer::from(accept_form(form)?);
    let html = state
        .with_connection(move |conn| {
            let page = ManufacturerFlows::open(conn)?.submit_create(&fields)?;
            Ok(render::manufacturer_form(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn show_edit(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> WebResult<Html<String>> {
    let html = state
        .with_connection(move |conn| {
            let page = ManufacturerFlows::open(conn)?.show_edit(id)?;
            Ok(render::manufacturer_form(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn submit_edit(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    form: Result<Form<ManufacturerForm>, FormRejection>,
) -> WebResult<Html<String>> {
    let fields = Manufacturer::from(accept_form(form)?);
    let html = state
        .with_connection(move |conn| {
            let page = ManufacturerFlows::open(conn)?.submit_edit(id, &fields)?;
            Ok(render::manufacturer_form(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> WebResult<Redirect> {
    let redirect = state
        .with_connection(move |conn| Ok(ManufacturerFlows::open(conn)?.delete(id)?))
        .await?;
    Ok(Redirect::to(&redirect.location))
}
