use crate::error::WebResult;
use crate::forms::{ListQuery, VehicleModelForm};
use crate::handlers::accept_form;
use crate::{render, AppState};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use concessionaria_core::{RecordId, VehicleModel, VehicleModelFlows};

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> WebResult<Html<String>> {
    let deleted = query.deleted();
    let html = state
        .with_connection(move |conn| {
            let page = VehicleModelFlows::open(conn)?.list(deleted)?;
            Ok(render::vehicle_model_list(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn show_create(State(state): State<AppState>) -> WebResult<Html<String>> {
    let html = state
        .with_connection(|conn| {
            let page = VehicleModelFlows::open(conn)?.show_create()?;
            Ok(render::vehicle_model_form(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn submit_create(
    State(state): State<AppState>,
    form: Result<Form<VehicleModelForm>, FormRejection>,
) -> WebResult<Html<String>> {
    let fields = VehicleModel::from(accept_form(form)?);
    let html = state
        .with_connection(move |conn| {
            let page = VehicleModelFlows::open(conn)?.submit_create(&fields)?;
            Ok(render::vehicle_model_form(&page))
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
            let page = VehicleModelFlows::open(conn)?.show_edit(id)?;
            Ok(render::vehicle_model_form(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn submit_edit(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    form: Result<Form<VehicleModelForm>, FormRejection>,
) -> WebResult<Html<String>> {
    let fields = VehicleModel::from(accept_form(form)?);
    let html = state
        .with_connection(move |conn| {
            let page = VehicleModelFlows::open(conn)?.submit_edit(id, &fields)?;
            Ok(render::vehicle_model_form(&page))
        })
        .await?;
    Ok(Html(html))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> WebResult<Redirect> {
    let redirect = state
        .with_connection(move |conn| Ok(VehicleModelFlows::open(conn)?.delete(id)?))
        .await?;
    Ok(Redirect::to(&redirect.location))
}
