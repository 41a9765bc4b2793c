//! Server-rendered pages.
//!
//! Every mutation answers with a `303 See Other` back to the dashboard,
//! carrying a `notice` parameter that becomes the flash message. Failures
//! render `error.html` with the matching status.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, SortOption};
use crate::error::ServerError;
use crate::product::{Product, ProductForm, ProductInput};
use crate::render::{RenderError, TemplateEngine};
use crate::state::AppState;
use crate::store::ResourceStore;
use crate::views::{
    detail_view, form_view, list_view, DetailViewResult, FormMode, FormViewBuilder,
    FormViewResult, ListViewResult, Message,
};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    pub q: String,
    pub sort: Option<String>,
    pub notice: Option<String>,
}

#[derive(Serialize)]
struct SortChoice {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct DashboardPage<'a> {
    page_title: &'a str,
    currency: &'a str,
    messages: Vec<Message>,
    list: ListViewResult<Product>,
    form: FormViewResult<ProductForm>,
    query: String,
    sort: &'static str,
    sort_options: Vec<SortChoice>,
}

#[derive(Serialize)]
struct DetailPage<'a> {
    page_title: &'a str,
    currency: &'a str,
    messages: Vec<Message>,
    detail: DetailViewResult<Product>,
}

#[derive(Serialize)]
struct EditPage<'a> {
    page_title: &'a str,
    currency: &'a str,
    messages: Vec<Message>,
    product_name: String,
    form: FormViewResult<ProductForm>,
}

#[derive(Serialize)]
struct ErrorPage<'a> {
    page_title: &'a str,
    messages: Vec<Message>,
    status: u16,
    message: String,
}

/// Flash text for a `notice` value.
fn notice_message(notice: Option<&str>) -> Option<Message> {
    let text = match notice? {
        "created" => "Product created successfully!",
        "updated" => "Product updated successfully!",
        "deleted" => "Product deleted successfully!",
        _ => return None,
    };
    Some(Message::success(text))
}

fn render<T: Serialize>(
    state: &AppState,
    template: &str,
    status: StatusCode,
    context: &T,
) -> Result<Response, ServerError> {
    let data = serde_json::to_value(context).map_err(RenderError::from)?;
    let html = state.engine.render_named(template, &data)?;
    Ok((status, Html(html)).into_response())
}

/// Renders `err` as an HTML error page.
fn error_page(state: &AppState, err: ServerError) -> Response {
    err.log();
    let status = err.status_code();
    let page = ErrorPage {
        page_title: &state.config.page_title,
        messages: Vec::new(),
        status: status.as_u16(),
        message: err.to_string(),
    };
    match render(state, "error.html", status, &page) {
        Ok(resp) => resp,
        Err(render_err) => {
            tracing::error!(error = %render_err, "error page failed to render");
            (status, err.to_string()).into_response()
        }
    }
}

fn respond(state: &AppState, result: Result<Response, ServerError>) -> Response {
    result.unwrap_or_else(|err| error_page(state, err))
}

fn render_dashboard(
    state: &AppState,
    params: &DashboardParams,
    form: FormViewResult<ProductForm>,
    status: StatusCode,
) -> Result<Response, ServerError> {
    let snapshot = state.store.snapshot()?;
    let sort = params.sort.as_deref().and_then(SortOption::parse);
    let page = catalog::browse(&snapshot, &params.q, sort);
    let filter_summary = page.filter_summary();

    let mut list = list_view(page.items)
        .intro("All Products")
        .total_count(page.total)
        .maybe_message(notice_message(params.notice.as_deref()));
    if let Some(summary) = filter_summary {
        list = list.filter_summary(summary);
    }
    let list = list.build();

    let context = DashboardPage {
        page_title: &state.config.page_title,
        currency: &state.config.currency,
        messages: list.messages.clone(),
        list,
        form,
        query: page.query,
        sort: page.sort.as_str(),
        sort_options: SortOption::ALL
            .iter()
            .map(|opt| SortChoice {
                value: opt.as_str(),
                label: opt.label(),
            })
            .collect(),
    };
    render(state, "dashboard.html", status, &context)
}

fn empty_add_form() -> FormViewResult<ProductForm> {
    form_view(ProductForm::default(), "/products").build()
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Response {
    let result = render_dashboard(&state, &params, empty_add_form(), StatusCode::OK);
    respond(&state, result)
}

pub async fn create(State(state): State<Arc<AppState>>, Form(form): Form<ProductForm>) -> Response {
    let result = match form.parse() {
        Ok(input) => state
            .store
            .insert(input)
            .map(|_| Redirect::to("/?notice=created").into_response())
            .map_err(ServerError::from),
        Err(errors) => {
            tracing::warn!(errors = errors.len(), "add product form rejected");
            let form = form_view(form, "/products").validation_errors(errors).build();
            render_dashboard(
                &state,
                &DashboardParams::default(),
                form,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
    };
    respond(&state, result)
}

fn find_product(state: &AppState, raw_id: &str) -> Result<Product, ServerError> {
    let id = state.store.parse_id(raw_id)?;
    Ok(state.store.resolve(&id)?)
}

pub async fn detail(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let result = find_product(&state, &id).and_then(|product| {
        let id = product.product_id;
        let mut detail = detail_view(product.clone()).title(product.product_name.clone());
        if !product.brand.is_empty() {
            detail = detail.subtitle(product.brand.clone());
        }
        let detail = detail
            .link("Edit", format!("/products/{id}/edit"))
            .form_action("Delete", format!("/products/{id}/delete"))
            .link("Back to all products", "/")
            .build();

        let page = DetailPage {
            page_title: &state.config.page_title,
            currency: &state.config.currency,
            messages: detail.messages.clone(),
            detail,
        };
        render(&state, "detail.html", StatusCode::OK, &page)
    });
    respond(&state, result)
}

fn render_edit(
    state: &AppState,
    product: &Product,
    form: FormViewResult<ProductForm>,
    status: StatusCode,
) -> Result<Response, ServerError> {
    let page = EditPage {
        page_title: &state.config.page_title,
        currency: &state.config.currency,
        messages: form.messages.clone(),
        product_name: product.product_name.clone(),
        form,
    };
    render(state, "edit.html", status, &page)
}

fn edit_form(product: &Product, values: ProductForm) -> FormViewBuilder<ProductForm> {
    form_view(values, format!("/products/{}", product.product_id)).mode(FormMode::Update)
}

pub async fn edit(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let result = find_product(&state, &id).and_then(|product| {
        let form = edit_form(&product, ProductForm::from(&product)).build();
        render_edit(&state, &product, form, StatusCode::OK)
    });
    respond(&state, result)
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Response {
    let result = find_product(&state, &id).and_then(|product| match form.parse() {
        Ok(input) => {
            // The form has no delivery or FAQ fields; keep what is stored.
            let input = ProductInput {
                delivery: product.delivery.clone(),
                faqs: product.faqs.clone(),
                ..input
            };
            state.store.replace(product.product_id, input)?;
            Ok(Redirect::to("/?notice=updated").into_response())
        }
        Err(errors) => {
            tracing::warn!(
                product_id = product.product_id,
                errors = errors.len(),
                "edit product form rejected"
            );
            let view = edit_form(&product, form).validation_errors(errors).build();
            render_edit(&state, &product, view, StatusCode::UNPROCESSABLE_ENTITY)
        }
    });
    respond(&state, result)
}

pub async fn delete(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let result = state
        .store
        .parse_id(&id)
        .and_then(|id| state.store.delete(&id))
        .map(|()| Redirect::to("/?notice=deleted").into_response())
        .map_err(ServerError::from);
    respond(&state, result)
}

pub async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    error_page(&state, ServerError::not_found("Page not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            notice_message(Some("created")).map(|m| m.text),
            Some("Product created successfully!".to_string())
        );
        assert_eq!(
            notice_message(Some("deleted")).map(|m| m.text),
            Some("Product deleted successfully!".to_string())
        );
        assert!(notice_message(Some("hacked")).is_none());
        assert!(notice_message(None).is_none());
    }
}
