use lambda_http::{tracing, Body, Error, Request, RequestExt, Response};
use serde::Serialize;
use serde_json::Value;

use crate::error::HandlerError;
use crate::item::{Item, ID_FIELD, INFO_FIELD};
use crate::store::ItemStore;

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    message: &'static str,
    error: String,
}

fn json_response<T: Serialize + ?Sized>(
    status: u16,
    body: &T,
) -> Result<Response<Body>, HandlerError> {
    let body = serde_json::to_string(body)?;
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::Text(body))?)
}

fn message_response(status: u16, message: &'static str) -> Result<Response<Body>, HandlerError> {
    json_response(status, &MessageResponse { message })
}

async fn get_all_items<S>(store: &S) -> Result<Response<Body>, HandlerError>
where
    S: ItemStore + ?Sized,
{
    let items = store.scan().await?;
    json_response(200, &items)
}

async fn get_item<S>(store: &S, id: &str) -> Result<Response<Body>, HandlerError>
where
    S: ItemStore + ?Sized,
{
    match store.get(id).await? {
        Some(item) => json_response(200, &item),
        // A missing item is not distinguished from a found one
        None => Ok(Response::builder()
            .status(200)
            .header("content-type", "application/json")
            .body(Body::Empty)?),
    }
}

async fn create_item<S>(store: &S, body: &[u8]) -> Result<Response<Body>, HandlerError>
where
    S: ItemStore + ?Sized,
{
    let item = Item::from_value(serde_json::from_slice(body)?)?;
    if item.id().is_none() {
        return Err(match item.get(ID_FIELD) {
            None => HandlerError::MissingField(ID_FIELD),
            Some(_) => HandlerError::InvalidField {
                field: ID_FIELD,
                expected: "a string",
            },
        });
    }

    store.put(item).await?;
    message_response(201, "Item created")
}

async fn update_item<S>(store: &S, id: &str, body: &[u8]) -> Result<Response<Body>, HandlerError>
where
    S: ItemStore + ?Sized,
{
    let request: Value = serde_json::from_slice(body)?;
    // Only `info` is written; anything else in the body is dropped
    let info = Item::from_value(request)?
        .get(INFO_FIELD)
        .cloned()
        .ok_or(HandlerError::MissingField(INFO_FIELD))?;

    let updated = store.update_info(id, info).await?;
    json_response(200, &updated)
}

async fn delete_item<S>(store: &S, id: &str) -> Result<Response<Body>, HandlerError>
where
    S: ItemStore + ?Sized,
{
    store.delete(id).await?;
    message_response(200, "Item deleted")
}

async fn dispatch<S>(store: &S, event: &Request) -> Result<Response<Body>, HandlerError>
where
    S: ItemStore + ?Sized,
{
    let method = event.method().as_str();
    let params = event.path_parameters();
    let id = params.first("id").filter(|id| !id.is_empty());
    let body: &[u8] = event.body().as_ref();

    tracing::debug!(method, id = ?id, "dispatching request");

    match (method, id) {
        ("GET", None) => get_all_items(store).await,
        ("GET", Some(id)) => get_item(store, id).await,
        ("POST", _) => create_item(store, body).await,
        ("PUT", Some(id)) => update_item(store, id, body).await,
        ("PUT", None) => message_response(400, "Missing id for updating"),
        ("DELETE", Some(id)) => delete_item(store, id).await,
        ("DELETE", None) => message_response(400, "Missing id for deletion"),
        _ => message_response(405, "Method Not Allowed"),
    }
}

pub(crate) async fn function_handler<S>(store: &S, event: Request) -> Result<Response<Body>, Error>
where
    S: ItemStore + ?Sized,
{
    match dispatch(store, &event).await {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::error!(
                error = %e,
                method = %event.method(),
                path = event.uri().path(),
                "request failed"
            );
            let body = serde_json::to_string(&ErrorResponse {
                message: "Internal Server Error",
                error: e.to_string(),
            })?;
            Ok(Response::builder()
                .status(500)
                .header("content-type", "application/json")
                .body(Body::Text(body))?)
        }
    }
}
