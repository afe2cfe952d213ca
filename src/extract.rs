//! Extractors that pull typed data out of incoming requests.

use crate::error::{ApiError, Result};
use crate::request::Request;
use crate::validate::Validate;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::ops::Deref;
use std::str::FromStr;

/// Extract data from request parts (path, query, headers, state).
pub trait FromRequestParts: Sized {
    fn from_request_parts(req: &Request) -> Result<Self>;
}

/// Extract data from the full request, possibly consuming the body.
pub trait FromRequest: Sized {
    fn from_request(req: &mut Request) -> impl Future<Output = Result<Self>> + Send;
}

impl<T: FromRequestParts> FromRequest for T {
    async fn from_request(req: &mut Request) -> Result<Self> {
        T::from_request_parts(req)
    }
}

/// JSON body extractor.
///
/// Decode failures surface as the 400 validation envelope, because a body
/// that does not match the payload shape is a validation failure here, not
/// a malformed request in the transport sense.
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<T: DeserializeOwned + Send> FromRequest for Json<T> {
    async fn from_request(req: &mut Request) -> Result<Self> {
        let body = req
            .take_body()
            .ok_or_else(|| ApiError::internal("request body already consumed"))?;
        let value: T =
            serde_json::from_slice(&body).map_err(|err| ApiError::validation(err.to_string()))?;
        Ok(Json(value))
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JSON body extractor that also runs the payload's validation rules.
///
/// Decoding and rule checks both map to 400 with the first violation in
/// `errors`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T: DeserializeOwned + Validate + Send> FromRequest for ValidatedJson<T> {
    async fn from_request(req: &mut Request) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Query string extractor.
#[derive(Debug, Clone)]
pub struct Query<T>(pub T);

impl<T: DeserializeOwned> FromRequestParts for Query<T> {
    fn from_request_parts(req: &Request) -> Result<Self> {
        let query = req.query_string().unwrap_or("");
        let value: T = serde_urlencoded::from_str(query)
            .map_err(|err| ApiError::validation(err.to_string()))?;
        Ok(Query(value))
    }
}

impl<T> Deref for Query<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Path parameter extractor.
///
/// Every route in this API captures at most one parameter, so the first
/// captured value is the one parsed.
#[derive(Debug, Clone)]
pub struct Path<T>(pub T);

impl<T: FromStr> FromRequestParts for Path<T>
where
    T::Err: std::fmt::Display,
{
    fn from_request_parts(req: &Request) -> Result<Self> {
        let (_, value) = req
            .path_params()
            .iter()
            .next()
            .ok_or_else(|| ApiError::internal("missing path parameter"))?;
        let parsed = value
            .parse::<T>()
            .map_err(|err| ApiError::validation(err.to_string()))?;
        Ok(Path(parsed))
    }
}

impl<T> Deref for Path<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Shared application state extractor.
#[derive(Debug, Clone)]
pub struct State<T>(pub T);

impl<T: Clone + Send + Sync + 'static> FromRequestParts for State<T> {
    fn from_request_parts(req: &Request) -> Result<Self> {
        req.state().get::<T>().cloned().map(State).ok_or_else(|| {
            ApiError::internal(format!(
                "state of type `{}` not registered",
                std::any::type_name::<T>()
            ))
        })
    }
}

impl<T> Deref for State<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
