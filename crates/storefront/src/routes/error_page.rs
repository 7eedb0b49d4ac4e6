//! HTML rendering of errors for the view routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{
        FromRequestParts,
        rejection::{PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use tienda_core::IdError;

use crate::error::AppError;
use crate::filters;
use crate::services::{CartError, CatalogError};

/// Error page template.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

/// An `AppError` raised by a view, rendered as an HTML page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.report();

        let status = err.status();
        let page = ErrorTemplate {
            status: status.as_u16(),
            message: err.public_message(),
        };
        (status, page).into_response()
    }
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CatalogError> for PageError {
    fn from(err: CatalogError) -> Self {
        Self(err.into())
    }
}

impl From<CartError> for PageError {
    fn from(err: CartError) -> Self {
        Self(err.into())
    }
}

impl From<IdError> for PageError {
    fn from(err: IdError) -> Self {
        Self(err.into())
    }
}

impl From<QueryRejection> for PageError {
    fn from(rejection: QueryRejection) -> Self {
        Self(rejection.into())
    }
}

impl From<PathRejection> for PageError {
    fn from(rejection: PathRejection) -> Self {
        Self(rejection.into())
    }
}

/// `axum::extract::Query` whose rejection renders the error page.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(PageError))]
pub struct PageQuery<T>(pub T);

/// `axum::extract::Path` whose rejection renders the error page.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(PageError))]
pub struct PagePath<T>(pub T);

/// Result type alias for view handlers.
pub type PageResult<T> = Result<T, PageError>;
