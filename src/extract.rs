//! `Json` and `Path` whose rejections come back as `{"success":false,"message":…}`
//! instead of axum's plain-text 4xx.

use axum::extract::{FromRequest, FromRequestParts};

use crate::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Payload<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Param<T>(pub T);
