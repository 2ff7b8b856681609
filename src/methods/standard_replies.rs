use crate::helper_model::{self, RentalError};
use warp::http::StatusCode;
use warp::{Rejection, Reply};

fn error_reply(title: &str, message: String, status: StatusCode) -> Result<(warp::reply::Response,), Rejection> {
    let msg = helper_model::ErrorResponse {
        title: title.to_string(),
        message,
    };
    Ok::<_, Rejection>((warp::reply::with_status(warp::reply::json(&msg), status).into_response(),))
}

pub fn bad_request(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    error_reply("Bad Request", err_msg.to_string(), StatusCode::BAD_REQUEST)
}

pub fn internal_server_error_response(msg: String) -> Result<(warp::reply::Response,), Rejection> {
    tracing::error!("{}", msg);
    error_reply(
        "Internal Server Error",
        String::from("Something went wrong. Please try again."),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

pub fn method_not_allowed_response() -> Result<(warp::reply::Response,), Rejection> {
    error_reply(
        "Method Not Allowed",
        String::from("This endpoint does not accept that method."),
        StatusCode::METHOD_NOT_ALLOWED,
    )
}

pub fn auth_invalid() -> Result<(warp::reply::Response,), Rejection> {
    error_reply(
        "Unauthorized",
        String::from("Please sign in to continue."),
        StatusCode::UNAUTHORIZED,
    )
}

pub fn user_not_admin() -> Result<(warp::reply::Response,), Rejection> {
    error_reply(
        "Permission Denied",
        String::from("You are not an admin."),
        StatusCode::FORBIDDEN,
    )
}

pub fn response_with_obj<T>(obj: T, status_code: StatusCode)
    -> Result<(warp::reply::Response,), Rejection> where T: serde::Serialize {
    Ok((warp::reply::with_status(warp::reply::json(&obj), status_code).into_response(),))
}

/// Map a storefront error to the reply the client shows. `context` names the
/// endpoint for the server log.
pub fn rental_error_response(context: &str, err: RentalError) -> Result<(warp::reply::Response,), Rejection> {
    if err.is_not_found() {
        return error_reply("Not Found", err.to_string(), StatusCode::NOT_FOUND);
    }
    let (title, status) = match &err {
        RentalError::Unavailable { .. } => {
            return error_reply(
                "Booking Not Allowed",
                String::from("Sorry, the car is not available for your selected dates."),
                StatusCode::CONFLICT,
            );
        }
        RentalError::Internal(_) => {
            return internal_server_error_response(format!("{context}: {err}"));
        }
        RentalError::OutsideBookingWindow { .. } => ("Booking Not Allowed", StatusCode::BAD_REQUEST),
        RentalError::InvalidStatusTransition { .. } => ("Status Change Not Allowed", StatusCode::CONFLICT),
        _ => ("Bad Request", StatusCode::BAD_REQUEST),
    };
    error_reply(title, err.to_string(), status)
}
