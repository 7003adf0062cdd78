use actix_web::HttpResponse;
use serde::Serialize;
use validator::ValidationErrors;

/// Every client-facing error carries a single human-readable detail string.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Flatten validator field errors into one detail string, e.g.
/// "name: Name must be at most 50 characters".
pub fn validation_detail(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for field: {}", field))
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

/// Creates a configured JsonConfig with standardized error handling for the
/// entire project: every body extraction failure becomes a 400 with a
/// `detail` message.
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| {
        let detail = match &err {
            actix_web_validator::Error::Validate(validation_errors) => {
                validation_detail(validation_errors)
            }
            actix_web_validator::Error::Deserialize(de_err) => {
                let err_string = de_err.to_string();
                if err_string.contains("EOF while parsing") {
                    "Request body is empty. Expected JSON payload".to_string()
                } else if err_string.contains("unknown variant") {
                    "Invalid enum value. Check allowed values for this field".to_string()
                } else {
                    "Invalid JSON format".to_string()
                }
            }
            _ => "Request validation failed".to_string(),
        };
        actix_web::error::InternalError::from_response(
            "",
            HttpResponse::BadRequest().json(ErrorResponse { detail }),
        )
        .into()
    })
}

/// Plain JSON body extraction (the bulk endpoints take a bare array, which
/// goes through `web::Json` rather than the validating extractor) gets the
/// same `detail` shape.
pub fn body_config() -> actix_web::web::JsonConfig {
    actix_web::web::JsonConfig::default().error_handler(|err, _req| {
        let detail = format!("Invalid JSON payload: {}", err);
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse { detail }),
        )
        .into()
    })
}

/// Query-string extraction failures (bad dates, non-numeric page, unknown
/// status value) get the same `detail` shape as body failures.
pub fn query_config() -> actix_web::web::QueryConfig {
    actix_web::web::QueryConfig::default().error_handler(|err, _req| {
        let detail = format!("Invalid query parameter: {}", err);
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse { detail }),
        )
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(max = 3, message = "Name must be at most 3 characters"))]
        name: String,
    }

    #[test]
    fn detail_includes_field_and_message() {
        let probe = Probe {
            name: "too long".into(),
        };
        let errors = probe.validate().unwrap_err();
        assert_eq!(
            validation_detail(&errors),
            "name: Name must be at most 3 characters"
        );
    }
}
