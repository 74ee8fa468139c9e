use validator::{ValidationErrors, ValidationErrorsKind};

pub fn format_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect(errors, "", &mut messages);

    if messages.is_empty() {
        messages.push("Validation failed".to_string());
    }

    messages.sort();
    messages
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| match err.code.as_ref() {
                            "email" => "invalid email format".to_string(),
                            "length" => "invalid length".to_string(),
                            "range" => "value out of range".to_string(),
                            "regex" => "invalid format".to_string(),
                            "required" => "required".to_string(),
                            _ => "invalid value".to_string(),
                        });

                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}
