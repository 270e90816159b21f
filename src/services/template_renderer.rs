//! Dockerfile rendering with minijinja.

use std::fs;
use std::io;
use std::path::Path;

use minijinja::{Environment, UndefinedBehavior, Value};

use crate::domain::{AppError, TemplateParams};

const TEMPLATE_NAME: &str = "Dockerfile";

fn build_template_environment(source: &str) -> Result<Environment<'_>, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    env.add_template(TEMPLATE_NAME, source).map_err(|e| AppError::Template {
        name: TEMPLATE_NAME.to_string(),
        details: format!("failed to parse: {}", e),
    })?;

    Ok(env)
}

/// Render template text with the given parameters.
pub fn render_template(source: &str, params: &TemplateParams) -> Result<String, AppError> {
    let env = build_template_environment(source)?;
    let template = env.get_template(TEMPLATE_NAME).map_err(|e| AppError::Template {
        name: TEMPLATE_NAME.to_string(),
        details: format!("failed to load: {}", e),
    })?;

    template.render(Value::from_serialize(params)).map_err(|e| AppError::Template {
        name: TEMPLATE_NAME.to_string(),
        details: format!("failed to render: {}", e),
    })
}

/// Render `template_path` into `output_path`, creating or overwriting it.
///
/// The output is only opened once rendering has succeeded.
pub fn write_dockerfile(
    template_path: &Path,
    output_path: &Path,
    params: &TemplateParams,
) -> Result<(), AppError> {
    let source = fs::read_to_string(template_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::TemplateNotFound(template_path.to_path_buf()),
        _ => AppError::Io(e),
    })?;

    let rendered = render_template(&source, params).map_err(|e| match e {
        AppError::Template { details, .. } => {
            AppError::Template { name: template_path.display().to_string(), details }
        }
        other => other,
    })?;

    fs::write(output_path, rendered)?;
    Ok(())
}
