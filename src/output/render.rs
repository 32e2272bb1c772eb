//! Template substitution for the published page

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Replace every occurrence of `placeholder` with `body`.
///
/// Returns the rendered document and the number of replacements made.
pub(crate) fn render_into_template(template: &str, placeholder: &str, body: &str) -> (String, usize) {
    if placeholder.is_empty() {
        return (template.to_string(), 0);
    }
    let count = template.matches(placeholder).count();
    (template.replace(placeholder, body), count)
}

pub(crate) fn render_file(
    template_path: &Path,
    output_path: &Path,
    placeholder: &str,
    body: &str,
) -> Result<usize, AppError> {
    let template = fs::read_to_string(template_path).map_err(|source| AppError::ReadFile {
        path: template_path.to_path_buf(),
        source,
    })?;

    let (rendered, count) = render_into_template(&template, placeholder, body);

    fs::write(output_path, rendered).map_err(|source| AppError::WriteFile {
        path: output_path.to_path_buf(),
        source,
    })?;

    Ok(count)
}
