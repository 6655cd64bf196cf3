use crate::utils::error::{IndexError, Result};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(IndexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(IndexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Input and output must differ, otherwise the atomic rename would replace the source.
pub fn validate_distinct_paths(input: &str, output: &str) -> Result<()> {
    if same_location(Path::new(input), Path::new(output)) {
        return Err(IndexError::ConfigValidationError {
            field: "output_path".to_string(),
            message: format!("Output path '{}' is the same as the input path", output),
        });
    }
    Ok(())
}

fn same_location(input: &Path, output: &Path) -> bool {
    if without_cur_dir(input) == without_cur_dir(output) {
        return true;
    }

    // the output may not exist yet, so resolve its directory instead
    let resolved_output = output.file_name().and_then(|name| {
        let parent = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        parent.canonicalize().ok().map(|dir| dir.join(name))
    });

    match (input.canonicalize(), resolved_output) {
        (Ok(input), Some(output)) => input == output,
        _ => false,
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IndexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons
    if !(value >= min && value <= max) {
        return Err(IndexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
