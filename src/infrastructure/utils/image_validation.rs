use crate::{entities::upload::ValidationOutcome, errors::UploadError, settings::UploadSettings};

/// Validates an uploaded image by its original name and byte size.
///
/// Checks run in a fixed order: name shape, extension, size. The name must
/// split on `.` into exactly a base name and an extension, so `a.b.png` and
/// `png` are both rejected. Extensions match the allow-list case-sensitively.
pub fn validate_image<'a>(
    original_name: &'a str,
    size: u64,
    settings: &UploadSettings,
) -> ValidationOutcome<'a> {
    let ext = extract_extension(original_name).ok_or(UploadError::MalformedName)?;

    if !settings.is_allowed_extension(ext) {
        return Err(UploadError::UnsupportedExtension(ext.to_string()));
    }

    if size > settings.max_file_size {
        return Err(UploadError::OversizedFile(settings.max_file_size));
    }

    Ok(ext)
}

/// Returns the extension when `name` has exactly one dot.
pub fn extract_extension(name: &str) -> Option<&str> {
    let mut parts = name.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(ext), None) => Some(ext),
        _ => None,
    }
}
