use uuid::Uuid;

/// Generates a fresh storage key for an uploaded file, preserving the
/// original extension when it looks safe (short, alphanumeric).
pub fn object_key(original_filename: &str) -> String {
    let base = Uuid::new_v4().to_string();
    match sanitized_extension(original_filename) {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    }
}

fn sanitized_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.').map(|(_, ext)| ext)?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
