use rocket::fs::TempFile;
use rocket::tokio::fs;
use uuid::Uuid;

/// Buffers an uploaded temp file into memory. Rocket may keep small uploads
/// in memory and spill larger ones to disk; copying through a scratch path
/// handles both variants.
pub async fn read_temp_file(file: &mut TempFile<'_>) -> std::io::Result<Vec<u8>> {
    let scratch = std::env::temp_dir().join(format!("travel-hub-upload-{}", Uuid::new_v4()));
    file.copy_to(&scratch).await?;
    let bytes = fs::read(&scratch).await?;
    let _ = fs::remove_file(&scratch).await;
    Ok(bytes)
}
