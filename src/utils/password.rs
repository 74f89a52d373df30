use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use rand::Rng;
use base64::{Engine, engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD}};

type HmacSha256 = Hmac<Sha256>;

const ITERATIONS: u32 = 260000;
const KEY_LENGTH: usize = 32;

/// Hash un mot de passe au format Werkzeug (compatible avec l'ancienne
/// application Python). PBKDF2-HMAC-SHA256, 260000 itérations, salt 16 bytes.
pub fn hash_password(password: &str) -> Result<String, String> {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, ITERATIONS, &mut key)
        .map_err(|e| format!("PBKDF2 hash generation failed: {}", e))?;

    // Format: pbkdf2:sha256:iterations$salt$hash
    Ok(format!(
        "pbkdf2:sha256:{}${}${}",
        ITERATIONS,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

/// Vérifie un mot de passe contre un hash stocké au format Werkzeug
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    // Parser le format: pbkdf2:sha256:iterations$salt$hash
    let parts: Vec<&str> = stored_hash.split('$').collect();
    if parts.len() != 3 {
        return Err("Invalid hash format".to_string());
    }

    let header_parts: Vec<&str> = parts[0].split(':').collect();
    if header_parts.len() != 3 {
        return Err("Invalid header".to_string());
    }

    let iterations = header_parts[2]
        .parse::<u32>()
        .map_err(|_| "Invalid iterations".to_string())?;

    let salt = decode_flexible(parts[1])?;
    let expected_hash = decode_flexible(parts[2])?;

    let mut computed = vec![0u8; expected_hash.len()];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut computed)
        .map_err(|e| format!("PBKDF2 hash verification failed: {}", e))?;

    Ok(computed == expected_hash)
}

/// Décode salt/hash en base64 (avec ou sans padding) ou en hexadécimal,
/// pour rester compatible avec les hashs migrés depuis Python
fn decode_flexible(input: &str) -> Result<Vec<u8>, String> {
    if input.len() == 64 && input.chars().all(|c| c.is_ascii_hexdigit()) {
        return hex::decode(input).map_err(|e| format!("Hex decode failed: {}", e));
    }

    if let Ok(decoded) = URL_SAFE_NO_PAD.decode(input) {
        return Ok(decoded);
    }

    let padding = "=".repeat((4 - (input.len() % 4)) % 4);
    let padded = format!("{}{}", input, padding);
    if let Ok(decoded) = STANDARD.decode(&padded) {
        return Ok(decoded);
    }

    hex::decode(input).map_err(|_| "Failed to decode".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_et_verification() {
        let hash = hash_password("motdepasse123").unwrap();
        assert!(hash.starts_with("pbkdf2:sha256:260000$"));
        assert!(verify_password("motdepasse123", &hash).unwrap());
        assert!(!verify_password("mauvais", &hash).unwrap());
    }

    #[test]
    fn test_format_invalide() {
        assert!(verify_password("x", "pas-un-hash").is_err());
    }
}
